//! Row mapping helpers.
//!
//! Every repository maps rows through these by column name. A missing or
//! wrong-shaped column surfaces as [`RepoError::Mapping`] instead of a
//! panic or a silently defaulted field.

use std::fmt::Display;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::infrastructure::error::RepoError;

/// Read a required column of any decodable type.
pub(crate) fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepoError::Mapping(format!("column `{column}`: {e}")))
}

/// Read a required TEXT column and parse it into a typed id.
pub(crate) fn get_id<T>(row: &SqliteRow, column: &str) -> Result<T, RepoError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = get(row, column)?;
    raw.parse()
        .map_err(|e| RepoError::Mapping(format!("column `{column}`: invalid id `{raw}`: {e}")))
}

/// Read a nullable TEXT column into an optional typed id.
pub(crate) fn get_opt_id<T>(row: &SqliteRow, column: &str) -> Result<Option<T>, RepoError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = get(row, column)?;
    raw.map(|raw| {
        raw.parse()
            .map_err(|e| RepoError::Mapping(format!("column `{column}`: invalid id `{raw}`: {e}")))
    })
    .transpose()
}
