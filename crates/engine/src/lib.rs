//! Starhold engine: REST backend for running a starfaring TTRPG campaign.
//!
//! The engine owns the SQLite store and exposes the campaign state (people,
//! ships, event clocks, games, players, star systems) over axum routes.

pub mod app;
pub mod infrastructure;

pub use app::App;
pub use infrastructure::db::Db;
pub use infrastructure::http::router;
