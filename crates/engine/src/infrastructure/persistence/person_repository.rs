//! Person repository.
//!
//! People carry owned skills and at most one crew posting (their job).
//! The list path flattens a person ⋈ skills ⋈ crew left join; because a
//! person with several crew rows fans out every skill row once per crew
//! row, collation de-duplicates skills by id and keeps the first job seen.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::QueryBuilder;
use starhold_domain::{Crew, CrewId, Person, PersonId, PersonSkill, ShipId, SkillId};

use super::row::{get, get_id, get_opt_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct PersonRepository {
    db: Db,
}

/// Input for a person insert; skills are created in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub nickname: Option<String>,
    pub last_name: String,
    pub vice: Option<String>,
    pub description: Option<String>,
    pub regret: Option<String>,
    pub goal: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub gender: Option<String>,
    #[serde(default = "default_living")]
    pub living: bool,
    #[serde(default)]
    pub skills: Vec<NewPersonSkill>,
}

fn default_living() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPersonSkill {
    pub skill: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCrew {
    pub ship: ShipId,
    #[serde(default)]
    pub experience: i64,
    #[serde(default)]
    pub payrate: i64,
    pub role: String,
}

/// Partial update; only supplied fields are written. Identity and
/// relational fields (id, skills, job) are never writable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub nickname: Option<String>,
    pub last_name: Option<String>,
    pub vice: Option<String>,
    pub description: Option<String>,
    pub regret: Option<String>,
    pub goal: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub gender: Option<String>,
    pub living: Option<bool>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.nickname.is_none()
            && self.last_name.is_none()
            && self.vice.is_none()
            && self.description.is_none()
            && self.regret.is_none()
            && self.goal.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.gender.is_none()
            && self.living.is_none()
    }
}

impl PersonRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a batch of people and their skills in one transaction.
    /// Any failure rolls the whole batch back.
    pub async fn create(&self, people: Vec<NewPerson>) -> Result<Vec<Person>, RepoError> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(people.len());

        for new_person in people {
            let person_id = PersonId::new();
            sqlx::query(
                "INSERT INTO person (id, first_name, nickname, last_name, vice, description, \
                 regret, goal, age, sex, gender, living) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(person_id.to_string())
            .bind(&new_person.first_name)
            .bind(&new_person.nickname)
            .bind(&new_person.last_name)
            .bind(&new_person.vice)
            .bind(&new_person.description)
            .bind(&new_person.regret)
            .bind(&new_person.goal)
            .bind(new_person.age)
            .bind(&new_person.sex)
            .bind(&new_person.gender)
            .bind(new_person.living)
            .execute(&mut *tx)
            .await?;

            let mut skills = Vec::with_capacity(new_person.skills.len());
            for new_skill in &new_person.skills {
                let skill_id = SkillId::new();
                sqlx::query(
                    "INSERT INTO person_skills (id, person, skill, description) VALUES (?, ?, ?, ?)",
                )
                .bind(skill_id.to_string())
                .bind(person_id.to_string())
                .bind(&new_skill.skill)
                .bind(&new_skill.description)
                .execute(&mut *tx)
                .await?;

                skills.push(PersonSkill {
                    id: skill_id,
                    person: person_id,
                    skill: new_skill.skill.clone(),
                    description: new_skill.description.clone(),
                });
            }

            created.push(Person {
                id: person_id,
                first_name: new_person.first_name,
                nickname: new_person.nickname,
                last_name: new_person.last_name,
                vice: new_person.vice,
                description: new_person.description,
                regret: new_person.regret,
                goal: new_person.goal,
                age: new_person.age,
                sex: new_person.sex,
                gender: new_person.gender,
                living: new_person.living,
                skills,
                job: None,
            });
        }

        tx.commit().await?;
        tracing::info!("Created {} people", created.len());
        Ok(created)
    }

    /// Fetch a single person with skills and job. `None` when the primary
    /// row is absent.
    pub async fn fetch_one(&self, id: PersonId) -> Result<Option<Person>, RepoError> {
        let row = sqlx::query("SELECT * FROM person WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut person = person_from_row(&row)?;

        let skill_rows = sqlx::query("SELECT * FROM person_skills WHERE person = ?")
            .bind(id.to_string())
            .fetch_all(self.db.pool())
            .await?;
        for row in &skill_rows {
            person.skills.push(skill_from_row(row)?);
        }

        // at most one job; first row wins
        let job_row = sqlx::query("SELECT * FROM crew WHERE person = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        person.job = job_row.as_ref().map(crew_from_row).transpose()?;

        Ok(Some(person))
    }

    /// Fetch a page of people, ordered by last name.
    pub async fn fetch_many(&self, page: u32, page_size: u32) -> Result<Vec<Person>, RepoError> {
        let offset = super::page_offset(page, page_size);
        let rows = sqlx::query(
            "SELECT p.*, ps.id AS skill_id, ps.skill, ps.description AS skill_description, \
             c.id AS crew_id, c.ship, c.experience, c.payrate, c.role \
             FROM person p \
             LEFT JOIN person_skills ps ON p.id = ps.person \
             LEFT JOIN crew c ON p.id = c.person \
             WHERE p.id IN (SELECT id FROM person ORDER BY last_name LIMIT ? OFFSET ?) \
             ORDER BY p.last_name",
        )
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        collate_people(&rows)
    }

    /// Partial update. An empty patch is a no-op returning the current
    /// aggregate; zero affected rows means the person does not exist.
    pub async fn update(
        &self,
        id: PersonId,
        patch: PersonPatch,
    ) -> Result<Option<Person>, RepoError> {
        if patch.is_empty() {
            return self.fetch_one(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE person SET ");
        {
            let mut sep = builder.separated(", ");
            if let Some(v) = patch.first_name {
                sep.push("first_name = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.nickname {
                sep.push("nickname = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.last_name {
                sep.push("last_name = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.vice {
                sep.push("vice = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.description {
                sep.push("description = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.regret {
                sep.push("regret = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.goal {
                sep.push("goal = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.age {
                sep.push("age = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.sex {
                sep.push("sex = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.gender {
                sep.push("gender = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.living {
                sep.push("living = ").push_bind_unseparated(v);
            }
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(self.db.pool()).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tracing::debug!("Updated person {id}");
        self.fetch_one(id).await
    }

    /// Hard delete; owned skills and crew rows cascade at the store level.
    pub async fn delete(&self, id: PersonId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM person WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        tracing::info!("Deleted person {id}");
        Ok(())
    }

    pub async fn add_skill(
        &self,
        person: PersonId,
        skill: NewPersonSkill,
    ) -> Result<PersonSkill, RepoError> {
        let id = SkillId::new();
        sqlx::query("INSERT INTO person_skills (id, person, skill, description) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(person.to_string())
            .bind(&skill.skill)
            .bind(&skill.description)
            .execute(self.db.pool())
            .await?;

        Ok(PersonSkill {
            id,
            person,
            skill: skill.skill,
            description: skill.description,
        })
    }

    pub async fn remove_skill(&self, person: PersonId, skill: SkillId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM person_skills WHERE id = ? AND person = ?")
            .bind(skill.to_string())
            .bind(person.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn add_job(&self, person: PersonId, job: NewCrew) -> Result<Crew, RepoError> {
        let id = CrewId::new();
        sqlx::query(
            "INSERT INTO crew (id, person, ship, experience, payrate, role) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(person.to_string())
        .bind(job.ship.to_string())
        .bind(job.experience)
        .bind(job.payrate)
        .bind(&job.role)
        .execute(self.db.pool())
        .await?;

        Ok(Crew {
            id,
            person,
            ship: job.ship,
            experience: job.experience,
            payrate: job.payrate,
            role: job.role,
        })
    }

    pub async fn remove_job(&self, person: PersonId, crew: CrewId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM crew WHERE id = ? AND person = ?")
            .bind(crew.to_string())
            .bind(person.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}

fn person_from_row(row: &SqliteRow) -> Result<Person, RepoError> {
    Ok(Person {
        id: get_id(row, "id")?,
        first_name: get(row, "first_name")?,
        nickname: get(row, "nickname")?,
        last_name: get(row, "last_name")?,
        vice: get(row, "vice")?,
        description: get(row, "description")?,
        regret: get(row, "regret")?,
        goal: get(row, "goal")?,
        age: get(row, "age")?,
        sex: get(row, "sex")?,
        gender: get(row, "gender")?,
        living: get(row, "living")?,
        skills: Vec::new(),
        job: None,
    })
}

fn skill_from_row(row: &SqliteRow) -> Result<PersonSkill, RepoError> {
    Ok(PersonSkill {
        id: get_id(row, "id")?,
        person: get_id(row, "person")?,
        skill: get(row, "skill")?,
        description: get(row, "description")?,
    })
}

fn crew_from_row(row: &SqliteRow) -> Result<Crew, RepoError> {
    Ok(Crew {
        id: get_id(row, "id")?,
        person: get_id(row, "person")?,
        ship: get_id(row, "ship")?,
        experience: get(row, "experience")?,
        payrate: get(row, "payrate")?,
        role: get(row, "role")?,
    })
}

/// Collate the flattened person ⋈ skills ⋈ crew join back into aggregates.
///
/// Rows are grouped by person id in first-seen order. A skill is attached
/// only if its id has not been seen for that person yet; the left-join
/// fan-out repeats every skill once per crew row, so skipping this check
/// would multiply the skills list by the crew count. At most one job is
/// kept, the first one encountered.
fn collate_people(rows: &[SqliteRow]) -> Result<Vec<Person>, RepoError> {
    let mut order: Vec<PersonId> = Vec::new();
    let mut people: std::collections::HashMap<PersonId, Person> = std::collections::HashMap::new();

    for row in rows {
        let person_id: PersonId = get_id(row, "id")?;
        let person = match people.entry(person_id) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => {
                order.push(person_id);
                e.insert(person_from_row(row)?)
            }
        };

        if let Some(skill_id) = get_opt_id::<SkillId>(row, "skill_id")? {
            if !person.skills.iter().any(|s| s.id == skill_id) {
                person.skills.push(PersonSkill {
                    id: skill_id,
                    person: person_id,
                    skill: get(row, "skill")?,
                    description: get(row, "skill_description")?,
                });
            }
        }

        if person.job.is_none() {
            if let Some(crew_id) = get_opt_id::<CrewId>(row, "crew_id")? {
                person.job = Some(Crew {
                    id: crew_id,
                    person: person_id,
                    ship: get_id(row, "ship")?,
                    experience: get(row, "experience")?,
                    payrate: get(row, "payrate")?,
                    role: get(row, "role")?,
                });
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|id| people.remove(&id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::Db;

    async fn test_db() -> Db {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        db
    }

    fn sample_person(first: &str, last: &str, skills: Vec<&str>) -> NewPerson {
        NewPerson {
            first_name: first.into(),
            nickname: None,
            last_name: last.into(),
            vice: Some("gambling".into()),
            description: None,
            regret: None,
            goal: Some("retire rich".into()),
            age: Some(34),
            sex: None,
            gender: None,
            living: true,
            skills: skills
                .into_iter()
                .map(|s| NewPersonSkill {
                    skill: s.into(),
                    description: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_one() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec!["Pilot", "Fix"])])
            .await
            .expect("create");
        assert_eq!(created.len(), 1);

        let person = repo
            .fetch_one(created[0].id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(person.first_name, "Arlen");
        assert_eq!(person.skills.len(), 2);
        assert!(person.job.is_none());
    }

    #[tokio::test]
    async fn test_fetch_one_missing_returns_none() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);
        let missing = repo.fetch_one(PersonId::new()).await.expect("fetch");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_rolls_back_whole_batch_on_failure() {
        let db = test_db().await;
        let repo = PersonRepository::new(db.clone());

        let mut bad = sample_person("Mara", "Ilin", vec![]);
        bad.age = Some(-5); // violates the age check constraint

        let result = repo
            .create(vec![sample_person("Arlen", "Voss", vec!["Pilot"]), bad])
            .await;
        assert!(result.is_err());

        let people = repo.fetch_many(1, 10).await.expect("list");
        assert!(people.is_empty(), "first person must not survive rollback");
    }

    #[tokio::test]
    async fn test_list_deduplicates_skills_across_crew_fanout() {
        let db = test_db().await;
        let repo = PersonRepository::new(db.clone());

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec!["Pilot", "Fix"])])
            .await
            .expect("create");
        let person_id = created[0].id;

        // a ship for the crew rows to point at
        let ship_id = ShipId::new();
        sqlx::query(
            "INSERT INTO ship (id, captain, registry, hull, class) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(ship_id.to_string())
        .bind(person_id.to_string())
        .bind("SWN-100")
        .bind("Free Merchant")
        .bind("Frigate")
        .execute(db.pool())
        .await
        .expect("ship row");

        // two crew rows fan the join out: 2 skills x 2 crew = 4 rows
        for role in ["Pilot", "Gunner"] {
            repo.add_job(
                person_id,
                NewCrew {
                    ship: ship_id,
                    experience: 1,
                    payrate: 100,
                    role: role.into(),
                },
            )
            .await
            .expect("crew row");
        }

        let people = repo.fetch_many(1, 10).await.expect("list");
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].skills.len(), 2, "skills must not duplicate");
        assert!(people[0].job.is_some());
    }

    #[tokio::test]
    async fn test_empty_patch_is_a_noop() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec!["Pilot"])])
            .await
            .expect("create");

        let unchanged = repo
            .update(created[0].id, PersonPatch::default())
            .await
            .expect("update")
            .expect("present");
        assert_eq!(unchanged.first_name, "Arlen");
        assert_eq!(unchanged.skills.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_person_returns_none() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);

        let patch = PersonPatch {
            living: Some(false),
            ..PersonPatch::default()
        };
        let result = repo.update(PersonId::new(), patch).await.expect("update");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_writes_only_supplied_fields() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec![])])
            .await
            .expect("create");

        let patch = PersonPatch {
            living: Some(false),
            nickname: Some("Ghost".into()),
            ..PersonPatch::default()
        };
        let updated = repo
            .update(created[0].id, patch)
            .await
            .expect("update")
            .expect("present");
        assert!(!updated.living);
        assert_eq!(updated.nickname.as_deref(), Some("Ghost"));
        // untouched fields survive
        assert_eq!(updated.vice.as_deref(), Some("gambling"));
    }

    #[tokio::test]
    async fn test_delete_cascades_skills() {
        let db = test_db().await;
        let repo = PersonRepository::new(db.clone());

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec!["Pilot"])])
            .await
            .expect("create");
        repo.delete(created[0].id).await.expect("delete");

        let skills: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person_skills")
            .fetch_one(db.pool())
            .await
            .expect("count");
        assert_eq!(skills, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_person_does_not_error() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);
        repo.delete(PersonId::new()).await.expect("delete");
    }

    #[tokio::test]
    async fn test_add_and_remove_skill() {
        let db = test_db().await;
        let repo = PersonRepository::new(db);

        let created = repo
            .create(vec![sample_person("Arlen", "Voss", vec![])])
            .await
            .expect("create");
        let person_id = created[0].id;

        let skill = repo
            .add_skill(
                person_id,
                NewPersonSkill {
                    skill: "Talk".into(),
                    description: Some("Fast talking".into()),
                },
            )
            .await
            .expect("add skill");

        let person = repo
            .fetch_one(person_id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(person.skills.len(), 1);

        repo.remove_skill(person_id, skill.id)
            .await
            .expect("remove skill");
        let person = repo
            .fetch_one(person_id)
            .await
            .expect("fetch")
            .expect("present");
        assert!(person.skills.is_empty());
    }
}
