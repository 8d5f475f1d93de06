//! People and crew assignments.
//!
//! A person owns a set of skills and holds at most one active crew posting
//! (their job). Skills live and die with their person; a crew record is a
//! join between a person and a ship and is orphaned when either side goes.

use serde::{Deserialize, Serialize};

use crate::ids::{CrewId, PersonId, ShipId, SkillId};

/// A campaign character, player-facing or otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
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
    pub living: bool,
    pub skills: Vec<PersonSkill>,
    pub job: Option<Crew>,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            first_name: first_name.into(),
            nickname: None,
            last_name: last_name.into(),
            vice: None,
            description: None,
            regret: None,
            goal: None,
            age: None,
            sex: None,
            gender: None,
            living: true,
            skills: Vec::new(),
            job: None,
        }
    }
}

/// A skill owned by exactly one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonSkill {
    pub id: SkillId,
    pub person: PersonId,
    pub skill: String,
    pub description: Option<String>,
}

/// Crew posting binding a person to a ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: CrewId,
    pub person: PersonId,
    pub ship: ShipId,
    pub experience: i64,
    pub payrate: i64,
    pub role: String,
}
