//! Actor entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Actor entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
}

/// Actor fields supplied on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorDraft {
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
}

impl ActorDraft {
    pub fn into_actor(self, id: Uuid) -> Actor {
        Actor {
            id,
            name: self.name,
            gender: self.gender,
            birthday: self.birthday,
        }
    }
}
