//! Rows of the `companies` and `employees` tables.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub introduction: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub product: Option<String>,
}

/// Stored as an integer column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, sqlx::Type)]
#[repr(i32)]
pub enum Gender {
    #[default]
    Female = 0,
    Male = 1,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "female" | "0" => Ok(Gender::Female),
            "male" | "1" => Ok(Gender::Male),
            other => Err(format!("invalid gender: {} (expected male or female)", other)),
        }
    }
}

/// Accepts either the name (`"Male"`, case-insensitive) or the stored number.
impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;
        match v {
            serde_json::Value::String(s) => s.parse().map_err(de::Error::custom),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Gender::Female),
                Some(1) => Ok(Gender::Male),
                _ => Err(de::Error::custom(format!("invalid gender: {}", n))),
            },
            other => Err(de::Error::custom(format!(
                "gender must be a string or number; got {}",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDateTime,
}
