use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Kinds of entries in a pet's medical carnet that can be reminded about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareType {
    Vaccine,
    Deworming,
    Bath,
    Medication,
}

impl CareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vaccine => "vaccine",
            Self::Deworming => "deworming",
            Self::Bath => "bath",
            Self::Medication => "medication",
        }
    }
}

impl Display for CareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CareType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vaccine" => Ok(Self::Vaccine),
            "deworming" => Ok(Self::Deworming),
            "bath" => Ok(Self::Bath),
            "medication" => Ok(Self::Medication),
            _ => Err(anyhow::Error::msg(format!("Unknown care type: {}", s))),
        }
    }
}

/// An entry in the medical carnet of a `Pet`.
///
/// Written by the medical entry endpoints, read only for this service.
#[derive(Debug, Clone)]
pub struct CarnetRecord {
    pub id: ID,
    pub pet_id: ID,
    pub record_type: CareType,
    /// Vaccine, product or medicine name. Baths usually leave it empty.
    pub name: String,
    /// Application date, or start date for medications
    pub applied_on: NaiveDate,
    /// Next dose for vaccines and dewormings, end date for medications.
    /// Baths never carry it, the next bath is derived from the frequency.
    pub due_on: Option<NaiveDate>,
}

impl CarnetRecord {
    pub fn new(
        pet_id: ID,
        record_type: CareType,
        name: &str,
        applied_on: NaiveDate,
        due_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Default::default(),
            pet_id,
            record_type,
            name: name.to_string(),
            applied_on,
            due_on,
        }
    }
}

impl Entity for CarnetRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}
