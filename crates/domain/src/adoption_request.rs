use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Note written on sibling requests that are rejected because another
/// request for the same `Pet` got approved
pub const CASCADE_REJECTION_NOTE: &str =
    "Automatically rejected: another adoption request for this pet was approved.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionRequestStatus {
    Pending,
    Approved,
    Rejected,
    Contacted,
}

impl AdoptionRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Contacted => "contacted",
        }
    }

    /// `Approved` and `Rejected` have fired their side effects and only
    /// accept note edits afterwards
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn can_transition_to(&self, to: AdoptionRequestStatus) -> bool {
        if self.is_final() {
            *self == to
        } else {
            true
        }
    }
}

impl Display for AdoptionRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid adoption request status: `{0}`. Expected one of: pending, approved, rejected, contacted")]
pub struct InvalidStatusError(pub String);

impl FromStr for AdoptionRequestStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "contacted" => Ok(Self::Contacted),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// Contact, housing and motivation details given by the applicant.
/// Absent fields deserialize as empty so that they can be reported by
/// `missing_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub housing_type: String,
    pub has_yard: bool,
    pub has_other_pets: bool,
    pub has_children: bool,
    pub motivation: String,
}

impl ApplicantDetails {
    /// Names of the required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("housingType", &self.housing_type),
            ("motivation", &self.motivation),
        ];

        required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// Same status was written again, only the notes may have changed
    Unchanged,
    Changed {
        from: AdoptionRequestStatus,
        to: AdoptionRequestStatus,
    },
}

impl StatusChange {
    pub fn is_approval(&self) -> bool {
        matches!(
            self,
            Self::Changed {
                to: AdoptionRequestStatus::Approved,
                ..
            }
        )
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Adoption request is already {from} and can not be moved to {to}")]
pub struct InvalidTransitionError {
    pub from: AdoptionRequestStatus,
    pub to: AdoptionRequestStatus,
}

#[derive(Debug, Clone)]
pub struct AdoptionRequest {
    pub id: ID,
    pub pet_id: ID,
    pub foundation_id: ID,
    /// Registered `User` behind the request. Anonymous applicants are
    /// only reachable through `applicant.email`.
    pub user_id: Option<ID>,
    pub applicant: ApplicantDetails,
    pub status: AdoptionRequestStatus,
    pub notes: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl AdoptionRequest {
    pub fn new(
        pet_id: ID,
        foundation_id: ID,
        user_id: Option<ID>,
        applicant: ApplicantDetails,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            pet_id,
            foundation_id,
            user_id,
            applicant,
            status: AdoptionRequestStatus::Pending,
            notes: None,
            created: now,
            updated: now,
        }
    }

    pub fn set_status(
        &mut self,
        to: AdoptionRequestStatus,
        notes: Option<String>,
        now: i64,
    ) -> Result<StatusChange, InvalidTransitionError> {
        let from = self.status;
        if !from.can_transition_to(to) {
            return Err(InvalidTransitionError { from, to });
        }

        self.status = to;
        if notes.is_some() {
            self.notes = notes;
        }
        self.updated = now;

        if from == to {
            Ok(StatusChange::Unchanged)
        } else {
            Ok(StatusChange::Changed { from, to })
        }
    }

    /// Rejection forced by the approval of a sibling request
    pub fn reject_by_cascade(&mut self, now: i64) {
        self.status = AdoptionRequestStatus::Rejected;
        self.notes = Some(CASCADE_REJECTION_NOTE.to_string());
        self.updated = now;
    }
}

impl Entity for AdoptionRequest {
    fn id(&self) -> &ID {
        &self.id
    }
}
