use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAvailability {
    Available,
    Unavailable,
}

impl PetAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn from_available(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// A `Pet` listed in the catalog by a foundation.
///
/// The catalog itself is maintained elsewhere, this service only reads
/// pets and flips their availability when an adoption is approved.
#[derive(Debug, Clone)]
pub struct Pet {
    pub id: ID,
    pub name: String,
    pub species: String,
    pub availability: PetAvailability,
    /// Foundation that publishes the `Pet`. A `Pet` without a foundation
    /// is a data integrity problem and can not receive adoption requests.
    pub foundation_id: Option<ID>,
}

impl Pet {
    pub fn new(name: &str, species: &str, foundation_id: Option<ID>) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            species: species.to_string(),
            availability: PetAvailability::Available,
            foundation_id,
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability == PetAvailability::Available
    }
}

impl Entity for Pet {
    fn id(&self) -> &ID {
        &self.id
    }
}
