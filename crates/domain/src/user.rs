use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    /// Set when the `User` acts on behalf of a foundation
    pub foundation_id: Option<ID>,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            email: email.to_string(),
            foundation_id: None,
        }
    }

    pub fn foundation_member(name: &str, email: &str, foundation_id: ID) -> Self {
        Self {
            foundation_id: Some(foundation_id),
            ..Self::new(name, email)
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
