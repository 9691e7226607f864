use serde::{Deserialize, Serialize};

/// Admin rank of a group participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipantRole {
    Member,
    Admin,
    SuperAdmin,
}

impl ParticipantRole {
    pub fn is_admin(&self) -> bool {
        !matches!(self, ParticipantRole::Member)
    }
}

/// One roster entry returned by the group metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Participant {
    pub id: String,
    pub role: ParticipantRole,
}

impl Participant {
    pub fn member(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ParticipantRole::Member,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ParticipantRole::Admin,
        }
    }
}
