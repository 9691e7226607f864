//! Authorization resolver - admin and owner facts for one message

use serde::{Deserialize, Serialize};
use crate::domain::entities::{decode_identity, Message, OwnerSet, Participant};
use crate::domain::traits::Connection;

/// How a participant missing from the group roster is treated.
///
/// `Admin` reproduces the historical "admin flag is not false" check, under
/// which an unlisted participant counts as admin. `Member` is the safe choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlistedParticipant {
    #[default]
    Admin,
    Member,
}

/// Facts resolved for one message, never cached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub is_admin: bool,
    pub is_bot_admin: bool,
    pub is_owner: bool,
}

#[derive(Debug, Clone)]
pub struct AuthorizationResolver {
    owners: Vec<String>,
    identity_suffix: String,
    unlisted: UnlistedParticipant,
}

impl AuthorizationResolver {
    pub fn new(owners: Vec<String>, identity_suffix: impl Into<String>) -> Self {
        Self {
            owners,
            identity_suffix: identity_suffix.into(),
            unlisted: UnlistedParticipant::default(),
        }
    }

    pub fn with_unlisted(mut self, unlisted: UnlistedParticipant) -> Self {
        self.unlisted = unlisted;
        self
    }

    pub async fn resolve(&self, message: &Message, conn: &dyn Connection) -> AuthorizationContext {
        let own_id = decode_identity(&conn.own_identity());
        let is_owner = OwnerSet::new(&own_id, &self.owners, &self.identity_suffix).contains(&message.sender);

        if !message.is_group {
            return AuthorizationContext {
                is_admin: false,
                is_bot_admin: false,
                is_owner,
            };
        }

        match conn.group_roster(&message.chat_id).await {
            Ok(roster) => AuthorizationContext {
                is_admin: self.is_listed_admin(&roster, &message.sender),
                is_bot_admin: self.is_listed_admin(&roster, &own_id),
                is_owner,
            },
            Err(e) => {
                tracing::warn!("[{}] No admin data available: {}", message.chat_id, e);
                AuthorizationContext {
                    is_admin: false,
                    is_bot_admin: false,
                    is_owner,
                }
            }
        }
    }

    fn is_listed_admin(&self, roster: &[Participant], id: &str) -> bool {
        match roster.iter().find(|p| p.id == id) {
            Some(p) => p.role.is_admin(),
            None => self.unlisted == UnlistedParticipant::Admin,
        }
    }
}
