use serde::{Deserialize, Serialize};

pub mod cart;
pub mod notification;
pub mod status;

/// Role attached to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Tailor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Tailor => "tailor",
            Role::Admin => "admin",
        }
    }
}

/// An authenticated actor, as persisted by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub role: Role,
}

/// Who the session is currently acting as. Absence of a persisted
/// identity record means `Guest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionIdentity {
    #[default]
    Guest,
    User(Identity),
}

impl SessionIdentity {
    pub fn is_guest(&self) -> bool {
        matches!(self, SessionIdentity::Guest)
    }

    pub fn user(&self) -> Option<&Identity> {
        match self {
            SessionIdentity::Guest => None,
            SessionIdentity::User(identity) => Some(identity),
        }
    }
}
