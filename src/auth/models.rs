//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User roles known to the library backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System administrator - full access
    Admin,
    /// Librarian - manages readers, borrowing and statistics
    Librarian,
    /// Reader - browses books and manages their own borrowing
    Reader,
    /// Any role string the client does not recognise
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Whether a user holding `self` satisfies a route requiring `required`.
    ///
    /// Admin implies librarian; nothing else implies anything. An unknown
    /// role neither grants nor can be granted access.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::Admin => matches!(self, Role::Admin),
            Role::Librarian => matches!(self, Role::Admin | Role::Librarian),
            Role::Reader => matches!(self, Role::Reader),
            Role::Unknown => false,
        }
    }

    /// Admin or librarian
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Admin | Role::Librarian)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Librarian => "librarian",
            Role::Reader => "reader",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "admin" => Role::Admin,
            "librarian" => Role::Librarian,
            "reader" => Role::Reader,
            _ => Role::Unknown,
        })
    }
}

/// User information persisted next to the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
}

impl UserInfo {
    /// User info carrying only a role
    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            user_id: None,
            username: None,
            real_name: None,
        }
    }

    /// Best available name for display
    pub fn display_name(&self) -> &str {
        self.real_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("-")
    }
}

/// Login credentials
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub real_name: Option<String>,
}

impl LoginResponse {
    /// Split into the token and the user info the session persists
    pub fn into_session(self) -> (String, UserInfo) {
        let info = UserInfo {
            role: self.role,
            user_id: self.user_id,
            username: self.username,
            real_name: self.real_name,
        };
        (self.token, info)
    }
}
