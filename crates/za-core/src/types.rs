use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Coarse role used for client-side gating of resources and actions.
///
/// The backend issues tokens for exactly these three roles and enforces them
/// per endpoint; the client only uses the role to decide what to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Finance,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Finance, Role::User];

    /// Derive the role requested at login from a username.
    ///
    /// Only the exact usernames `admin` and `finance` map to elevated roles;
    /// everything else (including `Admin` or ` admin`) is a plain user.
    pub fn from_username(username: &str) -> Self {
        match username {
            "admin" => Role::Admin,
            "finance" => Role::Finance,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Finance => "finance",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "finance" => Ok(Role::Finance),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Credential held between invocations: the bearer token issued by the
/// backend and the role it was issued for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}

// Never print the token itself.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_username_allow_list() {
        assert_eq!(Role::from_username("admin"), Role::Admin);
        assert_eq!(Role::from_username("finance"), Role::Finance);
        assert_eq!(Role::from_username("alice"), Role::User);
        assert_eq!(Role::from_username("Admin"), Role::User);
        assert_eq!(Role::from_username(""), Role::User);
    }

    #[test]
    fn role_parse_and_display_agree() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Finance).unwrap();
        assert_eq!(json, "\"finance\"");
    }

    #[test]
    fn session_debug_redacts_token() {
        let session = Session::new("secret-token", Role::Admin);
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("Admin"));
    }
}
