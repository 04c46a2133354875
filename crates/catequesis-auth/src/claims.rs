//! Token claims and the closed set of roles they can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried in the payload segment of every token.
///
/// The field names are the wire names: `subject_id`, `email`, `role`,
/// `issued_at`, `expires_at`. All of them are required when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Identifier of the authenticated principal
    pub subject_id: i64,
    /// Login e-mail, copied from the directory at login time
    pub email: String,
    /// Role tag, normally one of `admin`, `teacher`, `staff`
    pub role: String,
    /// Issued-at (Unix timestamp, seconds)
    pub issued_at: i64,
    /// Expiry (Unix timestamp, seconds); the token is rejected from this instant on
    pub expires_at: i64,
}

impl Claims {
    /// The parsed role, or `None` when the tag is outside the known set.
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[serde(alias = "maestro")]
    Teacher,
    #[serde(alias = "secretaria")]
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Staff => "staff",
        }
    }

    /// Higher number = more privileges.
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            Role::Admin => 2,
            Role::Staff => 1,
            Role::Teacher => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" | "maestro" => Ok(Role::Teacher),
            "staff" | "secretaria" => Ok(Role::Staff),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            subject_id: 7,
            email: "maestro1@parroquia.local".to_string(),
            role: "teacher".to_string(),
            issued_at: 1_700_000_000,
            expires_at: 1_700_604_800,
        }
    }

    #[test]
    fn test_claims_serialize_wire_names() {
        let serialized = serde_json::to_string(&sample_claims()).unwrap();
        assert_eq!(
            serialized,
            r#"{"subject_id":7,"email":"maestro1@parroquia.local","role":"teacher","issued_at":1700000000,"expires_at":1700604800}"#
        );
    }

    #[test]
    fn test_claims_missing_field_rejected() {
        let json = r#"{"subject_id":7,"email":"a@b.c","role":"admin","issued_at":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_wrong_type_rejected() {
        let json = r#"{"subject_id":"7","email":"a@b.c","role":"admin","issued_at":1,"expires_at":2}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let claims = sample_claims();
        assert!(!claims.is_expired_at(claims.expires_at - 1));
        assert!(claims.is_expired_at(claims.expires_at));
        assert!(claims.is_expired_at(claims.expires_at + 1));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!("staff".parse::<Role>(), Ok(Role::Staff));
        assert!("Admin".parse::<Role>().is_err());
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_legacy_tags() {
        assert_eq!("maestro".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!("secretaria".parse::<Role>(), Ok(Role::Staff));
        let role: Role = serde_json::from_str(r#""secretaria""#).unwrap();
        assert_eq!(role, Role::Staff);
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""staff""#);
    }

    #[test]
    fn test_role_round_trips_through_as_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_claims_role_accessor() {
        let mut claims = sample_claims();
        assert_eq!(claims.role(), Some(Role::Teacher));
        claims.role = "parroco".to_string();
        assert_eq!(claims.role(), None);
    }
}
