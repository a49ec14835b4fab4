use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::User;

/// Request body for user registration.
///
/// Fields are optional so a missing key surfaces as a field-level
/// validation error rather than a body-level rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to clients. The password hash is
/// structurally absent.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        User {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "a@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn public_user_never_carries_password_fields() {
        let json = serde_json::to_value(PublicUser::from(sample_user())).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@example.com");
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let json = serde_json::to_value(PublicUser::from(sample_user())).unwrap();
        assert_eq!(json["created_at"], "2023-11-14T22:13:20Z");
        assert_eq!(json["updated_at"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn login_response_has_token_envelope() {
        let response = LoginResponse {
            access_token: "abc".into(),
            token_type: "Bearer",
            expires_in: 86_400,
            user: PublicUser::from(sample_user()),
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 86_400);
        assert!(json["access_token"].is_string());
        assert!(json["user"].is_object());
    }
}
