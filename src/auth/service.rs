use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{password, token};
use crate::store::{AccessToken, AuthStore, StoreError, User};

/// How often token issuance retries when the generated value collides
/// with an existing one. Collisions are a store-reported condition, not
/// something the generator can rule out.
const TOKEN_INSERT_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("The email address or password is incorrect")]
    InvalidCredentials,
    #[error("Unauthenticated.")]
    Unauthenticated,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result of a successful login: the authenticated user and the freshly
/// issued token, carrying its advisory `expires_in`.
#[derive(Debug)]
pub struct AuthSession {
    pub user: User,
    pub token: AccessToken,
}

pub async fn register_user(
    store: &dyn AuthStore,
    name: &str,
    email: &str,
    plain_password: &str,
) -> Result<User, AuthError> {
    let hash = password::hash_password(plain_password)?;

    let user = match store.insert_user(name, email, &hash).await {
        Ok(user) => user,
        Err(StoreError::DuplicateEmail) => return Err(AuthError::DuplicateEmail),
        Err(e) => return Err(AuthError::Internal(e.into())),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Verify credentials and issue a new access token.
///
/// An unknown email and a wrong password produce the identical
/// `InvalidCredentials` outcome, so the response never reveals which
/// part of the credential was wrong.
pub async fn authenticate_user(
    store: &dyn AuthStore,
    expires_in: i64,
    email: &str,
    plain_password: &str,
) -> Result<AuthSession, AuthError> {
    let user = match store.find_user_by_email(email).await? {
        Some(user) => user,
        None => {
            warn!("login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    if !password::verify_password(plain_password, &user.password_hash)? {
        warn!(user_id = %user.id, "login attempt with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    for _ in 0..TOKEN_INSERT_ATTEMPTS {
        let value = token::generate();
        match store.insert_token(&value, user.id, expires_in).await {
            Ok(issued) => {
                info!(user_id = %user.id, "access token issued");
                return Ok(AuthSession {
                    user,
                    token: issued,
                });
            }
            Err(StoreError::DuplicateToken) => continue,
            Err(e) => return Err(AuthError::Internal(e.into())),
        }
    }

    Err(AuthError::Internal(anyhow::anyhow!(
        "token value collided {TOKEN_INSERT_ATTEMPTS} times"
    )))
}

/// Revoke the presented token, if any.
///
/// Never produces an error outcome: a missing token, an already-revoked
/// value, and even a failing store all end in success for the caller.
pub async fn logout_user(store: &dyn AuthStore, token: Option<&str>) {
    if let Some(value) = token {
        match store.delete_token(value).await {
            Ok(()) => info!("access token revoked"),
            Err(e) => error!(error = %e, "failed to delete access token"),
        }
    }
}

/// Resolve a bearer token to its owning user.
///
/// A token that was never issued or has been revoked yields
/// `Unauthenticated`. Stored expiry is advisory and not checked here.
pub async fn resolve_current_user(store: &dyn AuthStore, token: &str) -> Result<User, AuthError> {
    match store.find_user_by_token(token).await? {
        Some(user) => Ok(user),
        None => Err(AuthError::Unauthenticated),
    }
}
