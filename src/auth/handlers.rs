use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
            RegisterResponse,
        },
        extractors::{CurrentUser, MaybeBearer},
        service,
    },
    error::{ApiError, ValidationErrors},
    state::AppState,
};

pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/user", get(current_user))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Emails are compared lowercase everywhere; normalize once at the edge.
fn normalized_email(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let mut errors = ValidationErrors::new();

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    match name {
        None => errors.add("name", "The name field is required."),
        Some(n) if n.chars().count() > 255 => {
            errors.add("name", "The name may not be greater than 255 characters.")
        }
        Some(_) => {}
    }

    let email = normalized_email(&payload.email);
    match email.as_deref() {
        None => errors.add("email", "The email field is required."),
        Some(e) if !is_valid_email(e) => {
            errors.add("email", "The email must be a valid email address.")
        }
        Some(e) if e.chars().count() > 255 => {
            errors.add("email", "The email may not be greater than 255 characters.")
        }
        Some(_) => {}
    }

    let password = payload.password.as_deref().filter(|p| !p.is_empty());
    match password {
        None => errors.add("password", "The password field is required."),
        Some(p) if p.chars().count() < 8 => {
            errors.add("password", "The password must be at least 8 characters.")
        }
        Some(p) if payload.password_confirmation.as_deref() != Some(p) => {
            errors.add("password", "The password confirmation does not match.")
        }
        Some(_) => {}
    }

    // Uniqueness hint for the client; the store constraint stays the
    // authority at insert time.
    if let Some(e) = email.as_deref() {
        if !errors.contains("email") {
            if let Ok(Some(_)) = state.store.find_user_by_email(e).await {
                warn!("registration with taken email");
                errors.add("email", "The email has already been taken.");
            }
        }
    }

    let (name, email, password) = match (name, email.as_deref(), password) {
        (Some(n), Some(e), Some(p)) if errors.is_empty() => (n, e, p),
        _ => return Err(ApiError::Validation(errors)),
    };

    let user = service::register_user(state.store.as_ref(), name, email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut errors = ValidationErrors::new();

    let email = normalized_email(&payload.email);
    match email.as_deref() {
        None => errors.add("email", "The email field is required."),
        Some(e) if !is_valid_email(e) => {
            errors.add("email", "The email must be a valid email address.")
        }
        Some(_) => {}
    }

    let password = payload.password.as_deref().filter(|p| !p.is_empty());
    if password.is_none() {
        errors.add("password", "The password field is required.");
    }

    let (email, password) = match (email.as_deref(), password) {
        (Some(e), Some(p)) if errors.is_empty() => (e, p),
        _ => return Err(ApiError::Validation(errors)),
    };

    let session = service::authenticate_user(
        state.store.as_ref(),
        state.config.token_expiry_secs(),
        email,
        password,
    )
    .await?;

    Ok(Json(LoginResponse {
        access_token: session.token.token,
        token_type: "Bearer",
        expires_in: session.token.expires_in,
        user: PublicUser::from(session.user),
    }))
}

#[instrument(skip(state, bearer))]
pub async fn logout(
    State(state): State<AppState>,
    MaybeBearer(bearer): MaybeBearer,
) -> Json<MessageResponse> {
    service::logout_user(state.store.as_ref(), bearer.as_deref()).await;
    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}

#[instrument(skip_all)]
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}
