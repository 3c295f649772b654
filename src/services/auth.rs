use bcrypt::DEFAULT_COST;
use chrono::{Duration, NaiveDateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use log::{info, warn};
use uuid::Uuid;

use crate::domain::user::NewUser;
use crate::domain::user::User;
use crate::dto::auth::{AuthResponse, UserResponse};
use crate::models::auth::{Claims, TOKEN_TTL_HOURS};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Recovery tokens stay valid for one hour.
const RECOVERY_TOKEN_TTL_HOURS: i64 = 1;

/// Credentials presented at login; `login` is a username or an email.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Data required to open a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Signs an access token for the user, returning it with its expiry.
pub fn issue_token(user: &User, secret: &str) -> ServiceResult<(String, NaiveDateTime)> {
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("failed to sign token: {e}")))?;

    Ok((token, expires_at.naive_utc()))
}

/// Opens a new account and signs the first access token.
pub fn register<R>(repo: &R, registration: Registration, secret: &str) -> ServiceResult<AuthResponse>
where
    R: UserReader + UserWriter + ?Sized,
{
    let username = registration.username.trim().to_string();
    let email = registration.email.to_lowercase().trim().to_string();

    if repo.user_exists(&username, &email)? {
        warn!("Registration rejected, username or email taken: {username}");
        return Err(ServiceError::Conflict(
            "username or email already registered".to_string(),
        ));
    }

    let new_user = NewUser::new(
        username,
        email,
        hash_password(&registration.password)?,
        registration.full_name,
    );

    let user = repo.create_user(&new_user)?;
    info!("User registered: {}", user.username);

    let (token, expires_at) = issue_token(&user, secret)?;
    Ok(AuthResponse {
        token,
        expires_at,
        user: user.into(),
    })
}

/// Verifies credentials and signs an access token.
pub fn login<R>(repo: &R, credentials: Credentials, secret: &str) -> ServiceResult<AuthResponse>
where
    R: UserReader + UserWriter + ?Sized,
{
    let login = credentials.login.trim();
    let Some(mut user) = repo.get_user_by_login(login)? else {
        warn!("Login attempt for unknown user: {login}");
        return Err(ServiceError::Unauthorized);
    };

    let password_matches = bcrypt::verify(&credentials.password, &user.password_hash)
        .map_err(|e| ServiceError::Internal(format!("failed to verify password: {e}")))?;
    if !password_matches {
        warn!("Login attempt with wrong password for user: {}", user.username);
        return Err(ServiceError::Unauthorized);
    }

    repo.set_last_login(user.id)?;
    user.last_login = Some(Utc::now().naive_utc());
    info!("User logged in: {}", user.username);

    let (token, expires_at) = issue_token(&user, secret)?;
    Ok(AuthResponse {
        token,
        expires_at,
        user: user.into(),
    })
}

/// Starts password recovery for the given email.
///
/// Returns `Ok(None)` when no active account matches, so the route can
/// answer identically either way and not leak which emails exist. The
/// token is logged instead of mailed; wiring a mailer is the deployment's
/// concern.
pub fn recover_password<R>(repo: &R, email: &str) -> ServiceResult<Option<String>>
where
    R: UserReader + UserWriter + ?Sized,
{
    let email = email.trim().to_lowercase();
    let Some(user) = repo.get_user_by_login(&email)? else {
        warn!("Password recovery requested for unknown email: {email}");
        return Ok(None);
    };

    let token = Uuid::new_v4().to_string();
    let expires = (Utc::now() + Duration::hours(RECOVERY_TOKEN_TTL_HOURS)).naive_utc();
    repo.set_recovery_token(user.id, &token, expires)?;

    info!("Password recovery token for {email}: {token}");
    Ok(Some(token))
}

/// Sets a new password for the account holding a live recovery token.
pub fn reset_password<R>(repo: &R, token: &str, new_password: &str) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let Some(user) = repo.get_user_by_recovery_token(token)? else {
        return Err(ServiceError::Validation(
            "invalid or expired recovery token".to_string(),
        ));
    };

    repo.set_password_hash(user.id, &hash_password(new_password)?)?;
    info!("Password reset for user: {}", user.username);
    Ok(())
}

/// Replaces the password of an authenticated user after verifying the
/// current one.
pub fn change_password<R>(
    repo: &R,
    user_id: i32,
    current_password: &str,
    new_password: &str,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;

    let current_matches = bcrypt::verify(current_password, &user.password_hash)
        .map_err(|e| ServiceError::Internal(format!("failed to verify password: {e}")))?;
    if !current_matches {
        return Err(ServiceError::Unauthorized);
    }

    repo.set_password_hash(user.id, &hash_password(new_password)?)?;
    info!("Password changed for user: {}", user.username);
    Ok(())
}

/// Returns the profile of an active account.
pub fn get_profile<R>(repo: &R, user_id: i32) -> ServiceResult<UserResponse>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id)?
        .map(Into::into)
        .ok_or(ServiceError::NotFound)
}

fn hash_password(password: &str) -> ServiceResult<String> {
    bcrypt::hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(format!("failed to hash password: {e}")))
}
