//! Bearer-token authentication for the API routes.
//!
//! Handlers take an [`AuthenticatedUser`] argument; extraction decodes the
//! `Authorization: Bearer` header against the configured secret and rejects
//! the request with 401 before the handler body runs.

use std::future::{Ready, ready};

use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Issued tokens expire after this many hours.
pub const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// JWT claims carried by an access token.
pub struct Claims {
    /// User identifier.
    pub sub: i32,
    pub username: String,
    pub role: String,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
}

#[derive(Debug, Clone)]
/// Identity of the caller, decoded from a valid bearer token.
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorInternalServerError("server configuration missing"))?;

            let token =
                bearer_token(req).ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;

            let data = decode::<Claims>(
                token,
                &DecodingKey::from_secret(config.secret.as_bytes()),
                &Validation::default(),
            )
            .map_err(|e| {
                log::debug!("Rejected bearer token: {e}");
                ErrorUnauthorized("invalid or expired token")
            })?;

            Ok(data.claims.into())
        })();

        ready(result)
    }
}
