//! HTTP route handlers for the registry API.

use actix_web::{HttpResponse, web};
use log::error;
use serde_json::json;

use crate::services::ServiceError;

pub mod auth;
pub mod person;

/// Registers every API handler; mounted under `/api/v1` by the server and
/// by the route tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::recover_password)
        .service(auth::reset_password)
        .service(auth::change_password)
        .service(auth::profile)
        .service(person::list_persons)
        .service(person::create_person)
        .service(person::get_person_by_cpf)
        .service(person::cpf_exists)
        .service(person::get_person)
        .service(person::update_person)
        .service(person::delete_person);
}

/// Maps a service failure onto its HTTP response.
///
/// Client-caused failures carry their message; repository and internal
/// errors are logged and answered without detail.
pub(crate) fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "message": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "message": "internal server error" }))
        }
    }
}

/// 400 response for a request body that failed validation.
pub(crate) fn validation_failed(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "message": format!("validation errors: {errors}") }))
}
