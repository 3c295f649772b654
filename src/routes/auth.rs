use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::db::DbPool;
use crate::forms::auth::{
    ChangePasswordForm, LoginForm, RecoverPasswordForm, RegisterForm, ResetPasswordForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::user::DieselUserRepository;
use crate::routes::{error_response, validation_failed};
use crate::services::auth::{self as auth_service, Credentials, Registration};

#[post("/auth/login")]
pub async fn login(
    form: web::Json<LoginForm>,
    pool: web::Data<DbPool>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselUserRepository::new(&pool);
    let credentials = Credentials {
        login: form.login,
        password: form.password,
    };

    match auth_service::login(&repo, credentials, &server_config.secret) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

#[post("/auth/register")]
pub async fn register(
    form: web::Json<RegisterForm>,
    pool: web::Data<DbPool>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselUserRepository::new(&pool);
    let registration = Registration {
        username: form.username,
        email: form.email,
        password: form.password,
        full_name: form.full_name,
    };

    match auth_service::register(&repo, registration, &server_config.secret) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => error_response(&e),
    }
}

#[post("/auth/recover-password")]
pub async fn recover_password(
    form: web::Json<RecoverPasswordForm>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselUserRepository::new(&pool);

    // The answer is the same whether or not the email exists.
    match auth_service::recover_password(&repo, &form.email) {
        Ok(_) => HttpResponse::Ok().json(json!({
            "message": "if the email is registered, recovery instructions have been issued"
        })),
        Err(e) => error_response(&e),
    }
}

#[post("/auth/reset-password")]
pub async fn reset_password(
    form: web::Json<ResetPasswordForm>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselUserRepository::new(&pool);

    match auth_service::reset_password(&repo, &form.token, &form.new_password) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "password reset" })),
        Err(e) => error_response(&e),
    }
}

#[post("/auth/change-password")]
pub async fn change_password(
    form: web::Json<ChangePasswordForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselUserRepository::new(&pool);

    match auth_service::change_password(
        &repo,
        user.user_id,
        &form.current_password,
        &form.new_password,
    ) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "password changed" })),
        Err(e) => error_response(&e),
    }
}

#[get("/auth/profile")]
pub async fn profile(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselUserRepository::new(&pool);

    match auth_service::get_profile(&repo, user.user_id) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => error_response(&e),
    }
}
