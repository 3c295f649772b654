use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::db::DbPool;
use crate::dto::person::CpfExistsResponse;
use crate::forms::person::{CreatePersonForm, UpdatePersonForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE};
use crate::repository::person::DieselPersonRepository;
use crate::routes::{error_response, validation_failed};
use crate::services::person::{self as person_service, ListPersonsParams};

#[derive(Debug, Deserialize)]
struct ListQueryParams {
    page: Option<usize>,
    per_page: Option<usize>,
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CpfExistsParams {
    exclude_id: Option<i32>,
}

#[get("/persons")]
pub async fn list_persons(
    params: web::Query<ListQueryParams>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    if page < 1 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "page must be greater than zero" }));
    }
    if per_page < 1 || per_page > MAX_ITEMS_PER_PAGE {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "per_page must be between 1 and 100" }));
    }

    let repo = DieselPersonRepository::new(&pool);
    let list_params = ListPersonsParams {
        page,
        per_page,
        filter: params.filter,
    };

    match person_service::list_persons(&repo, list_params) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

#[get("/persons/{id}")]
pub async fn get_person(
    person_id: web::Path<i32>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselPersonRepository::new(&pool);

    match person_service::get_person(&repo, person_id.into_inner()) {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => error_response(&e),
    }
}

#[get("/persons/cpf/{cpf}")]
pub async fn get_person_by_cpf(
    cpf: web::Path<String>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselPersonRepository::new(&pool);

    match person_service::get_person_by_cpf(&repo, &cpf) {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => error_response(&e),
    }
}

#[get("/persons/cpf/{cpf}/exists")]
pub async fn cpf_exists(
    cpf: web::Path<String>,
    params: web::Query<CpfExistsParams>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselPersonRepository::new(&pool);

    match person_service::cpf_exists(&repo, &cpf, params.exclude_id) {
        Ok(exists) => HttpResponse::Ok().json(CpfExistsResponse { exists }),
        Err(e) => error_response(&e),
    }
}

#[post("/persons")]
pub async fn create_person(
    form: web::Json<CreatePersonForm>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselPersonRepository::new(&pool);

    match person_service::create_person(&repo, form.into()) {
        Ok(person) => HttpResponse::Created().json(person),
        Err(e) => error_response(&e),
    }
}

#[put("/persons/{id}")]
pub async fn update_person(
    person_id: web::Path<i32>,
    form: web::Json<UpdatePersonForm>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return validation_failed(&errors);
    }

    let repo = DieselPersonRepository::new(&pool);

    match person_service::update_person(&repo, person_id.into_inner(), form.into()) {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(e) => error_response(&e),
    }
}

#[delete("/persons/{id}")]
pub async fn delete_person(
    person_id: web::Path<i32>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselPersonRepository::new(&pool);

    match person_service::delete_person(&repo, person_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}
