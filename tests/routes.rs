use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use serde_json::json;

use cadastro_pessoas::models::config::ServerConfig;
use cadastro_pessoas::routes::configure_api;

mod common;

fn test_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: "unused-in-tests".to_string(),
        secret: "route-test-secret".to_string(),
    }
}

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.pool().clone()))
                .app_data(web::Data::new(test_config()))
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    };
}

/// Registers a fresh account and returns its bearer token.
macro_rules! register_user {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "operator",
                "email": "operator@example.com",
                "password": "secret-password",
                "full_name": "Registry Operator"
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["token"].as_str().expect("token in response").to_string()
    }};
}

#[actix_web::test]
async fn person_routes_require_authentication() {
    let test_db = common::TestDb::new("routes_require_authentication.db");
    let app = init_app!(&test_db);

    let req = test::TestRequest::get().uri("/api/v1/persons").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/persons")
        .insert_header((AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn register_login_and_profile_flow() {
    let test_db = common::TestDb::new("routes_register_login_profile.db");
    let app = init_app!(&test_db);

    let token = register_user!(&app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["username"], "operator");
    assert!(profile.get("password_hash").is_none());

    // login works with the email as well as the username
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "login": "operator@example.com", "password": "secret-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "login": "operator", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // duplicate registration is rejected
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "operator",
            "email": "other@example.com",
            "password": "secret-password",
            "full_name": "Someone Else"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn person_crud_flow() {
    let test_db = common::TestDb::new("routes_person_crud_flow.db");
    let app = init_app!(&test_db);
    let token = register_user!(&app);
    let bearer = format!("Bearer {token}");

    let req = test::TestRequest::post()
        .uri("/api/v1/persons")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .set_json(json!({
            "name": "Alice Example",
            "sex": "F",
            "email": "alice@example.com",
            "birth_date": "1990-05-01",
            "birthplace": "Recife",
            "nationality": "Brasileira",
            "cpf": "224.420.014-03"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let person_id = created["id"].as_i64().unwrap();
    assert_eq!(created["cpf"], "224.420.014-03");
    assert!(created["age"].as_i64().unwrap() >= 35);

    // same CPF again conflicts
    let req = test::TestRequest::post()
        .uri("/api/v1/persons")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .set_json(json!({
            "name": "Alice Clone",
            "birth_date": "1990-05-01",
            "cpf": "22442001403"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/persons/{person_id}"))
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // lookup accepts the display form in the path
    let req = test::TestRequest::get()
        .uri("/api/v1/persons/cpf/224.420.014-03")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"].as_i64().unwrap(), person_id);

    let req = test::TestRequest::get()
        .uri("/api/v1/persons/cpf/22442001403/exists")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["exists"], true);

    // excluding the record itself reports no other holder
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/persons/cpf/22442001403/exists?exclude_id={person_id}"
        ))
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["exists"], false);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/persons/{person_id}"))
        .insert_header((AUTHORIZATION, bearer.clone()))
        .set_json(json!({ "name": "Alice Updated" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["name"], "Alice Updated");
    assert_eq!(updated["email"], "alice@example.com");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/persons/{person_id}"))
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/persons/{person_id}"))
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // the CPF is free again after the soft delete
    let req = test::TestRequest::post()
        .uri("/api/v1/persons")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .set_json(json!({
            "name": "Alice Reborn",
            "birth_date": "1990-05-01",
            "cpf": "22442001403"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn listing_rejects_out_of_range_paging() {
    let test_db = common::TestDb::new("routes_listing_paging_bounds.db");
    let app = init_app!(&test_db);
    let token = register_user!(&app);
    let bearer = format!("Bearer {token}");

    let req = test::TestRequest::get()
        .uri("/api/v1/persons?page=0")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/persons?per_page=101")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/persons?page=7&per_page=100&filter=nobody")
        .insert_header((AUTHORIZATION, bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_pages"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn create_rejects_invalid_cpf() {
    let test_db = common::TestDb::new("routes_create_invalid_cpf.db");
    let app = init_app!(&test_db);
    let token = register_user!(&app);

    let req = test::TestRequest::post()
        .uri("/api/v1/persons")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({
            "name": "Bad Checksum",
            "birth_date": "1990-05-01",
            "cpf": "12345678901"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
