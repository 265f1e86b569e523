//! Regression coverage for sign-in handlers.

use super::*;
use crate::domain::ports::{FixturePrincipalDirectory, MockLoginService};
use crate::domain::{BadgePollerHandle, BadgeSnapshot, PrincipalId};
use crate::inbound::http::test_utils::{fixture_state, login_request, session_cookie, test_app};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

#[rstest]
#[case("", "password", "username must not be empty", "username", "empty_username")]
#[case("jdoe", "", "password must not be empty", "password", "empty_password")]
#[actix_web::test]
async fn blank_fields_are_rejected_with_details(
    #[case] username: &str,
    #[case] password: &str,
    #[case] message: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(test_app(fixture_state())).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request();

    let res = test::call_service(&app, request).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
    assert_eq!(body["details"], json!({"field": field, "code": code}));
}

#[actix_web::test]
async fn wrong_password_is_unauthorised() {
    let app = test::init_service(test_app(fixture_state())).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": "jdoe", "password": "hunter2"}))
        .to_request();

    let res = test::call_service(&app, request).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
}

#[actix_web::test]
async fn login_then_current_user_returns_the_principal() {
    let app = test::init_service(test_app(fixture_state())).await;

    let login_res = test::call_service(&app, login_request("carla").to_request()).await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res).expect("session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "carla");
    assert_eq!(body["role"], "employee");
    assert_eq!(body["hasCrmAccess"], true);
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let app = test::init_service(test_app(fixture_state())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/user").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = test::init_service(test_app(fixture_state())).await;
    let login_res = test::call_service(&app, login_request("jdoe").to_request()).await;
    let cookie = session_cookie(&login_res).expect("session cookie");

    let logout_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&logout_res).expect("removal cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn sessions_for_vanished_principals_read_as_signed_out() {
    let mut login_svc = MockLoginService::new();
    login_svc
        .expect_authenticate()
        .returning(|_| Ok(PrincipalId::new("retired-0001").expect("id")));
    let state = HttpState::new(
        Arc::new(login_svc),
        Arc::new(FixturePrincipalDirectory::default()),
        BadgePollerHandle::detached(BadgeSnapshot::empty()),
    );
    let app = test::init_service(test_app(state)).await;

    let res = test::call_service(&app, login_request("ghost").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
