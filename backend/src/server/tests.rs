//! Regression coverage for server bootstrap.

use super::*;
use actix_web::cookie::Key;
use rstest::{fixture, rstest};
use staffdesk::domain::ports::{FixtureLoginService, FixturePrincipalDirectory};
use staffdesk::domain::{BadgePollerHandle, BadgeSnapshot, LoginCredentials};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn http_state() -> HttpState {
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(FixturePrincipalDirectory::default()),
        BadgePollerHandle::detached(BadgeSnapshot::empty()),
    )
}

#[fixture]
fn config() -> ServerConfig {
    let bind_addr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(Key::generate(), false, SameSite::Lax, bind_addr)
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), http_state, config).expect("server binds");

    assert!(health_state.is_ready(), "binding should mark readiness");
}

#[rstest]
fn fixture_counts_without_a_base_url() {
    let settings = AppSettings::default();
    assert!(build_count_source(&settings).is_ok());
}

#[rstest]
fn malformed_base_url_is_rejected() {
    let settings = AppSettings {
        counts_base_url: Some("not a url".to_owned()),
        ..AppSettings::default()
    };
    assert!(build_count_source(&settings).is_err());
}

#[rstest]
fn release_builds_require_an_identity_service() {
    let error = build_identity_services(&AppSettings::default(), BuildMode::Release)
        .err()
        .expect("release without identity service must fail");
    assert!(error.to_string().contains("STAFFDESK_PRINCIPALS_BASE_URL"));
}

#[rstest]
#[actix_rt::test]
async fn debug_builds_fall_back_to_fixture_principals() {
    let services = build_identity_services(&AppSettings::default(), BuildMode::Debug)
        .expect("debug fixtures");
    let credentials = LoginCredentials::try_from_parts("jdoe", "password").expect("creds");
    assert!(services.login.authenticate(&credentials).await.is_ok());
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn configured_identity_service_is_used_in_every_mode(#[case] mode: BuildMode) {
    let settings = AppSettings {
        principals_base_url: Some("https://idp.example.test/".to_owned()),
        ..AppSettings::default()
    };
    assert!(build_identity_services(&settings, mode).is_ok());
}

#[rstest]
fn malformed_principals_url_is_rejected() {
    let settings = AppSettings {
        principals_base_url: Some("not a url".to_owned()),
        ..AppSettings::default()
    };
    assert!(build_identity_services(&settings, BuildMode::Debug).is_err());
}

#[rstest]
#[actix_rt::test]
async fn spawned_app_serves_probes_and_api(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
) {
    health_state.mark_ready();
    let app = actix_web::test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }))
    .await;

    let ready_res = actix_web::test::call_service(
        &app,
        actix_web::test::TestRequest::get()
            .uri("/health/ready")
            .to_request(),
    )
    .await;
    assert_eq!(ready_res.status(), actix_web::http::StatusCode::OK);

    let guard = actix_web::test::call_service(
        &app,
        actix_web::test::TestRequest::get()
            .uri("/api/v1/route-guard?path=/employees")
            .to_request(),
    )
    .await;
    assert_eq!(guard.status(), actix_web::http::StatusCode::OK);
    assert!(guard.headers().contains_key("trace-id"));
}
