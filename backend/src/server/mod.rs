//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::AppSettings;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use staffdesk::ApiDoc;
use staffdesk::Trace;
use staffdesk::domain::ports::{
    FixtureLoginService, FixtureNotificationCountSource, FixturePrincipalDirectory, LoginService,
    NotificationCountSource, PrincipalDirectory,
};
use staffdesk::inbound::http::configure_api;
use staffdesk::inbound::http::health::{HealthState, live, ready};
use staffdesk::inbound::http::session_config::BuildMode;
use staffdesk::inbound::http::state::HttpState;
use staffdesk::outbound::notification_counts::HttpNotificationCountSource;
use staffdesk::outbound::principals::HttpPrincipalDirectory;

const SESSION_TTL_HOURS: i64 = 8;

/// Count source for the configured base URL, or the fixture when unset.
///
/// # Errors
/// Returns [`std::io::Error`] when the settings are malformed or the HTTP
/// client cannot be built.
pub fn build_count_source(
    settings: &AppSettings,
) -> std::io::Result<Arc<dyn NotificationCountSource>> {
    let base = settings.counts_base_url().map_err(std::io::Error::other)?;
    match base {
        Some(base) => {
            info!(base = %base, "polling notification counts over HTTP");
            let source = HttpNotificationCountSource::new(&base, settings.counts_timeout())
                .map_err(std::io::Error::other)?;
            Ok(Arc::new(source))
        }
        None => {
            info!("no counts base URL configured; using fixture counts");
            Ok(Arc::new(FixtureNotificationCountSource::default()))
        }
    }
}

/// Sign-in and principal lookup, backed by the same identity source.
pub struct IdentityServices {
    pub login: Arc<dyn LoginService>,
    pub principals: Arc<dyn PrincipalDirectory>,
}

/// Identity services for the configured base URL.
///
/// Without a base URL, debug builds fall back to the fixture principals;
/// release builds refuse to start.
///
/// # Errors
/// Returns [`std::io::Error`] when the settings are malformed, the HTTP
/// client cannot be built, or a release build has no identity service.
pub fn build_identity_services(
    settings: &AppSettings,
    mode: BuildMode,
) -> std::io::Result<IdentityServices> {
    let base = settings
        .principals_base_url()
        .map_err(std::io::Error::other)?;
    match (base, mode) {
        (Some(base), _) => {
            info!(base = %base, "resolving principals over HTTP");
            let directory = Arc::new(
                HttpPrincipalDirectory::new(&base, settings.principals_timeout())
                    .map_err(std::io::Error::other)?,
            );
            Ok(IdentityServices {
                login: directory.clone(),
                principals: directory,
            })
        }
        (None, BuildMode::Debug) => {
            warn!("no principals base URL configured; fixture principals accept sign-in");
            Ok(IdentityServices {
                login: Arc::new(FixtureLoginService),
                principals: Arc::new(FixturePrincipalDirectory::default()),
            })
        }
        (None, BuildMode::Release) => Err(std::io::Error::other(
            "STAFFDESK_PRINCIPALS_BASE_URL must be set in release builds",
        )),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and flip readiness.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests;
