//! staffdesk entry-point: settings, badge poller, and the HTTP server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    AppSettings, IdentityServices, ServerConfig, build_count_source, build_identity_services,
    create_server,
};
use staffdesk::domain::{BadgePoller, PollerShutdown};
use staffdesk::inbound::http::health::HealthState;
use staffdesk::inbound::http::session_config::fingerprint::key_fingerprint;
use staffdesk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use staffdesk::inbound::http::state::HttpState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|error| std::io::Error::other(format!("failed to load settings: {error}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mode = BuildMode::from_debug_assertions();
    let session =
        session_settings_from_env(&DefaultEnv::new(), mode).map_err(std::io::Error::other)?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let IdentityServices { login, principals } = build_identity_services(&settings, mode)?;
    let (poller, badges) = BadgePoller::new(
        build_count_source(&settings)?,
        settings.badge_poll_interval(),
    );
    let shutdown = PollerShutdown::new();
    let poller_task = tokio::spawn(poller.run(shutdown.subscribe()));

    let http_state = HttpState::new(login, principals, badges);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::from_session(session, bind_addr),
    )?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    shutdown.signal();
    if let Err(error) = poller_task.await {
        warn!(%error, "badge poller ended abnormally");
    }
    outcome
}
