//! Cookie session wrapper.
//!
//! Handlers only persist, read, or purge the signed-in principal's id; the
//! Actix session API stays behind this type.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, PrincipalId};

pub(crate) const PRINCIPAL_ID_KEY: &str = "principal_id";

/// Newtype exposing principal-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in principal's id, renewing the session key.
    pub fn persist_principal(&self, id: &PrincipalId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PRINCIPAL_ID_KEY, id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Principal id stored in the cookie, if any.
    ///
    /// A blank or undecodable id is treated as no session.
    pub fn principal_id(&self) -> Result<Option<PrincipalId>, Error> {
        let raw = self
            .0
            .get::<String>(PRINCIPAL_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match PrincipalId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "invalid principal id in session cookie");
                None
            }
        }))
    }

    /// Principal id, or `401 Unauthorized` when nobody is signed in.
    pub fn require_principal_id(&self) -> Result<PrincipalId, Error> {
        self.principal_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn persist(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = PrincipalId::new("3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e03").expect("fixture id");
        session.persist_principal(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn read(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_principal_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn purge(session: SessionContext) -> HttpResponse {
        session.purge();
        HttpResponse::NoContent().finish()
    }

    #[actix_web::test]
    async fn round_trips_principal_id() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/set", web::get().to(persist))
                .route("/get", web::get().to(read)),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "3f1c2a9e-1b7d-4f0e-9a51-6a2b8c1d0e03");
    }

    #[actix_web::test]
    async fn missing_principal_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/get", web::get().to(read)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_principal_id_reads_as_signed_out() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-blank",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(PRINCIPAL_ID_KEY, "   ")
                            .expect("insert blank id");
                        HttpResponse::Ok().finish()
                    }),
                )
                .route("/get", web::get().to(read)),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-blank").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn purge_expires_the_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/set", web::get().to(persist))
                .route("/purge", web::get().to(purge)),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let purge_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/purge").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(purge_res.status(), StatusCode::NO_CONTENT);
        let removal = session_cookie(&purge_res).expect("removal cookie set");
        assert!(removal.value().is_empty());
    }
}
