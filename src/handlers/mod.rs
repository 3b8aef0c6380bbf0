//! HTTP request handlers
//!
//! Handlers stay thin. Session resolution and body validation happen here at
//! the boundary; everything else is delegated to the query builder, the Gmail
//! client, and the deletion driver. All errors convert to JSON bodies via
//! `ServiceError`.

pub mod auth;
pub mod delete;
pub mod demo;
pub mod labels;
pub mod search;

use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest};
use std::sync::Arc;

use crate::auth::{self as oauth, CredentialBundle, OAuthFlow};
use crate::client::ProductionGmailClient;
use crate::error::{Result, ServiceError};
use crate::session::{PendingAuthStore, SessionStore, SESSION_COOKIE};

/// Shared application state, injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub pending: Arc<PendingAuthStore>,
    pub oauth: Arc<OAuthFlow>,
    pub batch_size: usize,
}

impl AppState {
    pub fn new(oauth: OAuthFlow, batch_size: usize) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            pending: Arc::new(PendingAuthStore::new()),
            oauth: Arc::new(oauth),
            batch_size,
        }
    }
}

/// Register the service's route table
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/auth/status", web::get().to(auth::status))
        .route("/api/auth/start", web::get().to(auth::start))
        .route("/oauth2callback", web::get().to(auth::callback))
        .route("/api/auth/logout", web::get().to(auth::logout))
        .route("/api/labels", web::get().to(labels::list))
        .route("/api/search", web::post().to(search::search))
        .route("/api/delete", web::post().to(delete::delete))
        .route("/api/demo/run", web::post().to(demo::run));
}

/// Session id from the request cookie, if any
pub fn session_id(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Build the session cookie for a response
pub fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

/// Resolve the caller's credentials, refreshing an expired access token
///
/// An expired bundle without a refresh token is cleared; the caller must
/// restart the authorization flow.
pub async fn require_credentials(
    state: &AppState,
    req: &HttpRequest,
) -> Result<CredentialBundle> {
    let sid = session_id(req).ok_or(ServiceError::Unauthenticated)?;
    let bundle = state
        .sessions
        .get(&sid)
        .await
        .ok_or(ServiceError::Unauthenticated)?;

    if !bundle.is_expired() {
        return Ok(bundle);
    }

    if bundle.refresh_token.is_some() {
        let refreshed = state.oauth.refresh(&bundle).await?;
        state.sessions.put(sid, refreshed.clone()).await;
        Ok(refreshed)
    } else {
        state.sessions.clear(&sid).await;
        Err(ServiceError::Unauthenticated)
    }
}

/// Build a Gmail client for the given credentials
pub async fn gmail_client(bundle: &CredentialBundle) -> Result<ProductionGmailClient> {
    let hub = oauth::hub_for_token(&bundle.access_token).await?;
    Ok(ProductionGmailClient::new(hub))
}
