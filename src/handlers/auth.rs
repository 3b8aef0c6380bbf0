//! Authentication endpoints: status, start, OAuth callback, logout

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, ServiceError};
use crate::models::{AuthStartResponse, AuthStatusResponse, LogoutResponse};

use super::{session_cookie, session_id, AppState};

/// `GET /api/auth/status`
pub async fn status(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let authenticated = match session_id(&req) {
        Some(sid) => state.sessions.get(&sid).await.is_some(),
        None => false,
    };

    HttpResponse::Ok().json(AuthStatusResponse { authenticated })
}

/// `GET /api/auth/start`
///
/// Allocates a session when the caller has none, records the pending PKCE
/// verifier under the CSRF state, and hands back the authorization URL.
pub async fn start(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let sid = session_id(&req).unwrap_or_else(crate::session::new_session_id);

    let (auth_url, csrf_state, verifier) = state.oauth.authorize_url();
    state.pending.insert(csrf_state, verifier).await;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&sid))
        .json(AuthStartResponse { auth_url }))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// `GET /oauth2callback`
///
/// Exchanges the authorization code and stores the credential bundle under
/// the caller's session. The response is a small landing page the browser
/// shows before the user returns to the app.
pub async fn callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse> {
    if let Some(error) = &query.error {
        return Err(ServiceError::InvalidInput(format!(
            "Authorization failed: {}",
            error
        )));
    }

    let csrf_state = query
        .state
        .as_deref()
        .ok_or_else(|| ServiceError::InvalidInput("Missing state parameter".to_string()))?;
    let code = query
        .code
        .clone()
        .ok_or_else(|| ServiceError::InvalidInput("Missing authorization code".to_string()))?;

    let verifier = state
        .pending
        .take(csrf_state)
        .await
        .ok_or_else(|| ServiceError::InvalidInput("Invalid state parameter".to_string()))?;

    let bundle = state.oauth.exchange_code(code, verifier).await?;

    let sid = session_id(&req).unwrap_or_else(crate::session::new_session_id);
    state.sessions.put(sid.clone(), bundle).await;
    info!("Session authenticated");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&sid))
        .content_type("text/html; charset=utf-8")
        .body(
            r#"<!DOCTYPE html>
<html>
<head><title>Gmail Connected</title></head>
<body>
    <h1>Authentication successful</h1>
    <p>You can close this window and return to the app.</p>
    <script>
        setTimeout(() => window.close(), 2000);
    </script>
</body>
</html>
"#,
        ))
}

/// `GET /api/auth/logout`
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(sid) = session_id(&req) {
        state.sessions.clear(&sid).await;
    }

    HttpResponse::Ok().json(LogoutResponse { success: true })
}
