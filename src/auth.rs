//! OAuth2 authentication management for Gmail API
//!
//! The browser handshake (authorization URL, code exchange, refresh) runs on
//! the `oauth2` crate; Gmail API calls run on a hub authenticated with the
//! session's access token.

use chrono::{DateTime, Duration, Utc};
use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Result, ServiceError};

/// Gmail API scope required for search and move-to-trash
///
/// gmail.modify grants read/write access without permanent deletion, which is
/// exactly the surface this service exposes.
pub const REQUIRED_SCOPES: &[&str] = &["https://www.googleapis.com/auth/gmail.modify"];

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Access tokens within this margin of expiry are treated as expired
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub =
    Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// Token material held for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
}

impl CredentialBundle {
    /// Whether the access token is expired (or about to expire)
    ///
    /// Bundles without expiry information never report expired; the provider
    /// rejects a stale token and that surfaces as a provider error.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }
}

/// OAuth2 authorization-code flow against Google's endpoints
pub struct OAuthFlow {
    client: BasicClient,
}

impl OAuthFlow {
    pub fn new(client_id: &str, client_secret: Option<&str>, redirect_uri: &str) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(client_id.to_string()),
            client_secret.map(|s| ClientSecret::new(s.to_string())),
            AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                .map_err(|e| ServiceError::ConfigError(format!("Invalid auth URL: {}", e)))?,
            Some(
                TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
                    .map_err(|e| ServiceError::ConfigError(format!("Invalid token URL: {}", e)))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(redirect_uri.to_string())
                .map_err(|e| ServiceError::ConfigError(format!("Invalid redirect URI: {}", e)))?,
        );

        Ok(Self { client })
    }

    /// Build the flow from environment variables
    ///
    /// OAuth client secrets are never stored in code or config files.
    ///
    /// # Environment Variables
    /// - `GMAIL_CLIENT_ID`: OAuth2 client ID
    /// - `GMAIL_CLIENT_SECRET`: OAuth2 client secret
    /// - `GMAIL_REDIRECT_URI`: Redirect URI (optional, defaults to
    ///   `http://localhost:8080/oauth2callback`)
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("GMAIL_CLIENT_ID")
            .map_err(|_| ServiceError::ConfigError("GMAIL_CLIENT_ID not set".to_string()))?;
        let client_secret = env::var("GMAIL_CLIENT_SECRET")
            .map_err(|_| ServiceError::ConfigError("GMAIL_CLIENT_SECRET not set".to_string()))?;
        let redirect_uri = env::var("GMAIL_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/oauth2callback".to_string());

        Self::new(&client_id, Some(&client_secret), &redirect_uri)
    }

    /// Produce an authorization URL with PKCE and offline access
    ///
    /// Returns the URL, the CSRF state to correlate the callback, and the
    /// PKCE verifier to present at code exchange.
    pub fn authorize_url(&self) -> (String, String, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge)
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent");

        for scope in REQUIRED_SCOPES {
            request = request.add_scope(Scope::new((*scope).to_string()));
        }

        let (auth_url, csrf_token) = request.url();

        (auth_url.to_string(), csrf_token.secret().clone(), pkce_verifier)
    }

    /// Exchange an authorization code for a credential bundle
    pub async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<CredentialBundle> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(|e| ServiceError::AuthError(format!("Token exchange failed: {}", e)))?;

        Ok(bundle_from_token_response(&token, None))
    }

    /// Refresh an expired bundle, preserving its refresh token
    pub async fn refresh(&self, bundle: &CredentialBundle) -> Result<CredentialBundle> {
        let refresh_token = bundle
            .refresh_token
            .as_ref()
            .ok_or(ServiceError::Unauthenticated)?;

        let token = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(|e| ServiceError::AuthError(format!("Token refresh failed: {}", e)))?;

        Ok(bundle_from_token_response(
            &token,
            bundle.refresh_token.clone(),
        ))
    }
}

/// Convert a token response into a credential bundle
///
/// Google omits the refresh token on refresh responses; `fallback_refresh`
/// carries the previously issued one forward.
fn bundle_from_token_response(
    token: &BasicTokenResponse,
    fallback_refresh: Option<String>,
) -> CredentialBundle {
    let refresh_token = token
        .refresh_token()
        .map(|t| t.secret().clone())
        .or(fallback_refresh);

    let expires_at = token
        .expires_in()
        .and_then(|d| Duration::from_std(d).ok())
        .map(|d| Utc::now() + d);

    let scopes = token
        .scopes()
        .map(|s| s.iter().map(|scope| scope.to_string()).collect())
        .unwrap_or_else(|| REQUIRED_SCOPES.iter().map(|s| s.to_string()).collect());

    CredentialBundle {
        access_token: token.access_token().secret().clone(),
        refresh_token,
        expires_at,
        scopes,
    }
}

/// Build a Gmail API hub from a session access token
///
/// Uses an HTTP/1 client with TLS, matching what google-gmail1 works best
/// with.
pub async fn hub_for_token(access_token: &str) -> Result<GmailHub> {
    let auth = yup_oauth2::AccessTokenAuthenticator::builder(access_token.to_string())
        .build()
        .await
        .map_err(|e| ServiceError::AuthError(format!("Failed to build authenticator: {}", e)))?;

    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| ServiceError::AuthError(format!("Failed to load TLS roots: {}", e)))?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, auth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_flow() -> OAuthFlow {
        OAuthFlow::new(
            "test-client-id",
            Some("test-secret"),
            "http://localhost:8080/oauth2callback",
        )
        .unwrap()
    }

    #[test]
    fn test_authorize_url_carries_expected_params() {
        let flow = test_flow();
        let (url, state, _verifier) = flow.authorize_url();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth"));
        assert!(url.contains("client_id=test-client-id"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("code_challenge="));
        assert!(url.contains(&format!("state={}", state)));
        assert!(url.contains("gmail.modify"));
    }

    #[test]
    fn test_authorize_url_states_are_unique() {
        let flow = test_flow();
        let (_, state_a, _) = flow.authorize_url();
        let (_, state_b, _) = flow.authorize_url();
        assert_ne!(state_a, state_b);
    }

    #[test]
    fn test_bundle_expiry() {
        let expired = CredentialBundle {
            access_token: "tok".to_string(),
            refresh_token: None,
            expires_at: Some(Utc::now() - Duration::seconds(10)),
            scopes: vec![],
        };
        assert!(expired.is_expired());

        let nearly_expired = CredentialBundle {
            expires_at: Some(Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS / 2)),
            ..expired.clone()
        };
        assert!(nearly_expired.is_expired());

        let fresh = CredentialBundle {
            expires_at: Some(Utc::now() + Duration::seconds(3600)),
            ..expired.clone()
        };
        assert!(!fresh.is_expired());

        let no_expiry = CredentialBundle {
            expires_at: None,
            ..expired
        };
        assert!(!no_expiry.is_expired());
    }

    #[test]
    fn test_from_env() {
        env::remove_var("GMAIL_CLIENT_ID");
        env::remove_var("GMAIL_CLIENT_SECRET");
        env::remove_var("GMAIL_REDIRECT_URI");

        let result = OAuthFlow::from_env();
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));

        env::set_var("GMAIL_CLIENT_ID", "env-id");
        env::set_var("GMAIL_CLIENT_SECRET", "env-secret");

        let flow = OAuthFlow::from_env().unwrap();
        let (url, _, _) = flow.authorize_url();
        assert!(url.contains("client_id=env-id"));

        env::remove_var("GMAIL_CLIENT_ID");
        env::remove_var("GMAIL_CLIENT_SECRET");
    }

    #[test]
    fn test_scopes_constant() {
        assert_eq!(REQUIRED_SCOPES.len(), 1);
        assert!(REQUIRED_SCOPES.contains(&"https://www.googleapis.com/auth/gmail.modify"));
    }
}
