//! In-memory session-keyed credential storage and pending OAuth state

use oauth2::PkceCodeVerifier;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::CredentialBundle;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sid";

/// Generate a fresh session identifier
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Explicit store for per-session credential bundles
///
/// Credentials live only in memory and only for the lifetime of the process;
/// there is no persistence and no ambient global state.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, CredentialBundle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, session_id: &str) -> Option<CredentialBundle> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned()
    }

    pub async fn put(&self, session_id: String, bundle: CredentialBundle) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, bundle);
    }

    pub async fn clear(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
    }
}

/// Pending authorization state: CSRF state token to PKCE verifier
///
/// Retrieval is one-shot; a state token cannot be replayed.
#[derive(Default)]
pub struct PendingAuthStore {
    pending: Mutex<HashMap<String, PkceCodeVerifier>>,
}

impl PendingAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, state: String, verifier: PkceCodeVerifier) {
        let mut pending = self.pending.lock().await;
        pending.insert(state, verifier);
    }

    pub async fn take(&self, state: &str) -> Option<PkceCodeVerifier> {
        let mut pending = self.pending.lock().await;
        pending.remove(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(token: &str) -> CredentialBundle {
        CredentialBundle {
            access_token: token.to_string(),
            refresh_token: None,
            expires_at: None,
            scopes: vec![],
        }
    }

    #[tokio::test]
    async fn test_put_get_clear() {
        let store = SessionStore::new();
        let sid = new_session_id();

        assert!(store.get(&sid).await.is_none());

        store.put(sid.clone(), bundle("tok-1")).await;
        assert_eq!(store.get(&sid).await.unwrap().access_token, "tok-1");

        // Put replaces the existing bundle
        store.put(sid.clone(), bundle("tok-2")).await;
        assert_eq!(store.get(&sid).await.unwrap().access_token, "tok-2");

        store.clear(&sid).await;
        assert!(store.get(&sid).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.put("a".to_string(), bundle("tok-a")).await;
        store.put("b".to_string(), bundle("tok-b")).await;

        store.clear("a").await;
        assert!(store.get("a").await.is_none());
        assert_eq!(store.get("b").await.unwrap().access_token, "tok-b");
    }

    #[tokio::test]
    async fn test_pending_auth_is_one_shot() {
        let store = PendingAuthStore::new();
        store
            .insert(
                "state-1".to_string(),
                PkceCodeVerifier::new("verifier".to_string()),
            )
            .await;

        assert!(store.take("state-1").await.is_some());
        assert!(store.take("state-1").await.is_none());
        assert!(store.take("unknown").await.is_none());
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
