use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{types::Token, utils};

/// Server-side storage of OAuth tokens keyed by browser session id.
///
/// A session id only appears here once the OAuth callback stored a token
/// for it. Entries are dropped on logout only; a session that never logs
/// out keeps its token until the process exits. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    tokens: Arc<Mutex<HashMap<String, Token>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh, unused session id.
    pub fn new_session_id(&self) -> String {
        utils::generate_session_id()
    }

    pub async fn token(&self, session_id: &str) -> Option<Token> {
        self.tokens.lock().await.get(session_id).cloned()
    }

    pub async fn store_token(&self, session_id: &str, token: Token) {
        self.tokens
            .lock()
            .await
            .insert(session_id.to_string(), token);
    }

    /// Forgets everything held for the session.
    pub async fn clear(&self, session_id: &str) {
        self.tokens.lock().await.remove(session_id);
    }
}
