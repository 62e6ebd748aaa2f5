use anyhow::Result;
use std::sync::Mutex;
use tracing::debug;

use crate::storage::TokenStore;

type Listener = Box<dyn Fn(bool) + Send + Sync>;

/// Holds the current auth token and its derived login status. The token is
/// read once from the backing store at construction and written back on
/// every mutation; `is_logged_in` is always computed from the token, never
/// cached on its own.
pub struct SessionStore {
    token: Mutex<Option<String>>,
    storage: Box<dyn TokenStore>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn TokenStore>) -> Result<Self> {
        let token = storage.load()?;
        Ok(Self {
            token: Mutex::new(token),
            storage,
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    /// Persist first, then swap the in-memory value under the lock: a reader
    /// sees either the previous token or the fully committed new one. On a
    /// persistence failure the in-memory token is left untouched.
    pub fn set_token(&self, token: Option<String>) -> Result<()> {
        let logged_in = {
            let mut current = self.token.lock().unwrap();
            self.storage.save(token.as_deref())?;
            *current = token;
            current.is_some()
        };

        debug!(
            "session token {}",
            if logged_in { "set" } else { "cleared" }
        );

        for listener in self.listeners.lock().unwrap().iter() {
            listener(logged_in);
        }
        Ok(())
    }

    /// Register a change listener; it receives the new login status after
    /// every committed mutation.
    pub fn subscribe(&self, listener: impl Fn(bool) + Send + Sync + 'static) {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }
}
