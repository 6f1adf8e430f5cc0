//! Session-scoped result state
//!
//! The dashboard remembers the last analysis result per browser session so
//! the results panel survives a page reload. Sessions are identified by a
//! UUID issued on first use and echoed back by the client. In-memory only,
//! no expiry.

use crate::view::ResultView;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory map of session id to last result
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, ResultView>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the given session id, or issue a fresh one
    pub fn ensure(&self, session: Option<Uuid>) -> Uuid {
        session.unwrap_or_else(Uuid::new_v4)
    }

    /// Store the session's last result
    pub fn store(&self, session: Uuid, result: ResultView) {
        self.inner.lock().unwrap().insert(session, result);
    }

    /// Fetch the session's last result, if any
    pub fn get(&self, session: Uuid) -> Option<ResultView> {
        self.inner.lock().unwrap().get(&session).cloned()
    }
}
