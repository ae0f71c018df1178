//! Server state and configuration.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::debounce_window;
use crate::pipeline::Pipeline;
use crate::session::{Debouncer, Session};

/// Idle time after which a session is dropped.
pub const SESSION_EXPIRATION_SECS: u64 = 30 * 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    /// Quiet window before a session edit is rendered
    pub debounce: Duration,
    /// Idle time before a session expires
    pub session_ttl: Duration,
    /// Generation settings for every request
    pub pipeline: Pipeline,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            debounce: debounce_window(),
            session_ttl: Duration::from_secs(SESSION_EXPIRATION_SECS),
            pipeline: Pipeline::default(),
        }
    }
}

/// A session plus its bookkeeping, guarded by one lock per document.
#[derive(Debug)]
pub struct SessionSlot {
    pub session: Session,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Instant,
}

impl SessionSlot {
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

pub type SharedSlot = Arc<Mutex<SessionSlot>>;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub started_at: DateTime<Utc>,
    pub sessions: RwLock<HashMap<Uuid, SharedSlot>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// A fresh session using the server's pipeline and debounce window.
    pub fn new_session(&self) -> Session {
        Session::new(self.config.pipeline.clone())
            .with_debouncer(Debouncer::new(self.config.debounce))
    }

    /// Register `session` and return its id.
    pub async fn insert(&self, session: Session) -> (Uuid, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let slot = SessionSlot {
            session,
            created_at,
            last_accessed: Instant::now(),
        };
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(slot)));
        (id, created_at)
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSlot> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop sessions idle for longer than the configured TTL. Sessions whose
    /// lock is held are in use and kept.
    pub async fn sweep(&self, now: Instant) -> usize {
        let ttl = self.config.session_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| match slot.try_lock() {
            Ok(slot) => now.saturating_duration_since(slot.last_accessed) < ttl,
            Err(_) => true,
        });
        before - sessions.len()
    }
}
