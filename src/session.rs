//! In-memory session store.
//!
//! Sessions are opaque v4 tokens mapped to an identity snapshot taken at
//! login. The store is injected into handlers as app data; nothing reads
//! ambient global state. Entries expire after the configured TTL and are
//! dropped lazily on the next lookup.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "clinisys_session";

/// Identity fields captured when a session is established.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id_usuario: i64,
    pub usuario: String,
    pub rol: String,
    pub id_persona: Option<i64>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
}

struct Entry {
    user: CurrentUser,
    expires_at: DateTime<Utc>,
}

pub struct Sessions {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl Sessions {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Store an identity and return the fresh token for it.
    pub fn insert(&self, user: CurrentUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.entries.insert(
            token.clone(),
            Entry {
                user,
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Look up a token, evicting it when past its expiry.
    pub fn get(&self, token: &str) -> Option<CurrentUser> {
        let expired = match self.entries.get(token) {
            Some(entry) => {
                if entry.expires_at > Utc::now() {
                    return Some(entry.user.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(token);
        }
        None
    }

    pub fn destroy(&self, token: &str) {
        self.entries.remove(token);
    }
}
