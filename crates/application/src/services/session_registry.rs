//! Per-session location contexts
//!
//! Each conversation gets its own [`LocationContext`]; sessions never share
//! one, so concurrent conversations cannot see each other's locations.
//! The registry is bounded: past capacity the least recently used session
//! is evicted and its context cleared.

use std::collections::HashMap;
use std::sync::Arc;

use domain::SessionId;
use parking_lot::RwLock;
use tracing::debug;

use super::LocationContext;

/// Default number of live sessions kept
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug)]
struct SessionEntry {
    context: Arc<LocationContext>,
    last_accessed: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<SessionId, SessionEntry>,
    /// Logical clock; bumped on every access
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Registry of live sessions and their location contexts
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<Sessions>,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry {
    /// Create an empty registry holding up to [`DEFAULT_MAX_SESSIONS`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry holding up to `max_sessions` (at least one)
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Maximum number of live sessions
    pub const fn capacity(&self) -> usize {
        self.max_sessions
    }

    /// Start a new session with an empty context
    pub fn open_session(&self) -> SessionId {
        let id = SessionId::new();
        let mut sessions = self.sessions.write();
        let last_accessed = sessions.tick();
        sessions.entries.insert(
            id,
            SessionEntry {
                context: Arc::new(LocationContext::new()),
                last_accessed,
            },
        );
        self.evict_if_needed(&mut sessions);
        debug!(session_id = %id, "Session opened");
        id
    }

    /// Context of a session, creating it on first use
    pub fn context(&self, id: SessionId) -> Arc<LocationContext> {
        let mut sessions = self.sessions.write();
        let now = sessions.tick();

        if let Some(entry) = sessions.entries.get_mut(&id) {
            entry.last_accessed = now;
            return Arc::clone(&entry.context);
        }

        let context = Arc::new(LocationContext::new());
        sessions.entries.insert(
            id,
            SessionEntry {
                context: Arc::clone(&context),
                last_accessed: now,
            },
        );
        self.evict_if_needed(&mut sessions);
        context
    }

    /// End a session, clearing its context
    ///
    /// Returns `false` if the session was not known.
    pub fn end_session(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().entries.remove(&id);
        match removed {
            Some(entry) => {
                entry.context.clear();
                debug!(session_id = %id, "Session ended");
                true
            },
            None => false,
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().entries.len()
    }

    /// Whether there are no live sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.read().entries.is_empty()
    }

    fn evict_if_needed(&self, sessions: &mut Sessions) {
        while sessions.entries.len() > self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(id, _)| *id);

            let Some(id) = oldest else { break };
            if let Some(entry) = sessions.entries.remove(&id) {
                entry.context.clear();
                debug!(session_id = %id, "Evicted least recently used session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Coordinates, Location};

    fn berlin() -> Location {
        Location::new(
            "Berlin",
            "Germany",
            "Land Berlin",
            Coordinates::new(52.52, 13.41).expect("valid"),
        )
    }

    #[test]
    fn sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.open_session();
        let b = registry.open_session();

        registry.context(a).set(berlin());

        assert_eq!(registry.context(a).get(), Some(berlin()));
        assert!(registry.context(b).get().is_none());
    }

    #[test]
    fn context_is_stable_per_session() {
        let registry = SessionRegistry::new();
        let id = SessionId::new();
        let first = registry.context(id);
        let second = registry.context(id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn end_session_clears_and_removes() {
        let registry = SessionRegistry::new();
        let id = registry.open_session();
        let ctx = registry.context(id);
        ctx.set(berlin());

        assert!(registry.end_session(id));
        assert!(ctx.get().is_none());
        assert!(registry.is_empty());
        assert!(!registry.end_session(id));
    }

    #[test]
    fn end_unknown_session() {
        let registry = SessionRegistry::new();
        assert!(!registry.end_session(SessionId::new()));
    }

    #[test]
    fn default_capacity() {
        assert_eq!(SessionRegistry::new().capacity(), DEFAULT_MAX_SESSIONS);
        assert_eq!(SessionRegistry::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn never_grows_past_capacity() {
        let registry = SessionRegistry::with_capacity(100);
        for _ in 0..10_000 {
            registry.context(SessionId::new());
        }
        assert_eq!(registry.len(), 100);
    }

    #[test]
    fn evicts_least_recently_used() {
        let registry = SessionRegistry::with_capacity(2);
        let a = registry.open_session();
        let b = registry.open_session();
        let evicted_ctx = registry.context(b);
        evicted_ctx.set(berlin());

        // Touch `a` so `b` becomes the oldest.
        registry.context(a);
        let c = registry.open_session();

        assert_eq!(registry.len(), 2);
        assert!(evicted_ctx.get().is_none());
        assert!(!registry.end_session(b));
        assert!(registry.end_session(a));
        assert!(registry.end_session(c));
    }

    #[test]
    fn evicted_session_starts_fresh_on_return() {
        let registry = SessionRegistry::with_capacity(1);
        let a = SessionId::new();
        registry.context(a).set(berlin());

        registry.context(SessionId::new());

        assert!(registry.context(a).get().is_none());
        assert_eq!(registry.len(), 1);
    }
}
