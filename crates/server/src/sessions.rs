use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use botanica_core::catalog::Catalog;
use botanica_core::config::SessionConfig;
use botanica_core::shell::{
    PresentationShell, ShellEvent, ShellSnapshot, ShellTransitionError, TransitionOutcome,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} does not exist")]
    UnknownSession(Uuid),
    #[error(transparent)]
    Transition(#[from] ShellTransitionError),
}

struct SessionEntry {
    shell: PresentationShell,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, idle_ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) > idle_ttl
    }
}

/// Listing shells keyed by session id. Cloning shares the same store.
///
/// Sessions idle for longer than `idle_ttl` are evicted lazily: on creation,
/// and when an expired id is looked up. At `max_sessions` the least recently
/// used session makes room for a new one.
#[derive(Clone)]
pub struct SessionStore {
    shells: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        let limits = SessionConfig::default();
        Self::with_limits(limits.idle_ttl(), limits.max_sessions)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            shells: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn create(&self, catalog: &Catalog) -> (Uuid, ShellSnapshot) {
        let session_id = Uuid::new_v4();
        let shell = PresentationShell::new(catalog);
        let snapshot = shell.snapshot();
        let now = Instant::now();

        let mut shells = self.shells.write().await;
        self.evict_idle_locked(&mut shells, now);
        if shells.len() >= self.max_sessions {
            let oldest = shells
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(session_id, _)| *session_id);
            if let Some(oldest) = oldest {
                shells.remove(&oldest);
                info!(
                    event_name = "storefront.session.evicted",
                    correlation_id = %oldest,
                    session_id = %oldest,
                    reason = "capacity",
                    "listing session evicted"
                );
            }
        }
        shells.insert(session_id, SessionEntry { shell, last_seen: now });
        drop(shells);

        info!(
            event_name = "storefront.session.created",
            correlation_id = %session_id,
            session_id = %session_id,
            "listing session created"
        );
        (session_id, snapshot)
    }

    pub async fn snapshot(&self, session_id: Uuid) -> Result<ShellSnapshot, SessionError> {
        let mut shells = self.shells.write().await;
        let entry = self.live_entry(&mut shells, session_id, Instant::now())?;
        Ok(entry.shell.snapshot())
    }

    /// Applies one event; the session is left untouched when the event is rejected.
    pub async fn apply(
        &self,
        session_id: Uuid,
        catalog: &Catalog,
        event: ShellEvent,
    ) -> Result<(TransitionOutcome, ShellSnapshot), SessionError> {
        let mut shells = self.shells.write().await;
        let entry = self.live_entry(&mut shells, session_id, Instant::now())?;

        let mut next = entry.shell.clone();
        let outcome = next.apply(catalog, event)?;
        let snapshot = next.snapshot();
        entry.shell = next;

        info!(
            event_name = "storefront.session.transition",
            correlation_id = %session_id,
            session_id = %session_id,
            from = ?outcome.from,
            to = ?outcome.to,
            effects = outcome.effects.len(),
            "listing session transition applied"
        );
        Ok((outcome, snapshot))
    }

    pub async fn remove(&self, session_id: Uuid) -> bool {
        let removed = self.shells.write().await.remove(&session_id).is_some();
        if removed {
            info!(
                event_name = "storefront.session.closed",
                correlation_id = %session_id,
                session_id = %session_id,
                "listing session closed"
            );
        }
        removed
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.shells.read().await.len()
    }

    /// Looks up a session that has not idled out and marks it as seen.
    fn live_entry<'a>(
        &self,
        shells: &'a mut HashMap<Uuid, SessionEntry>,
        session_id: Uuid,
        now: Instant,
    ) -> Result<&'a mut SessionEntry, SessionError> {
        let expired = shells
            .get(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?
            .is_idle(now, self.idle_ttl);
        if expired {
            shells.remove(&session_id);
            info!(
                event_name = "storefront.session.evicted",
                correlation_id = %session_id,
                session_id = %session_id,
                reason = "idle",
                "listing session evicted"
            );
            return Err(SessionError::UnknownSession(session_id));
        }

        let entry = shells.get_mut(&session_id).ok_or(SessionError::UnknownSession(session_id))?;
        entry.last_seen = now;
        Ok(entry)
    }

    fn evict_idle_locked(&self, shells: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
        let before = shells.len();
        shells.retain(|_, entry| !entry.is_idle(now, self.idle_ttl));
        let evicted = before - shells.len();
        if evicted > 0 {
            info!(
                event_name = "storefront.session.evicted",
                correlation_id = "session-sweep",
                evicted,
                reason = "idle",
                "idle listing sessions evicted"
            );
        }
    }
}
