use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use hex::encode as hex_encode;
use rand::RngCore;

use crate::config::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_SECS};
use crate::models::{CredentialTable, FlashMessage, User};
use crate::services::error::AuthError;
use crate::services::session::Session;

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex_encode(b)
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// In-memory registry of page sessions keyed by the session cookie.
///
/// Sessions idle for longer than `idle_timeout` are dropped, and once
/// `max_sessions` are held the least recently seen one makes room for a new
/// login. Cloning shares the underlying maps.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    flash_store: Arc<Mutex<HashMap<String, Vec<FlashMessage>>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(
            Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            DEFAULT_MAX_SESSIONS,
        )
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            flash_store: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Looks up the session's user and marks the session as seen.
    pub fn current_user(&self, sid: &str) -> Option<User> {
        let now = Instant::now();
        let mut sessions = lock(&self.sessions);
        let expired = self.prune_idle(&mut sessions, now);
        let user = sessions.get_mut(sid).and_then(|entry| {
            entry.last_seen = now;
            entry.session.current_user().cloned()
        });
        drop(sessions);
        self.drop_flash(&expired);
        user
    }

    /// Authenticates and opens a fresh session, returning its id.
    ///
    /// A previously presented session id is retired on success. On failure
    /// no session is created, changed or removed.
    pub fn login(
        &self,
        previous_sid: Option<&str>,
        table: &CredentialTable,
        email: &str,
        password: &str,
    ) -> Result<(String, User), AuthError> {
        let mut session = Session::new();
        if !session.login(table, email, password) {
            return Err(AuthError::InvalidCredentials);
        }
        let user = session
            .current_user()
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        let now = Instant::now();
        let sid = random_session_id();
        let mut sessions = lock(&self.sessions);
        let mut dropped = self.prune_idle(&mut sessions, now);
        if let Some(old) = previous_sid {
            sessions.remove(old);
            dropped.push(old.to_string());
        }
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    dropped.push(id);
                }
                None => break,
            }
        }
        sessions.insert(
            sid.clone(),
            SessionEntry {
                session,
                last_seen: now,
            },
        );
        drop(sessions);

        self.drop_flash(&dropped);
        Ok((sid, user))
    }

    /// Drops the session and its pending notifications. Unknown ids are ignored.
    pub fn logout(&self, sid: &str) -> Option<User> {
        let removed = lock(&self.sessions).remove(sid).and_then(|mut entry| {
            let user = entry.session.current_user().cloned();
            entry.session.logout();
            user
        });
        lock(&self.flash_store).remove(sid);
        removed
    }

    pub fn push_flash(&self, sid: &str, message: FlashMessage) {
        lock(&self.flash_store)
            .entry(sid.to_string())
            .or_default()
            .push(message);
    }

    pub fn take_flash(&self, sid: &str) -> Vec<FlashMessage> {
        lock(&self.flash_store).remove(sid).unwrap_or_default()
    }

    pub fn active_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }

    fn prune_idle(&self, sessions: &mut HashMap<String, SessionEntry>, now: Instant) -> Vec<String> {
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, entry)| now.saturating_duration_since(entry.last_seen) > self.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "Dropped idle sessions");
        }
        expired
    }

    fn drop_flash(&self, sids: &[String]) {
        if sids.is_empty() {
            return;
        }
        let mut flash = lock(&self.flash_store);
        for sid in sids {
            flash.remove(sid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SHARED_PASSWORD};

    #[test]
    fn session_ids_are_random_hex() {
        let a = random_session_id();
        let b = random_session_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn login_then_lookup() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let (sid, user) = store
            .login(None, &table, "atharv@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert_eq!(user.role, Role::ProductionManager);
        assert_eq!(store.current_user(&sid), Some(user));
        assert_eq!(store.active_sessions(), 1);
    }

    #[test]
    fn failed_login_creates_nothing() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let err = store
            .login(None, &table, "atharv@gmail.com", "00000")
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.active_sessions(), 0);
    }

    #[test]
    fn failed_login_keeps_presented_session() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let (sid, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert!(store.login(Some(&sid), &table, "harsh@gmail.com", "bad").is_err());
        assert_eq!(
            store.current_user(&sid).map(|u| u.role),
            Some(Role::Supervisor)
        );
    }

    #[test]
    fn relogin_retires_previous_session() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let (first, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        let (second, user) = store
            .login(Some(&first), &table, "parikshit@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert_ne!(first, second);
        assert!(store.current_user(&first).is_none());
        assert_eq!(user.role, Role::Operator);
        assert_eq!(store.active_sessions(), 1);
    }

    #[test]
    fn logout_clears_session_and_flash() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let (sid, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        store.push_flash(&sid, FlashMessage::success("Login successful", "Welcome!"));

        assert!(store.logout(&sid).is_some());
        assert!(store.current_user(&sid).is_none());
        assert!(store.take_flash(&sid).is_empty());
        assert!(store.logout(&sid).is_none());
        assert!(store.logout("never-issued").is_none());
    }

    #[test]
    fn flash_messages_drain_once() {
        let store = SessionStore::new();
        store.push_flash("sid", FlashMessage::success("a", "b"));
        store.push_flash("sid", FlashMessage::error("c", "d"));
        let taken = store.take_flash("sid");
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].title, "c");
        assert!(store.take_flash("sid").is_empty());
    }

    #[test]
    fn idle_sessions_are_reclaimed() {
        let store = SessionStore::with_limits(Duration::from_millis(20), 16);
        let table = CredentialTable::builtin();
        let (abandoned, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        store.push_flash(&abandoned, FlashMessage::success("Login successful", "Welcome!"));
        std::thread::sleep(Duration::from_millis(60));

        let (fresh, _) = store
            .login(None, &table, "parikshit@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert_eq!(store.active_sessions(), 1);
        assert!(store.current_user(&abandoned).is_none());
        assert!(store.take_flash(&abandoned).is_empty());
        assert!(store.current_user(&fresh).is_some());
    }

    #[test]
    fn lookups_keep_sessions_alive() {
        let store = SessionStore::with_limits(Duration::from_millis(250), 16);
        let table = CredentialTable::builtin();
        let (sid, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        for _ in 0..4 {
            std::thread::sleep(Duration::from_millis(100));
            assert!(store.current_user(&sid).is_some());
        }
    }

    #[test]
    fn abandoned_logins_do_not_grow_without_bound() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        for _ in 0..5000 {
            store
                .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
                .unwrap();
        }
        assert!(store.active_sessions() <= DEFAULT_MAX_SESSIONS);
        assert!(store.active_sessions() < 5000);
    }

    #[test]
    fn full_store_evicts_least_recently_seen() {
        let store = SessionStore::with_limits(Duration::from_secs(3600), 2);
        let table = CredentialTable::builtin();
        let (first, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let (second, _) = store
            .login(None, &table, "atharv@gmail.com", SHARED_PASSWORD)
            .unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(store.current_user(&first).is_some());
        std::thread::sleep(Duration::from_millis(5));

        let (third, _) = store
            .login(None, &table, "parikshit@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert_eq!(store.active_sessions(), 2);
        assert!(store.current_user(&second).is_none());
        assert!(store.current_user(&first).is_some());
        assert!(store.current_user(&third).is_some());
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let store = SessionStore::new();
        let table = CredentialTable::builtin();
        let (sid, _) = store
            .login(None, &table, "harsh@gmail.com", SHARED_PASSWORD)
            .unwrap();

        let shared = store.clone();
        let result = std::thread::spawn(move || {
            let _guard = shared.sessions.lock().unwrap();
            panic!("panic while holding the session map");
        })
        .join();
        assert!(result.is_err());
        assert!(store.sessions.is_poisoned());

        assert_eq!(
            store.current_user(&sid).map(|u| u.role),
            Some(Role::Supervisor)
        );
        let (other, user) = store
            .login(None, &table, "parikshit@gmail.com", SHARED_PASSWORD)
            .unwrap();
        assert_eq!(user.role, Role::Operator);
        assert!(store.logout(&sid).is_some());
        assert!(store.current_user(&sid).is_none());
        assert!(store.current_user(&other).is_some());
    }
}
