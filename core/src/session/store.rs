//! Single owner of the logged-in identity.
//!
//! All mutation goes through `SessionStore`. Writes land in durable storage
//! first, then in memory, then listeners are told. Responses that belong to a
//! superseded request are dropped instead of overwriting newer state.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::storage::{
    SessionStorage, AUTHENTICATED_KEY, AVATAR_KEY, SESSION_KEYS, TOKEN_KEY, USERNAME_KEY,
};
use super::types::{CommitOutcome, Credentials, LoginGrant, RequestTicket, Session, Subscription};
use crate::config::ClientConfig;
use crate::error::ClientError;

type Listener = Rc<dyn Fn(&Session)>;

struct StoreState {
    session: Session,
    generation: u64,
    rng: SmallRng,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

struct StoreInner {
    storage: Rc<dyn SessionStorage>,
    fallback_avatars: Vec<String>,
    state: RefCell<StoreState>,
}

/// Cheap to clone; every clone is the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// Build an empty store. `seed` drives the fallback-avatar pick.
    pub fn new(storage: Rc<dyn SessionStorage>, fallback_avatars: Vec<String>, seed: u64) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                storage,
                fallback_avatars,
                state: RefCell::new(StoreState {
                    session: Session::empty(),
                    generation: 0,
                    rng: SmallRng::seed_from_u64(seed),
                    listeners: Vec::new(),
                    next_listener_id: 0,
                }),
            }),
        }
    }

    /// Build a store from config and load whatever session was persisted.
    pub fn open(
        storage: Rc<dyn SessionStorage>,
        config: &ClientConfig,
        seed: u64,
    ) -> Result<Self, ClientError> {
        let store = Self::new(storage, config.fallback_avatars.clone(), seed);
        store.restore()?;
        Ok(store)
    }

    pub fn session(&self) -> Session {
        self.inner.state.borrow().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().session.is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().session.token().map(str::to_string)
    }

    /// Load the persisted triple. A partial triple is treated as corruption:
    /// the session comes back empty and the stray keys are removed.
    pub fn restore(&self) -> Result<Session, ClientError> {
        let storage = &self.inner.storage;
        let flag = storage.get(AUTHENTICATED_KEY)?;
        let token = non_empty(storage.get(TOKEN_KEY)?);
        let username = non_empty(storage.get(USERNAME_KEY)?);
        let avatar_url = non_empty(storage.get(AVATAR_KEY)?);

        let restored = match (flag.as_deref(), token, username, avatar_url) {
            (Some("true"), Some(token), Some(username), Some(avatar_url)) => {
                info!("Restored session for {}", username);
                Session::authenticated(Credentials {
                    token,
                    username,
                    avatar_url,
                })
            }
            (None, None, None, None) => Session::empty(),
            _ => {
                warn!("Discarding partial session found in storage");
                for key in SESSION_KEYS {
                    if let Err(e) = storage.remove(key) {
                        warn!("Failed to remove stale key {}: {}", key, e);
                    }
                }
                Session::empty()
            }
        };

        self.replace(restored.clone());
        Ok(restored)
    }

    /// Start a session-producing request. Issuing a ticket invalidates every
    /// ticket issued before it.
    pub fn begin_request(&self) -> RequestTicket {
        let mut state = self.inner.state.borrow_mut();
        state.generation += 1;
        RequestTicket(state.generation)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.inner.state.borrow().generation == ticket.0
    }

    /// Persist a login as one unit. An empty avatar resolves to one of the
    /// fallback avatars, which is then stored like any other avatar.
    pub fn commit_login(
        &self,
        ticket: RequestTicket,
        grant: LoginGrant,
    ) -> Result<CommitOutcome, ClientError> {
        if !self.is_current(ticket) {
            debug!("Dropping login response for superseded request {}", ticket.0);
            return Ok(CommitOutcome::Superseded);
        }
        if grant.token.trim().is_empty() || grant.username.trim().is_empty() {
            return Err(ClientError::Decode(
                "login response is missing a token or username".into(),
            ));
        }

        let avatar_url = match grant.avatar_url.filter(|a| !a.trim().is_empty()) {
            Some(avatar) => avatar,
            None => self.pick_fallback_avatar(),
        };
        let credentials = Credentials {
            token: grant.token,
            username: grant.username,
            avatar_url,
        };

        self.write_all(&[
            (TOKEN_KEY, credentials.token.as_str()),
            (USERNAME_KEY, credentials.username.as_str()),
            (AVATAR_KEY, credentials.avatar_url.as_str()),
            (AUTHENTICATED_KEY, "true"),
        ])?;

        info!("Logged in as {}", credentials.username);
        self.replace(Session::authenticated(credentials));
        Ok(CommitOutcome::Applied)
    }

    /// Replace only the avatar of the current session.
    pub fn commit_avatar(
        &self,
        ticket: RequestTicket,
        avatar_url: &str,
    ) -> Result<CommitOutcome, ClientError> {
        if !self.is_current(ticket) {
            debug!("Dropping avatar response for superseded request {}", ticket.0);
            return Ok(CommitOutcome::Superseded);
        }
        let updated = match self.inner.state.borrow().session.with_avatar(avatar_url.to_string()) {
            Some(session) => session,
            None => {
                debug!("Ignoring avatar change without a session");
                return Ok(CommitOutcome::NoSession);
            }
        };

        self.inner.storage.set(AVATAR_KEY, avatar_url)?;
        info!("Updated avatar");
        self.replace(updated);
        Ok(CommitOutcome::Applied)
    }

    /// Forget the session everywhere. Safe to call when already logged out.
    ///
    /// Memory is cleared even if a storage removal fails; the first failure is
    /// returned after every key has been attempted.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.inner.state.borrow_mut().generation += 1;

        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.inner.storage.remove(key) {
                warn!("Failed to remove {} from storage: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        if self.is_authenticated() {
            info!("Session cleared");
            self.replace(Session::empty());
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Call `listener` with the new session after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> Subscription {
        let mut state = self.inner.state.borrow_mut();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push((id, Rc::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .state
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != subscription.0);
    }

    fn pick_fallback_avatar(&self) -> String {
        let avatars = &self.inner.fallback_avatars;
        if avatars.is_empty() {
            return String::new();
        }
        let index = self.inner.state.borrow_mut().rng.random_range(0..avatars.len());
        avatars[index].clone()
    }

    /// Write every pair or none of them. On failure each touched key goes
    /// back to the value it held before, so an older session survives intact.
    fn write_all(&self, pairs: &[(&str, &str)]) -> Result<(), ClientError> {
        let storage = &self.inner.storage;
        let prior = pairs
            .iter()
            .map(|(key, _)| storage.get(key).map(|value| (*key, value)))
            .collect::<Result<Vec<_>, _>>()?;

        for (written, (key, value)) in pairs.iter().enumerate() {
            if let Err(e) = storage.set(key, value) {
                warn!("Session write failed at {}: {}", key, e);
                for (rollback_key, previous) in &prior[..written] {
                    let restored = match previous {
                        Some(previous) => storage.set(rollback_key, previous),
                        None => storage.remove(rollback_key),
                    };
                    if let Err(rollback_err) = restored {
                        warn!("Rollback of {} failed: {}", rollback_key, rollback_err);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn replace(&self, session: Session) {
        let listeners: Vec<Listener> = {
            let mut state = self.inner.state.borrow_mut();
            if state.session == session {
                return;
            }
            state.session = session.clone();
            state.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(&session);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FALLBACK_AVATARS;
    use crate::session::storage::MemoryStorage;
    use std::cell::Cell;

    fn fallback() -> Vec<String> {
        DEFAULT_FALLBACK_AVATARS.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_store() -> (SessionStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()), fallback(), 7);
        (store, storage)
    }

    fn grant(avatar: Option<&str>) -> LoginGrant {
        LoginGrant {
            token: "jwt-1".into(),
            username: "ada".into(),
            avatar_url: avatar.map(str::to_string),
        }
    }

    /// Storage that rejects one write after `allowed` successful sets, then
    /// accepts writes again.
    struct FlakyStorage {
        inner: MemoryStorage,
        allowed: Cell<Option<usize>>,
    }

    impl SessionStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
            match self.allowed.get() {
                Some(0) => {
                    self.allowed.set(None);
                    return Err(ClientError::Storage("quota exceeded".into()));
                }
                Some(n) => self.allowed.set(Some(n - 1)),
                None => {}
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), ClientError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_restore_without_prior_session_is_empty() {
        let (store, _storage) = create_test_store();
        let session = store.restore().unwrap();
        assert!(!session.is_authenticated());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_commit_login_writes_all_keys() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        let outcome = store.commit_login(ticket, grant(Some("/u/ada.png"))).unwrap();

        assert_eq!(outcome, CommitOutcome::Applied);
        let snapshot = storage.snapshot();
        assert_eq!(snapshot.get(TOKEN_KEY).map(String::as_str), Some("jwt-1"));
        assert_eq!(snapshot.get(USERNAME_KEY).map(String::as_str), Some("ada"));
        assert_eq!(snapshot.get(AVATAR_KEY).map(String::as_str), Some("/u/ada.png"));
        assert_eq!(snapshot.get(AUTHENTICATED_KEY).map(String::as_str), Some("true"));
        assert_eq!(store.session().token(), Some("jwt-1"));
    }

    #[test]
    fn test_login_is_never_observed_partially() {
        let (store, _storage) = create_test_store();
        for i in 0..20 {
            let ticket = store.begin_request();
            let avatar = if i % 2 == 0 { None } else { Some("/x.png") };
            store.commit_login(ticket, grant(avatar)).unwrap();
            let session = store.session();
            assert_eq!(session.token().is_some(), session.username().is_some());
            assert_eq!(session.token().is_some(), session.avatar_url().is_some());
            if i % 3 == 0 {
                store.clear().unwrap();
                let session = store.session();
                assert!(session.token().is_none() && session.username().is_none());
                assert!(session.avatar_url().is_none());
            }
        }
    }

    #[test]
    fn test_empty_avatar_gets_stable_fallback() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        store.commit_login(ticket, grant(Some(""))).unwrap();

        let avatar = store.session().avatar_url().unwrap().to_string();
        assert!(DEFAULT_FALLBACK_AVATARS.contains(&avatar.as_str()));

        // Reload with a different seed: the stored fallback must not be re-rolled.
        for seed in 0..10 {
            let reloaded = SessionStore::new(Rc::new(storage.clone()), fallback(), seed);
            let session = reloaded.restore().unwrap();
            assert_eq!(session.avatar_url(), Some(avatar.as_str()));
        }
    }

    #[test]
    fn test_partial_storage_is_not_trusted() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "jwt-1").unwrap();
        storage.set(AUTHENTICATED_KEY, "true").unwrap();

        let store = SessionStore::new(Rc::new(storage.clone()), fallback(), 1);
        let session = store.restore().unwrap();

        assert!(!session.is_authenticated());
        assert!(storage.is_empty(), "stray keys should be removed: {:?}", storage.snapshot());
    }

    #[test]
    fn test_missing_flag_is_not_trusted() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "jwt-1").unwrap();
        storage.set(USERNAME_KEY, "ada").unwrap();
        storage.set(AVATAR_KEY, "/a.png").unwrap();

        let store = SessionStore::new(Rc::new(storage), fallback(), 1);
        assert!(!store.restore().unwrap().is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        store.commit_login(ticket, grant(None)).unwrap();

        store.clear().unwrap();
        let once = store.session();
        store.clear().unwrap();
        let twice = store.session();

        assert_eq!(once, twice);
        assert_eq!(twice, Session::empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_commit_avatar_touches_only_avatar() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        store.commit_login(ticket, grant(Some("/old.png"))).unwrap();

        let ticket = store.begin_request();
        let outcome = store.commit_avatar(ticket, "/new.png").unwrap();

        assert_eq!(outcome, CommitOutcome::Applied);
        let session = store.session();
        assert_eq!(session.token(), Some("jwt-1"));
        assert_eq!(session.username(), Some("ada"));
        assert_eq!(session.avatar_url(), Some("/new.png"));
        assert_eq!(storage.get(AVATAR_KEY).unwrap().as_deref(), Some("/new.png"));
    }

    #[test]
    fn test_commit_avatar_without_session_is_ignored() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        assert_eq!(
            store.commit_avatar(ticket, "/new.png").unwrap(),
            CommitOutcome::NoSession
        );
        assert!(storage.is_empty());
    }

    #[test]
    fn test_stale_login_is_discarded() {
        let (store, _storage) = create_test_store();
        let older = store.begin_request();
        let newer = store.begin_request();

        let newer_grant = LoginGrant {
            token: "jwt-new".into(),
            username: "grace".into(),
            avatar_url: Some("/grace.png".into()),
        };
        assert_eq!(store.commit_login(newer, newer_grant).unwrap(), CommitOutcome::Applied);
        assert_eq!(store.commit_login(older, grant(None)).unwrap(), CommitOutcome::Superseded);

        assert_eq!(store.session().username(), Some("grace"));
        assert_eq!(store.session().token(), Some("jwt-new"));
    }

    #[test]
    fn test_login_resolving_after_logout_is_discarded() {
        let (store, storage) = create_test_store();
        let ticket = store.begin_request();
        store.clear().unwrap();

        assert_eq!(store.commit_login(ticket, grant(None)).unwrap(), CommitOutcome::Superseded);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let flaky = Rc::new(FlakyStorage {
            inner: MemoryStorage::new(),
            allowed: Cell::new(Some(2)),
        });
        let store = SessionStore::new(flaky.clone(), fallback(), 3);
        let ticket = store.begin_request();

        let err = store.commit_login(ticket, grant(None)).unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert!(!store.is_authenticated());
        assert!(flaky.inner.is_empty(), "left behind: {:?}", flaky.inner.snapshot());
    }

    #[test]
    fn test_failed_relogin_keeps_previous_session_on_disk() {
        let flaky = Rc::new(FlakyStorage {
            inner: MemoryStorage::new(),
            allowed: Cell::new(None),
        });
        let store = SessionStore::new(flaky.clone(), fallback(), 3);
        let first = LoginGrant {
            token: "tA".into(),
            username: "a".into(),
            avatar_url: Some("/a.png".into()),
        };
        store.commit_login(store.begin_request(), first).unwrap();
        let before = flaky.inner.snapshot();

        flaky.allowed.set(Some(1));
        let second = LoginGrant {
            token: "tB".into(),
            username: "b".into(),
            avatar_url: None,
        };
        let err = store.commit_login(store.begin_request(), second).unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert_eq!(store.token().as_deref(), Some("tA"));
        assert_eq!(flaky.inner.snapshot(), before);

        let reloaded = SessionStore::new(flaky.clone(), fallback(), 3);
        assert_eq!(reloaded.restore().unwrap(), store.session());
        assert!(reloaded.is_authenticated());
    }

    #[test]
    fn test_listeners_see_every_change() {
        let (store, _storage) = create_test_store();
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |s| sink.borrow_mut().push(s.is_authenticated()));

        let ticket = store.begin_request();
        store.commit_login(ticket, grant(None)).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(*seen.borrow(), vec![true, false]);

        store.unsubscribe(sub);
        let ticket = store.begin_request();
        store.commit_login(ticket, grant(None)).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_listener_may_read_store() {
        let (store, _storage) = create_test_store();
        let reader = store.clone();
        let observed = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&observed);
        store.subscribe(move |_| *sink.borrow_mut() = reader.token());

        let ticket = store.begin_request();
        store.commit_login(ticket, grant(None)).unwrap();
        assert_eq!(observed.borrow().as_deref(), Some("jwt-1"));
    }
}
