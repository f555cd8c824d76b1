//! Session context and persisted local state.
//!
//! The session context is an explicit dependency: constructed once at client
//! startup from a [`SessionStorage`] implementation and passed by `Arc` to
//! the transport, the stores and the permission evaluator. Nothing in the SDK
//! reads credentials from hidden process-wide state.
//!
//! Persisted local state mirrors what the admin UI keeps between visits:
//! the bearer `token`, the serialized `user` identity, and optionally the
//! `eventos` role hints used by permission checks. None of it is assumed
//! fresh; stores re-load what they need explicitly.

use std::path::PathBuf;
use std::sync::Arc;

use eventra_admin_types::{EventoRolHint, Identity};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use snafu::Location;

use crate::error::{ApiError, Result};

/// The session fields written to persistent storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Bearer credential.
    pub token: String,
    /// Authenticated identity.
    pub user: Identity,
    /// Cached event-role hints for permission checks.
    #[serde(default)]
    pub eventos: Vec<EventoRolHint>,
}

/// Storage backend for persisted session state.
pub trait SessionStorage: Send + Sync {
    /// Loads the persisted session, if any.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Persists the session, replacing any previous one.
    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Removes any persisted session.
    fn clear(&self) -> Result<()>;
}

/// File-backed session storage (one JSON document).
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates storage backed by the given file path. The file is created on
    /// first save; parent directories must already exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ApiError::Storage {
                    message: format!("read {}: {err}", self.path.display()),
                    location: Location::default(),
                });
            },
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // A corrupt session file means "not logged in", not a crash.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable persisted session"
                );
                Ok(None)
            },
        }
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        let json = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, json).map_err(|err| ApiError::Storage {
            message: format!("write {}: {err}", self.path.display()),
            location: Location::default(),
        })
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApiError::Storage {
                message: format!("remove {}: {err}", self.path.display()),
                location: Location::default(),
            }),
        }
    }
}

/// In-memory session storage for tests and ephemeral processes.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    inner: RwLock<Option<PersistedSession>>,
}

impl MemorySessionStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a session, as if a login already
    /// happened.
    #[must_use]
    pub fn with_session(session: PersistedSession) -> Self {
        Self { inner: RwLock::new(Some(session)) }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.inner.read().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.inner.write() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write() = None;
        Ok(())
    }
}

/// Mutable session fields, guarded together.
#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    identity: Option<Identity>,
    event_roles: Vec<EventoRolHint>,
}

/// The current authenticated identity and credential.
///
/// Read by every store through the transport; replaced only by
/// [`login`](SessionContext::login) / [`logout`](SessionContext::logout).
pub struct SessionContext {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionContext")
            .field("authenticated", &state.token.is_some())
            .field("identity", &state.identity)
            .finish()
    }
}

impl SessionContext {
    /// Builds the context from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage itself fails; an absent or
    /// unreadable session yields an unauthenticated context.
    pub fn from_storage(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let state = match storage.load()? {
            Some(persisted) => SessionState {
                token: Some(persisted.token),
                identity: Some(persisted.user),
                event_roles: persisted.eventos,
            },
            None => SessionState::default(),
        };
        Ok(Self { state: RwLock::new(state), storage })
    }

    /// Returns the bearer token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    /// Returns the authenticated identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity.clone()
    }

    /// Returns a snapshot of the cached event-role hints.
    #[must_use]
    pub fn event_roles(&self) -> Vec<EventoRolHint> {
        self.state.read().event_roles.clone()
    }

    /// Returns true when a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    /// Replaces the session after a successful authentication and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error when the new session cannot be persisted; the
    /// in-memory context is updated regardless.
    pub fn login(&self, token: impl Into<String>, identity: Identity) -> Result<()> {
        let token = token.into();
        {
            let mut state = self.state.write();
            state.token = Some(token.clone());
            state.identity = Some(identity.clone());
            state.event_roles.clear();
        }
        self.storage.save(&PersistedSession { token, user: identity, eventos: Vec::new() })
    }

    /// Clears the session and its persisted copy.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted copy cannot be removed.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            *state = SessionState::default();
        }
        self.storage.clear()
    }

    /// Publishes freshly loaded event-role hints and persists them alongside
    /// the session.
    pub fn set_event_roles(&self, hints: Vec<EventoRolHint>) {
        let persisted = {
            let mut state = self.state.write();
            state.event_roles = hints;
            match (&state.token, &state.identity) {
                (Some(token), Some(identity)) => Some(PersistedSession {
                    token: token.clone(),
                    user: identity.clone(),
                    eventos: state.event_roles.clone(),
                }),
                _ => None,
            }
        };

        if let Some(persisted) = persisted {
            if let Err(err) = self.storage.save(&persisted) {
                tracing::warn!(error = %err, "failed to persist event-role hints");
            }
        }
    }
}
