//! Client facade wiring configuration, session, transport and stores.

use std::sync::Arc;

use eventra_admin_types::Identity;

use crate::{
    config::ClientConfig,
    error::Result,
    permissions::PermissionEvaluator,
    session::{MemorySessionStorage, SessionContext, SessionStorage},
    stores::{
        EnrollmentStore, EventStore, EventUserStore, GlobalUserStore, ProjectStore, TemplateStore,
    },
    transport::ApiTransport,
};

/// Entry point to the admin API.
///
/// Owns one session context, one transport and one instance of each store.
/// Every store method takes `&self`, so the client can be shared behind an
/// [`Arc`] across tasks.
pub struct AdminClient {
    session: Arc<SessionContext>,
    transport: Arc<ApiTransport>,
    permissions: PermissionEvaluator,
    events: EventStore,
    event_users: EventUserStore,
    global_users: GlobalUserStore,
    projects: ProjectStore,
    templates: TemplateStore,
    enrollment: EnrollmentStore,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient").field("transport", &self.transport).finish()
    }
}

impl AdminClient {
    /// Creates a client with in-memory session storage.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemorySessionStorage::new()))
    }

    /// Creates a client restoring any persisted session from `storage`.
    ///
    /// # Errors
    ///
    /// Fails if the stored session cannot be read or the HTTP client cannot
    /// be built.
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let session = Arc::new(SessionContext::from_storage(storage)?);
        let transport = Arc::new(ApiTransport::new(&config, Arc::clone(&session))?);

        tracing::info!(base_url = config.base_url(), "admin client ready");

        Ok(Self {
            permissions: PermissionEvaluator::new(Arc::clone(&session)),
            events: EventStore::new(Arc::clone(&transport)),
            event_users: EventUserStore::new(Arc::clone(&transport)),
            global_users: GlobalUserStore::new(Arc::clone(&transport)),
            projects: ProjectStore::new(Arc::clone(&transport)),
            templates: TemplateStore::new(Arc::clone(&transport)),
            enrollment: EnrollmentStore::new(Arc::clone(&transport), Arc::clone(&session)),
            session,
            transport,
        })
    }

    /// Installs a session token and identity, persisting them to storage.
    ///
    /// # Errors
    ///
    /// Fails if the session cannot be persisted.
    pub fn login(&self, token: impl Into<String>, identity: Identity) -> Result<()> {
        self.session.login(token, identity)
    }

    /// Clears the session and every per-event cache.
    ///
    /// # Errors
    ///
    /// Fails if the persisted session cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.projects.clear();
        self.templates.clear();
        self.session.logout()
    }

    /// The session context.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Permission checks against the current session.
    #[must_use]
    pub fn permissions(&self) -> &PermissionEvaluator {
        &self.permissions
    }

    /// Event listing and detail store.
    #[must_use]
    pub fn events(&self) -> &EventStore {
        &self.events
    }

    /// Event participant store.
    #[must_use]
    pub fn event_users(&self) -> &EventUserStore {
        &self.event_users
    }

    /// Platform user store.
    #[must_use]
    pub fn global_users(&self) -> &GlobalUserStore {
        &self.global_users
    }

    /// Per-event project store.
    #[must_use]
    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// Per-event evaluation-template store.
    #[must_use]
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Enrollment store for the signed-in person.
    #[must_use]
    pub fn enrollment(&self) -> &EnrollmentStore {
        &self.enrollment
    }
}
