//! Enrollment of the signed-in person: which events they belong to, and the
//! management roles they hold on events (published to the session context for
//! permission checks).

use std::sync::Arc;

use eventra_admin_types::{roles, EventoId, EventoRolHint, EventoRolPersona};
use parking_lot::RwLock;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{session::SessionContext, transport::ApiTransport};

#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    evento_id: EventoId,
}

#[derive(Debug, Default)]
struct EnrollmentState {
    eventos: Vec<EventoId>,
    loaded: bool,
}

/// State container for the signed-in person's event memberships.
pub struct EnrollmentStore {
    transport: Arc<ApiTransport>,
    session: Arc<SessionContext>,
    state: RwLock<EnrollmentState>,
    /// Serializes first loads so concurrent callers produce one round trip.
    load_gate: Mutex<()>,
}

impl EnrollmentStore {
    pub(crate) fn new(transport: Arc<ApiTransport>, session: Arc<SessionContext>) -> Self {
        Self {
            transport,
            session,
            state: RwLock::new(EnrollmentState::default()),
            load_gate: Mutex::new(()),
        }
    }

    /// Loads the enrolled-event list once; later calls are no-ops until
    /// [`Self::reload`].
    ///
    /// Failures are silent: membership checks degrade to `false` rather than
    /// blocking the caller.
    pub async fn load(&self) {
        if self.state.read().loaded {
            return;
        }
        let _gate = self.load_gate.lock().await;
        // Another caller may have finished the load while we waited.
        if self.state.read().loaded {
            return;
        }
        self.fetch().await;
    }

    /// Forces a refetch of the enrolled-event list.
    pub async fn reload(&self) {
        let _gate = self.load_gate.lock().await;
        self.fetch().await;
    }

    async fn fetch(&self) {
        let result = self
            .transport
            .get_json::<Vec<EnrollmentRow>>("evento-rol-persona/eventos-por-persona", true)
            .await;

        let mut state = self.state.write();
        match result {
            Ok(rows) => {
                state.eventos = rows.into_iter().map(|r| r.evento_id).collect();
                state.loaded = true;
            },
            Err(err) => {
                tracing::warn!(error = %err, "loading enrolled events failed");
                state.eventos = Vec::new();
                state.loaded = false;
            },
        }
    }

    /// True when the signed-in person is enrolled in the event.
    #[must_use]
    pub fn is_enrolled(&self, event_id: EventoId) -> bool {
        self.state.read().eventos.contains(&event_id)
    }

    /// Enrolled event ids.
    #[must_use]
    pub fn eventos(&self) -> Vec<EventoId> {
        self.state.read().eventos.clone()
    }

    /// True once a load has completed successfully.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// Loads the signed-in person's active management roles per event and
    /// publishes them to the session context.
    ///
    /// Only live assignments whose role name is a management role count; rows
    /// missing an event or role id are skipped.
    pub async fn load_event_roles(&self) -> bool {
        let Some(identity) = self.session.identity() else {
            return false;
        };

        let result = self
            .transport
            .get_json::<Vec<EventoRolPersona>>("evento-rol-persona/detalles", true)
            .await;

        match result {
            Ok(rows) => {
                let hints: Vec<EventoRolHint> = rows
                    .into_iter()
                    .filter(|row| {
                        !row.estado_borrado
                            && row.persona_id == Some(identity.persona_id)
                            && row
                                .rol
                                .as_deref()
                                .is_some_and(|name| roles::ROLES_GESTION.contains(&name))
                    })
                    .filter_map(|row| {
                        Some(EventoRolHint { evento_id: row.evento_id?, rol_id: row.rol_id? })
                    })
                    .collect();
                self.session.set_event_roles(hints);
                true
            },
            Err(err) => {
                tracing::warn!(error = %err, "loading event roles failed");
                false
            },
        }
    }
}
