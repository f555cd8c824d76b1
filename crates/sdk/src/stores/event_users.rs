//! Event participant management: assignments, cédula lookup, soft-delete
//! toggles, and the event-scoped role catalog.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventra_admin_types::{
    AsignacionId, EventoId, EventoRolPersona, Persona, PersonaId, RecordStatus, RolEvento, RolId,
};
use parking_lot::RwLock;
use serde_json::json;

use crate::{
    error::ApiError,
    pagination::PageState,
    stores::{store_error, AUTH_TOKEN_MISSING},
    transport::{ApiTransport, Method},
};

/// Default page size for the assignment table.
const USERS_PER_PAGE: u32 = 10;

/// Message returned by the backend-constrained role delete.
const ROLE_IN_USE: &str = "El rol está asignado a una persona y no puede ser eliminado.";

#[derive(Debug)]
struct EventUserState {
    users: Vec<EventoRolPersona>,
    roles: Vec<RolEvento>,
    page: PageState,
    loading: bool,
    error: Option<String>,
}

impl Default for EventUserState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            roles: Vec::new(),
            page: PageState::new(USERS_PER_PAGE),
            loading: false,
            error: None,
        }
    }
}

/// State container for event participant assignments.
pub struct EventUserStore {
    transport: Arc<ApiTransport>,
    state: RwLock<EventUserState>,
    fetch_seq: AtomicU64,
}

impl EventUserStore {
    pub(crate) fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            state: RwLock::new(EventUserState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Assignment listing
    // ------------------------------------------------------------------

    /// Fetches the expanded assignment listing, recomputing each row's derived
    /// status. The full list is paginated client-side.
    pub async fn fetch_users(&self) -> bool {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self
            .transport
            .get_json::<Vec<EventoRolPersona>>("evento-rol-persona/detalles", true)
            .await;

        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "event-user fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(mut users) => {
                for user in &mut users {
                    user.refresh_status();
                }
                state.page.set_total_count(users.len() as u64);
                state.users = users;
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching event users failed");
                state.users = Vec::new();
                state.page.set_total_count(0);
                state.error =
                    store_error("Error al cargar los usuarios del evento", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    /// Looks up a person by cédula.
    ///
    /// A 200 with an empty list and a 404 both resolve to `None`; only the 404
    /// records a (specific) error message.
    pub async fn search_person_by_cedula(&self, cedula: &str) -> Option<Persona> {
        {
            let mut state = self.state.write();
            state.error = None;
        }

        let path = format!("persona/cedula/{cedula}");
        let result = self.transport.get_json::<Vec<Persona>>(&path, true).await;

        match result {
            Ok(mut people) => {
                if people.is_empty() { None } else { Some(people.remove(0)) }
            },
            Err(err) if err.is_not_found() => {
                self.state.write().error =
                    Some("Persona no encontrada con la cédula especificada.".to_owned());
                None
            },
            Err(err) => {
                tracing::error!(error = %err, "cedula lookup failed");
                self.state.write().error =
                    store_error("Error al buscar persona por cédula", AUTH_TOKEN_MISSING, &err);
                None
            },
        }
    }

    // ------------------------------------------------------------------
    // Soft-delete toggles
    // ------------------------------------------------------------------

    /// Soft-deletes an assignment, patching the row in place on success. No
    /// refetch.
    pub async fn deactivate_user(&self, id: AsignacionId) -> bool {
        let path = format!("evento-rol-persona/{}/borrar", id.value());
        match self.transport.send(Method::DELETE, &path, None).await {
            Ok(_) => {
                self.patch_user_flag(id, true);
                true
            },
            Err(err) => {
                self.record_error("Error al desactivar el usuario", &err);
                false
            },
        }
    }

    /// Reactivates a soft-deleted assignment, patching the row in place.
    pub async fn activate_user(&self, id: AsignacionId) -> bool {
        let path = format!("evento-rol-persona/{}/activar", id.value());
        match self.transport.send(Method::PATCH, &path, Some(json!({}))).await {
            Ok(_) => {
                self.patch_user_flag(id, false);
                true
            },
            Err(err) => {
                self.record_error("Error al activar el usuario", &err);
                false
            },
        }
    }

    fn patch_user_flag(&self, id: AsignacionId, borrado: bool) {
        let mut state = self.state.write();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
            user.estado_borrado = borrado;
            user.status = RecordStatus::from_borrado(borrado);
        }
    }

    // ------------------------------------------------------------------
    // Assignment writes
    // ------------------------------------------------------------------

    /// Creates a new assignment, then refetches the listing so denormalized
    /// columns come from the backend.
    pub async fn add_user_to_event(
        &self,
        persona_id: PersonaId,
        evento_id: EventoId,
        rol_id: RolId,
    ) -> bool {
        let body = json!({
            "persona_id": persona_id,
            "evento_id": evento_id,
            "rol_id": rol_id,
            "estado_borrado": false,
        });
        match self.transport.send(Method::POST, "evento-rol-persona", Some(body)).await {
            Ok(_) => {
                self.fetch_users().await;
                true
            },
            Err(err) => {
                self.record_error("Error al asignar usuario al evento", &err);
                false
            },
        }
    }

    /// Rewrites an assignment's person, event and role, then refetches.
    pub async fn edit_assignment(
        &self,
        id: AsignacionId,
        persona_id: PersonaId,
        evento_id: EventoId,
        rol_id: RolId,
    ) -> bool {
        let path = format!("evento-rol-persona/{}", id.value());
        let body = json!({ "persona_id": persona_id, "evento_id": evento_id, "rol_id": rol_id });
        match self.transport.send(Method::PUT, &path, Some(body)).await {
            Ok(_) => {
                self.fetch_users().await;
                true
            },
            Err(err) => {
                self.record_error("Error al actualizar la asignación", &err);
                false
            },
        }
    }

    // ------------------------------------------------------------------
    // Event-scoped role catalog
    // ------------------------------------------------------------------

    /// Fetches the event-scoped role catalog.
    pub async fn fetch_roles(&self) -> bool {
        let result = self.transport.get_json::<Vec<RolEvento>>("rolEvento", true).await;
        match result {
            Ok(roles) => {
                self.state.write().roles = roles;
                true
            },
            Err(err) => {
                self.record_error("Error al cargar roles", &err);
                false
            },
        }
    }

    /// Creates a role and appends the backend's record to the catalog.
    pub async fn create_role(&self, nombre: &str) -> bool {
        let body = json!({ "nombre": nombre });
        match self.transport.send(Method::POST, "rolEvento", Some(body)).await {
            Ok(value) => match serde_json::from_value::<RolEvento>(value) {
                Ok(role) => {
                    self.state.write().roles.push(role);
                    true
                },
                Err(err) => {
                    self.record_error("Error al crear rol", &ApiError::from(err));
                    false
                },
            },
            Err(err) => {
                self.record_error("Error al crear rol", &err);
                false
            },
        }
    }

    /// Renames a role, patching the catalog entry in place.
    pub async fn update_role(&self, id: RolId, nombre: &str) -> bool {
        let path = format!("rolEvento/{}", id.value());
        let body = json!({ "nombre": nombre });
        match self.transport.send(Method::PUT, &path, Some(body)).await {
            Ok(_) => {
                let mut state = self.state.write();
                if let Some(role) = state.roles.iter_mut().find(|r| r.id == id) {
                    role.nombre = nombre.to_owned();
                }
                true
            },
            Err(err) => {
                self.record_error("Error al actualizar rol", &err);
                false
            },
        }
    }

    /// Deletes a role. The backend refuses with a 500 when the role is still
    /// assigned; that case gets its own message.
    pub async fn delete_role(&self, id: RolId) -> bool {
        let path = format!("rolEvento/{}", id.value());
        match self.transport.send(Method::DELETE, &path, None).await {
            Ok(_) => {
                self.state.write().roles.retain(|r| r.id != id);
                true
            },
            Err(err) => {
                if err.status() == Some(500) {
                    self.state.write().error = Some(ROLE_IN_USE.to_owned());
                } else {
                    self.record_error("Error al eliminar rol", &err);
                }
                false
            },
        }
    }

    fn record_error(&self, prefix: &str, err: &ApiError) {
        tracing::error!(error = %err, "{prefix}");
        if let Some(message) = store_error(prefix, AUTH_TOKEN_MISSING, err) {
            self.state.write().error = Some(message);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Moves to the given page of the client-side pagination.
    pub fn set_page(&self, page: u32) {
        self.state.write().page.set_page(page);
    }

    /// Full assignment list.
    #[must_use]
    pub fn users(&self) -> Vec<EventoRolPersona> {
        self.state.read().users.clone()
    }

    /// The slice of assignments visible on the current page.
    #[must_use]
    pub fn page_users(&self) -> Vec<EventoRolPersona> {
        let state = self.state.read();
        let start = state.page.offset() as usize;
        let end = (start + state.page.items_per_page() as usize).min(state.users.len());
        if start >= state.users.len() {
            return Vec::new();
        }
        state.users[start..end].to_vec()
    }

    /// Event-scoped role catalog.
    #[must_use]
    pub fn roles(&self) -> Vec<RolEvento> {
        self.state.read().roles.clone()
    }

    /// True while a listing fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Last recorded error.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Current 1-based page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.read().page.current_page()
    }

    /// `ceil(total / per_page)` over the client-side list.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.state.read().page.total_pages()
    }
}
