//! Platform-wide user accounts: listing with client-side filters, lookup by
//! identification number, and status management.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventra_admin_types::{RecordStatus, Rol, RolId, Usuario, UsuarioId};
use parking_lot::RwLock;
use serde_json::json;

use crate::{
    error::ApiError,
    pagination::PageState,
    stores::{store_error, AUTH_TOKEN_MISSING},
    transport::{ApiTransport, Method},
};

/// Default page size for the global user table.
const USERS_PER_PAGE: u32 = 10;

/// Client-side filters applied on top of the fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    /// Keep only accounts holding this global role.
    pub role: Option<RolId>,
    /// Keep only accounts with this derived status.
    pub status: Option<RecordStatus>,
}

#[derive(Debug)]
struct GlobalUserState {
    users: Vec<Usuario>,
    roles: Vec<Rol>,
    filters: UserFilters,
    page: PageState,
    loading: bool,
    error: Option<String>,
}

impl Default for GlobalUserState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            roles: Vec::new(),
            filters: UserFilters::default(),
            page: PageState::new(USERS_PER_PAGE),
            loading: false,
            error: None,
        }
    }
}

/// State container for platform user accounts.
pub struct GlobalUserStore {
    transport: Arc<ApiTransport>,
    state: RwLock<GlobalUserState>,
    fetch_seq: AtomicU64,
}

impl GlobalUserStore {
    pub(crate) fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            state: RwLock::new(GlobalUserState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Listing and lookup
    // ------------------------------------------------------------------

    /// Fetches every user account. Filtering and pagination happen
    /// client-side over the result.
    pub async fn fetch_users(&self) -> bool {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.transport.get_json::<Vec<Usuario>>("usuario", true).await;

        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "global-user fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(users) => {
                state.users = users;
                let total = filtered(&state.users, &state.filters).count() as u64;
                state.page.set_total_count(total);
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching global users failed");
                state.users = Vec::new();
                state.page.set_total_count(0);
                state.error =
                    store_error("Error al cargar usuarios globales", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    /// Looks up one account by identification number.
    ///
    /// The endpoint answers either a single record or a list; a 200 with an
    /// empty list resolves to `None` without recording an error. A 404
    /// records a message naming the searched value.
    pub async fn search_by_identificacion(&self, identificacion: &str) -> Option<Usuario> {
        {
            let mut state = self.state.write();
            state.error = None;
        }

        let path = format!("usuario/{identificacion}");
        match self.transport.get_json::<serde_json::Value>(&path, true).await {
            Ok(value) => match decode_lookup(value) {
                Ok(user) => user,
                Err(err) => {
                    tracing::error!(error = %err, "identification lookup failed");
                    self.state.write().error = store_error(
                        "Error al buscar usuario",
                        AUTH_TOKEN_MISSING,
                        &ApiError::from(err),
                    );
                    None
                },
            },
            Err(err) if err.is_not_found() => {
                self.state.write().error = Some(format!(
                    "No se encontró ningún usuario con la identificación: {identificacion}"
                ));
                None
            },
            Err(err) => {
                tracing::error!(error = %err, "identification lookup failed");
                self.state.write().error =
                    store_error("Error al buscar usuario", AUTH_TOKEN_MISSING, &err);
                None
            },
        }
    }

    // ------------------------------------------------------------------
    // Writes (every write refetches the list)
    // ------------------------------------------------------------------

    /// Replaces an account's fields, then refetches the listing.
    pub async fn update_user(&self, id: UsuarioId, payload: serde_json::Value) -> bool {
        let path = format!("usuario/{}", id.value());
        match self.transport.send(Method::PUT, &path, Some(payload)).await {
            Ok(_) => {
                self.fetch_users().await;
                true
            },
            Err(err) => {
                self.record_error("Error al actualizar usuario", &err);
                false
            },
        }
    }

    /// Soft-deletes an account, then refetches.
    pub async fn delete_user(&self, id: UsuarioId) -> bool {
        let path = format!("usuario/{}", id.value());
        match self.transport.send(Method::DELETE, &path, None).await {
            Ok(_) => {
                self.fetch_users().await;
                true
            },
            Err(err) => {
                self.record_error("Error al desactivar usuario", &err);
                false
            },
        }
    }

    /// Sets the soft-delete flag explicitly, then refetches.
    pub async fn set_status(&self, id: UsuarioId, borrado: bool) -> bool {
        let path = format!("usuario/{}", id.value());
        let body = json!({ "estado_borrado": borrado });
        match self.transport.send(Method::PUT, &path, Some(body)).await {
            Ok(_) => {
                self.fetch_users().await;
                true
            },
            Err(err) => {
                self.record_error("Error al cambiar estado del usuario", &err);
                false
            },
        }
    }

    /// Fetches the global role catalog.
    pub async fn fetch_roles(&self) -> bool {
        match self.transport.get_json::<Vec<Rol>>("rol", true).await {
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

    fn record_error(&self, prefix: &str, err: &ApiError) {
        tracing::error!(error = %err, "{prefix}");
        if let Some(message) = store_error(prefix, AUTH_TOKEN_MISSING, err) {
            self.state.write().error = Some(message);
        }
    }

    // ------------------------------------------------------------------
    // Filters, pagination, accessors
    // ------------------------------------------------------------------

    /// Replaces the client-side filters and resets to page 1.
    pub fn set_filters(&self, filters: UserFilters) {
        let mut state = self.state.write();
        state.filters = filters;
        state.page.set_page(1);
        let total = filtered(&state.users, &state.filters).count() as u64;
        state.page.set_total_count(total);
    }

    /// Moves to the given page.
    pub fn set_page(&self, page: u32) {
        self.state.write().page.set_page(page);
    }

    /// Changes the page size and resets to page 1.
    pub fn set_items_per_page(&self, per_page: u32) {
        self.state.write().page.set_items_per_page(per_page);
    }

    /// Full fetched list, unfiltered.
    #[must_use]
    pub fn users(&self) -> Vec<Usuario> {
        self.state.read().users.clone()
    }

    /// The filtered list.
    #[must_use]
    pub fn filtered_users(&self) -> Vec<Usuario> {
        let state = self.state.read();
        filtered(&state.users, &state.filters).cloned().collect()
    }

    /// The slice of the filtered list visible on the current page.
    #[must_use]
    pub fn page_users(&self) -> Vec<Usuario> {
        let state = self.state.read();
        let start = state.page.offset() as usize;
        let per_page = state.page.items_per_page() as usize;
        filtered(&state.users, &state.filters).skip(start).take(per_page).cloned().collect()
    }

    /// Global role catalog.
    #[must_use]
    pub fn roles(&self) -> Vec<Rol> {
        self.state.read().roles.clone()
    }

    /// Active filters.
    #[must_use]
    pub fn filters(&self) -> UserFilters {
        self.state.read().filters.clone()
    }

    /// True while the listing fetch is in flight.
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

    /// `ceil(total / per_page)` over the filtered list.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.state.read().page.total_pages()
    }
}

/// The lookup endpoint returns a single record or a list; an empty list
/// means "no match", not a failure.
fn decode_lookup(value: serde_json::Value) -> serde_json::Result<Option<Usuario>> {
    if value.is_array() {
        let mut users: Vec<Usuario> = serde_json::from_value(value)?;
        if users.is_empty() { Ok(None) } else { Ok(Some(users.remove(0))) }
    } else {
        serde_json::from_value(value).map(Some)
    }
}

fn filtered<'a>(
    users: &'a [Usuario],
    filters: &'a UserFilters,
) -> impl Iterator<Item = &'a Usuario> {
    users.iter().filter(move |user| {
        if let Some(role) = filters.role {
            if user.rol_id != Some(role) {
                return false;
            }
        }
        if let Some(status) = filters.status {
            if RecordStatus::from_borrado(user.estado_borrado) != status {
                return false;
            }
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventra_admin_types::roles;

    fn user(id: i64, rol: i64, borrado: bool) -> Usuario {
        Usuario {
            id: UsuarioId::new(id),
            nombre: None,
            correo: None,
            identificacion: None,
            rol_id: Some(RolId::new(rol)),
            estado_borrado: borrado,
        }
    }

    #[test]
    fn test_filtered_by_role_and_status() {
        let users = vec![user(1, 2, false), user(2, 3, false), user(3, 2, true)];

        let by_role = UserFilters { role: Some(roles::GESTOR), status: None };
        let got: Vec<_> = filtered(&users, &by_role).map(|u| u.id.value()).collect();
        assert_eq!(got, vec![1, 3]);

        let active_gestores =
            UserFilters { role: Some(roles::GESTOR), status: Some(RecordStatus::Activo) };
        let got: Vec<_> = filtered(&users, &active_gestores).map(|u| u.id.value()).collect();
        assert_eq!(got, vec![1]);
    }

    #[test]
    fn test_empty_filters_keep_everything() {
        let users = vec![user(1, 2, false), user(2, 3, true)];
        assert_eq!(filtered(&users, &UserFilters::default()).count(), 2);
    }

    #[test]
    fn test_decode_lookup_handles_both_shapes() {
        let single = serde_json::json!({ "id": 1, "identificacion": "101" });
        let found = decode_lookup(single).unwrap().unwrap();
        assert_eq!(found.id, UsuarioId::new(1));

        let list = serde_json::json!([{ "id": 2 }, { "id": 3 }]);
        let found = decode_lookup(list).unwrap().unwrap();
        assert_eq!(found.id, UsuarioId::new(2));
    }

    #[test]
    fn test_decode_lookup_empty_list_is_no_match() {
        assert_eq!(decode_lookup(serde_json::json!([])).unwrap(), None);
    }
}
