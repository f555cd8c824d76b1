//! Entity stores: one state container per admin-API entity.
//!
//! All stores share the same conventions:
//! - interior mutability (`parking_lot::RwLock` state, atomics for request
//!   generations) so callers hold a plain `&self`;
//! - no error ever escapes an action; failures become a localized message on
//!   the store's `error` field plus a `false`/`None` return;
//! - superseded list fetches are detected by generation tag and dropped
//!   without touching any state;
//! - locks are never held across await points.

mod enrollment;
mod event_users;
mod events;
mod global_users;
mod projects;
mod templates;

pub use enrollment::EnrollmentStore;
pub use event_users::EventUserStore;
pub use events::EventStore;
pub use global_users::{GlobalUserStore, UserFilters};
pub use projects::ProjectStore;
pub use templates::TemplateStore;

use crate::error::ApiError;

/// Standard localized message for a missing session token.
pub(crate) const AUTH_TOKEN_MISSING: &str = "Token de autenticación no encontrado.";

/// Localized message when no response was received at all.
pub(crate) const NETWORK_UNREACHABLE: &str =
    "No se pudo conectar con el servidor. Verifique su conexión de red.";

/// Folds an [`ApiError`] into the user-facing message a store records.
///
/// `prefix` is the action-specific lead-in ("Error al cargar los eventos"),
/// `auth_message` the store's token-missing wording. Returns `None` for a
/// superseded request, which must leave the error field untouched.
pub(crate) fn store_error(prefix: &str, auth_message: &str, err: &ApiError) -> Option<String> {
    match err {
        ApiError::Cancelled => None,
        ApiError::AuthTokenMissing => Some(auth_message.to_owned()),
        ApiError::NetworkUnreachable { .. } => Some(NETWORK_UNREACHABLE.to_owned()),
        ApiError::RequestConfig { message } => Some(format!("Fallo en la solicitud: {message}")),
        other => Some(format!("{prefix}: {}", other.detail())),
    }
}
