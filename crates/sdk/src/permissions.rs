//! Permission evaluation.
//!
//! Pure decision logic over pre-loaded data: the identity snapshot, the
//! cached event-role hints, and the target record. No function here performs
//! I/O, so results are stable for a given snapshot. This is the single
//! permission API; stores and views must not re-derive these rules.

use std::sync::Arc;

use eventra_admin_types::{roles, EventoRolHint, Identity, Proyecto};

use crate::session::SessionContext;

/// True iff the identity holds the reserved super-admin role.
#[must_use]
pub fn is_super_admin(identity: &Identity) -> bool {
    identity.rol_id == roles::SUPER_ADMIN
}

/// Decides whether `identity` may edit `proyecto`.
///
/// Grant order:
/// 1. super-admin, always;
/// 2. a gestor/admin-evento hint for the project's event;
/// 3. the identity's persona listed in the project's team members with the
///    team-leader role.
#[must_use]
pub fn can_edit_project(
    identity: &Identity,
    proyecto: &Proyecto,
    event_roles: &[EventoRolHint],
) -> bool {
    if is_super_admin(identity) {
        return true;
    }

    let manages_event = event_roles.iter().any(|hint| {
        hint.evento_id == proyecto.evento_id
            && (hint.rol_id == roles::GESTOR || hint.rol_id == roles::ADMIN_EVENTO)
    });
    if manages_event {
        return true;
    }

    proyecto.equipo.iter().any(|miembro| {
        miembro.persona_id == identity.persona_id && miembro.rol_id == roles::LIDER_EQUIPO
    })
}

/// Session-bound evaluator: snapshots the identity and cached role hints from
/// the session context and applies the pure rules above.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    session: Arc<SessionContext>,
}

impl PermissionEvaluator {
    /// Binds the evaluator to a session context.
    #[must_use]
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// True iff the current identity is the super-admin. Unauthenticated
    /// sessions hold no permissions.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.session.identity().is_some_and(|identity| is_super_admin(&identity))
    }

    /// Applies [`can_edit_project`] with the session's identity and cached
    /// event-role hints.
    #[must_use]
    pub fn can_edit_project(&self, proyecto: &Proyecto) -> bool {
        let Some(identity) = self.session.identity() else {
            return false;
        };
        can_edit_project(&identity, proyecto, &self.session.event_roles())
    }
}
