//! Reserved role identifiers and names.
//!
//! These values are fixed by the backend's seed data; the permission
//! evaluator keys off them.

use crate::ids::RolId;

/// Global role that bypasses every permission check.
pub const SUPER_ADMIN: RolId = RolId::new(8);

/// Event role: team leader (within a project's team).
pub const LIDER_EQUIPO: RolId = RolId::new(1);

/// Event role: manager of an event.
pub const GESTOR: RolId = RolId::new(2);

/// Event role: administrator of an event.
pub const ADMIN_EVENTO: RolId = RolId::new(3);

/// Event-role names that grant project-edit rights on their event, as they
/// appear in the denormalized assignment listing.
pub const ROLES_GESTION: [&str; 2] = ["Gestor", "AdminEvento"];
