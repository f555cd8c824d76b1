//! Wire-level domain entities for the Eventra admin API.
//!
//! Field names match the backend's JSON (Spanish) vocabulary; serde renames
//! cover the few camelCase exceptions. Every list response is replaced
//! wholesale on fetch, so these types carry no client-side bookkeeping beyond
//! the derived [`RecordStatus`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{
    AsignacionId, EquipoId, EventoId, PersonaId, ProcesoId, ProyectoId, RolId, UsuarioId,
};

// ============================================================================
// Derived status
// ============================================================================

/// Display status derived from the soft-delete flag.
///
/// The backend never sends this; stores compute it after every fetch and
/// patch it directly after a soft-delete toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Record is live (`estado_borrado == false`).
    #[default]
    Activo,
    /// Record is soft-deleted (`estado_borrado == true`).
    Inactivo,
}

impl RecordStatus {
    /// Derives the status from a soft-delete flag.
    #[must_use]
    pub const fn from_borrado(estado_borrado: bool) -> Self {
        if estado_borrado { Self::Inactivo } else { Self::Activo }
    }

    /// Returns the display label (`"Activo"` / `"Inactivo"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activo => "Activo",
            Self::Inactivo => "Inactivo",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Session identity
// ============================================================================

/// The authenticated identity, as persisted at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Platform user account id.
    pub id: UsuarioId,
    /// Global role of the account.
    pub rol_id: RolId,
    /// Person record linked to the account.
    pub persona_id: PersonaId,
}

/// An active manager/admin role the identity holds on a specific event.
///
/// Loaded from the assignment listing and cached on the session context so
/// permission checks stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventoRolHint {
    /// Event the role applies to.
    pub evento_id: EventoId,
    /// Role held on that event.
    pub rol_id: RolId,
}

// ============================================================================
// Events
// ============================================================================

/// An event, as returned by the paginated and unpaginated listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evento {
    /// Event id.
    pub id: EventoId,
    /// Event name.
    pub nombre: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// First day of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<NaiveDate>,
    /// Last day of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,
    /// Soft-delete flag.
    #[serde(default)]
    pub estado_borrado: bool,
}

/// One schedule entry of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronogramaEntrada {
    /// Entry id, absent for not-yet-persisted rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// What happens in this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Day of the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    /// Start time, backend-formatted (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_inicio: Option<String>,
    /// End time, backend-formatted (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_fin: Option<String>,
}

/// Expanded event detail with its schedule, used by the edit flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventoCronograma {
    /// The event itself.
    #[serde(flatten)]
    pub evento: Evento,
    /// Schedule entries.
    #[serde(default)]
    pub cronogramas: Vec<CronogramaEntrada>,
}

// ============================================================================
// Roles
// ============================================================================

/// A global (system-wide) role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rol {
    /// Role id.
    pub id: RolId,
    /// Role name.
    pub nombre: String,
}

/// An event-scoped role.
///
/// Deliberately a distinct type from [`Rol`]: the two sets live on different
/// resources and must not be conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolEvento {
    /// Role id.
    pub id: RolId,
    /// Role name.
    pub nombre: String,
}

// ============================================================================
// People and users
// ============================================================================

/// A person record, addressable by cédula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Person id.
    pub id: PersonaId,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    /// National id number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
}

/// A global platform user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    /// Account id.
    pub id: UsuarioId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    /// National id number used for lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identificacion: Option<String>,
    /// Global role of the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol_id: Option<RolId>,
    /// Soft-delete flag.
    #[serde(default)]
    pub estado_borrado: bool,
}

/// A person-event-role assignment row from the expanded `detalles` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventoRolPersona {
    /// Assignment row id.
    pub id: AsignacionId,
    /// Assigned person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<PersonaId>,
    /// Person first name, denormalized by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// Person last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    /// Person cédula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    /// Target event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evento_id: Option<EventoId>,
    /// Event name, denormalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evento: Option<String>,
    /// Event-role name, denormalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
    /// Event-role id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol_id: Option<RolId>,
    /// Soft-delete flag. (Persona, evento) uniqueness is the backend's job.
    #[serde(default)]
    pub estado_borrado: bool,
    /// Derived display status; recomputed after fetch and after toggles.
    #[serde(skip)]
    pub status: RecordStatus,
}

impl EventoRolPersona {
    /// Recomputes the derived status from the soft-delete flag.
    pub fn refresh_status(&mut self) {
        self.status = RecordStatus::from_borrado(self.estado_borrado);
    }
}

// ============================================================================
// Projects and teams
// ============================================================================

/// A member of a team, as embedded in a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipoMiembro {
    /// Member person id.
    pub persona_id: PersonaId,
    /// Role of the member within the team.
    pub rol_id: RolId,
}

/// A team. Placeholder instances are synthesized client-side when a project
/// has no team or its team lookup fails; those carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipo {
    /// Team id; `None` for client-side placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EquipoId>,
    /// Team name.
    pub nombre: String,
    /// Soft-delete flag.
    #[serde(default)]
    pub estado_borrado: bool,
}

impl Equipo {
    /// Placeholder for a project that references no team.
    #[must_use]
    pub fn sin_asignar() -> Self {
        Self { id: None, nombre: "Sin equipo asignado".to_owned(), estado_borrado: false }
    }

    /// Placeholder substituted when a referenced team fails to load.
    #[must_use]
    pub fn no_encontrado() -> Self {
        Self { id: None, nombre: "Equipo no encontrado".to_owned(), estado_borrado: true }
    }
}

/// A project; belongs to exactly one event, optionally references one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proyecto {
    /// Project id.
    pub id: ProyectoId,
    /// Project name.
    pub nombre: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Owning event.
    pub evento_id: EventoId,
    /// Referenced team, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipo_id: Option<EquipoId>,
    /// Team member list, when the backend embeds it. Consulted by the
    /// permission evaluator for the team-leader rule.
    #[serde(default)]
    pub equipo: Vec<EquipoMiembro>,
}

/// A project joined with its resolved (or placeholder) team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProyectoConEquipo {
    /// The project.
    #[serde(flatten)]
    pub proyecto: Proyecto,
    /// Resolved team, or a placeholder (see [`Equipo::sin_asignar`] and
    /// [`Equipo::no_encontrado`]).
    pub team: Equipo,
}

// ============================================================================
// Evaluation templates
// ============================================================================

/// One evaluation process detail record; templates for an event are the
/// records whose `procesoEventoId` matches the event id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcesoEvaluacionDetalle {
    /// Record id.
    pub id: ProcesoId,
    /// Event the process belongs to. camelCase on the wire.
    #[serde(rename = "procesoEventoId")]
    pub proceso_evento_id: EventoId,
    /// Template name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

// ============================================================================
// Pagination envelope
// ============================================================================

/// Envelope returned by limit/offset listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// The requested page of records.
    pub data: Vec<T>,
    /// Total matching records across all pages.
    pub total: u64,
}
