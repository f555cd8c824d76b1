//! Shared domain types for the Eventra admin SDK.
//!
//! Wire entities, typed identifiers and role constants consumed by
//! `eventra-admin-sdk`. Kept dependency-light so other tooling can decode the
//! same payloads without pulling in the HTTP stack.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entities;
mod ids;
pub mod roles;

pub use entities::{
    CronogramaEntrada, Equipo, EquipoMiembro, Evento, EventoCronograma, EventoRolHint,
    EventoRolPersona, Identity, Paged, Persona, ProcesoEvaluacionDetalle, Proyecto,
    ProyectoConEquipo, RecordStatus, Rol, RolEvento, Usuario,
};
pub use ids::{
    AsignacionId, EquipoId, EventoId, PersonaId, ProcesoId, ProyectoId, RolId, UsuarioId,
};
