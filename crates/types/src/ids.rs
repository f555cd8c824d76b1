//! Typed identifiers for Eventra domain entities.
//!
//! Every backend id is a plain integer on the wire. Wrapping each one in its
//! own newtype keeps an `EventoId` from ever being passed where a `PersonaId`
//! belongs, at zero runtime cost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `i64` for type-safe identifiers.
///
/// Each generated type provides:
/// - Standard derives: Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord
/// - Serde with `#[serde(transparent)]` for wire format compatibility
/// - `From<i64>` and `Into<i64>` conversions
/// - `Display` with a semantic prefix (e.g., `evento:42`)
/// - `new()` constructor and `value()` accessor
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:expr
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from a raw value.
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            #[inline]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <i64 as std::str::FromStr>::Err;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for an event.
    ///
    /// # Display
    ///
    /// Formats with `evento:` prefix: `evento:42`.
    EventoId, "evento"
);

define_id!(
    /// Unique identifier for a person record.
    ///
    /// # Display
    ///
    /// Formats with `persona:` prefix: `persona:7`.
    PersonaId, "persona"
);

define_id!(
    /// Unique identifier for a platform user account.
    UsuarioId, "usuario"
);

define_id!(
    /// Unique identifier for a role, global or event-scoped.
    ///
    /// Global roles and event roles are disjoint sets that happen to share a
    /// numeric id space on the backend; the stores keep them apart.
    RolId, "rol"
);

define_id!(
    /// Unique identifier for a project.
    ProyectoId, "proyecto"
);

define_id!(
    /// Unique identifier for a team.
    EquipoId, "equipo"
);

define_id!(
    /// Unique identifier for a person-event-role assignment row.
    AsignacionId, "asignacion"
);

define_id!(
    /// Unique identifier for an evaluation process detail record.
    ProcesoId, "proceso"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = EventoId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(EventoId::from(42), id);
    }

    #[test]
    fn test_id_display_prefix() {
        assert_eq!(EventoId::new(42).to_string(), "evento:42");
        assert_eq!(PersonaId::new(7).to_string(), "persona:7");
    }

    #[test]
    fn test_id_from_str() {
        let id: EventoId = "42".parse().unwrap();
        assert_eq!(id, EventoId::new(42));
        assert!("abc".parse::<EventoId>().is_err());
    }

    #[test]
    fn test_id_types_are_distinct() {
        // Compile-time property; documents intent.
        fn takes_evento(_: EventoId) {}
        takes_evento(EventoId::new(1));
    }
}
