//! Per-event project listing with team resolution.
//!
//! Results are cached per event id, including failed loads: once an event key
//! is populated (even with an empty list after an error) later calls return
//! the cached value until the key is invalidated.

use std::sync::Arc;

use eventra_admin_types::{Equipo, EventoId, Proyecto, ProyectoConEquipo};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::{
    cache::KeyedCache,
    stores::store_error,
    transport::ApiTransport,
};

const AUTH_MISSING_PROJECTS: &str = "Token de autenticación no encontrado para cargar proyectos.";

/// State container for per-event project lists.
pub struct ProjectStore {
    transport: Arc<ApiTransport>,
    cache: KeyedCache<EventoId, ProyectoConEquipo>,
    /// Serializes cache misses so concurrent callers for the same key produce
    /// one network round trip.
    fetch_gate: Mutex<()>,
    loading: RwLock<bool>,
    error: RwLock<Option<String>>,
}

impl ProjectStore {
    pub(crate) fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            cache: KeyedCache::new(),
            fetch_gate: Mutex::new(()),
            loading: RwLock::new(false),
            error: RwLock::new(None),
        }
    }

    /// Returns the projects of an event, fetching on first use.
    ///
    /// Each project's team reference is resolved with a follow-up request;
    /// teams that fail to load or are absent get placeholder records instead
    /// of failing the whole listing.
    pub async fn get_or_fetch(&self, event_id: EventoId) -> Vec<ProyectoConEquipo> {
        if let Some(projects) = self.cache.get(&event_id) {
            return projects;
        }

        let _gate = self.fetch_gate.lock().await;
        // Another caller may have filled the key while we waited.
        if let Some(projects) = self.cache.get(&event_id) {
            return projects;
        }

        *self.loading.write() = true;
        *self.error.write() = None;

        let path = format!("proyecto/proyectosPorEvento/{}", event_id.value());
        let result = self.transport.get_json::<serde_json::Value>(&path, true).await;

        let projects = match result {
            Ok(value) => {
                let raw = flatten_one_level(value);
                let mut resolved = Vec::with_capacity(raw.len());
                for item in raw {
                    match serde_json::from_value::<Proyecto>(item) {
                        Ok(proyecto) => {
                            let team = self.resolve_team(&proyecto).await;
                            resolved.push(ProyectoConEquipo { proyecto, team });
                        },
                        Err(err) => {
                            tracing::warn!(error = %err, evento = %event_id, "skipping undecodable project");
                        },
                    }
                }
                resolved
            },
            Err(err) => {
                tracing::error!(error = %err, evento = %event_id, "fetching projects failed");
                if let Some(message) =
                    store_error("Error al cargar los proyectos del evento", AUTH_MISSING_PROJECTS, &err)
                {
                    *self.error.write() = Some(message);
                }
                Vec::new()
            },
        };

        self.cache.insert(event_id, projects.clone());
        *self.loading.write() = false;
        projects
    }

    async fn resolve_team(&self, proyecto: &Proyecto) -> Equipo {
        let Some(equipo_id) = proyecto.equipo_id else {
            return Equipo::sin_asignar();
        };
        let path = format!("equipos/{}", equipo_id.value());
        match self.transport.get_json::<Equipo>(&path, true).await {
            Ok(team) => team,
            Err(err) => {
                tracing::warn!(error = %err, equipo = %equipo_id, "team lookup failed");
                Equipo::no_encontrado()
            },
        }
    }

    /// Cached projects for an event, if the key has been populated.
    #[must_use]
    pub fn projects_for(&self, event_id: EventoId) -> Option<Vec<ProyectoConEquipo>> {
        self.cache.get(&event_id)
    }

    /// Drops one event's cached list so the next call refetches.
    pub fn invalidate(&self, event_id: EventoId) {
        self.cache.invalidate(&event_id);
    }

    /// Drops every cached list.
    pub fn clear(&self) {
        self.cache.clear();
        *self.error.write() = None;
    }

    /// True while a cache miss is being filled.
    #[must_use]
    pub fn loading(&self) -> bool {
        *self.loading.read()
    }

    /// Last recorded error.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }
}

/// The endpoint sometimes wraps each project in a one-element array; unwrap
/// one level of nesting so both shapes decode.
fn flatten_one_level(value: serde_json::Value) -> Vec<serde_json::Value> {
    let serde_json::Value::Array(items) = value else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            serde_json::Value::Array(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_one_level_unwraps_nested_arrays() {
        let value = json!([[{ "id": 1 }], { "id": 2 }, [{ "id": 3 }, { "id": 4 }]]);
        let flat = flatten_one_level(value);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[0]["id"], 1);
        assert_eq!(flat[3]["id"], 4);
    }

    #[test]
    fn test_flatten_one_level_rejects_non_arrays() {
        assert!(flatten_one_level(json!({ "id": 1 })).is_empty());
        assert!(flatten_one_level(json!(null)).is_empty());
    }
}
