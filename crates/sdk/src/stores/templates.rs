//! Per-event evaluation templates.
//!
//! The backend exposes one flat catalog of evaluation process details; the
//! store filters it by event and caches the result per event id, failed loads
//! included, until the key is invalidated.

use std::sync::Arc;

use eventra_admin_types::{EventoId, ProcesoEvaluacionDetalle};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::{
    cache::KeyedCache,
    stores::store_error,
    transport::ApiTransport,
};

const AUTH_MISSING_TEMPLATES: &str =
    "Token de autenticación no encontrado para cargar plantillas de evaluación.";

/// State container for per-event evaluation templates.
pub struct TemplateStore {
    transport: Arc<ApiTransport>,
    cache: KeyedCache<EventoId, ProcesoEvaluacionDetalle>,
    fetch_gate: Mutex<()>,
    loading: RwLock<bool>,
    error: RwLock<Option<String>>,
}

impl TemplateStore {
    pub(crate) fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            cache: KeyedCache::new(),
            fetch_gate: Mutex::new(()),
            loading: RwLock::new(false),
            error: RwLock::new(None),
        }
    }

    /// Returns the templates of an event, fetching the catalog and filtering
    /// it on first use.
    pub async fn get_or_fetch(&self, event_id: EventoId) -> Vec<ProcesoEvaluacionDetalle> {
        if let Some(templates) = self.cache.get(&event_id) {
            return templates;
        }

        let _gate = self.fetch_gate.lock().await;
        if let Some(templates) = self.cache.get(&event_id) {
            return templates;
        }

        *self.loading.write() = true;
        *self.error.write() = None;

        let result = self
            .transport
            .get_json::<Vec<ProcesoEvaluacionDetalle>>("procesos-evaluacion-detalle", true)
            .await;

        let templates = match result {
            Ok(catalog) => {
                catalog.into_iter().filter(|t| t.proceso_evento_id == event_id).collect()
            },
            Err(err) => {
                tracing::error!(error = %err, evento = %event_id, "fetching templates failed");
                if let Some(message) = store_error(
                    "Error al cargar las plantillas de evaluación",
                    AUTH_MISSING_TEMPLATES,
                    &err,
                ) {
                    *self.error.write() = Some(message);
                }
                Vec::new()
            },
        };

        self.cache.insert(event_id, templates.clone());
        *self.loading.write() = false;
        templates
    }

    /// Cached templates for an event, if the key has been populated.
    #[must_use]
    pub fn templates_for(&self, event_id: EventoId) -> Option<Vec<ProcesoEvaluacionDetalle>> {
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
