//! Mock REST backend for SDK integration testing.
//!
//! A controllable in-process stand-in for the admin API: fixture storage per
//! resource, request counting, and failure/delay injection, served over a real
//! HTTP socket so the full transport path is exercised.
//!
//! # Example
//!
//! ```no_run
//! use eventra_admin_sdk::mock::MockAdminServer;
//! use eventra_admin_sdk::{AdminClient, ClientConfig};
//!
//! #[tokio::test]
//! async fn test_events() {
//!     let server = MockAdminServer::start().await.unwrap();
//!     let config = ClientConfig::builder()
//!         .with_base_url(server.endpoint())
//!         .build()
//!         .unwrap();
//!     let client = AdminClient::new(config).unwrap();
//!     client.login(server.token(), MockAdminServer::test_identity()).unwrap();
//!     assert!(client.events().fetch_page().await);
//! }
//! ```

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU16, AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, patch, post, put},
};
use eventra_admin_types::{
    Equipo, Evento, EventoCronograma, EventoId, EventoRolPersona, Identity, Paged, Persona,
    PersonaId, ProcesoEvaluacionDetalle, Proyecto, Rol, RolEvento, RolId, Usuario, UsuarioId,
};
use parking_lot::RwLock;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use crate::error::{ApiError, Result};

type Reply = std::result::Result<Json<Value>, (StatusCode, Json<Value>)>;

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn ok(value: impl serde::Serialize) -> Reply {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))
}

/// Shared state for the mock server.
struct MockState {
    // Fixtures per resource.
    eventos: RwLock<Vec<Evento>>,
    proximos: RwLock<Vec<Evento>>,
    ultimos: RwLock<Vec<Evento>>,
    evento_details: RwLock<HashMap<i64, EventoCronograma>>,
    personas: RwLock<Vec<Persona>>,
    usuarios: RwLock<Vec<Usuario>>,
    roles: RwLock<Vec<Rol>>,
    event_roles: RwLock<Vec<RolEvento>>,
    assignments: RwLock<Vec<EventoRolPersona>>,
    enrollments: RwLock<Vec<EventoId>>,
    proyectos: RwLock<HashMap<i64, Vec<Proyecto>>>,
    equipos: RwLock<HashMap<i64, Equipo>>,
    procesos: RwLock<Vec<ProcesoEvaluacionDetalle>>,

    /// When set, a cédula with no match answers 200 with an empty list
    /// instead of 404.
    cedula_empty_ok: AtomicBool,

    /// When set, a user lookup with no match answers 200 with an empty list
    /// instead of 404.
    usuario_empty_ok: AtomicBool,

    next_asignacion: AtomicU64,
    next_rol: AtomicU64,

    /// Expected bearer token for authenticated routes.
    token: RwLock<String>,

    /// Per-route hit counts, keyed by "METHOD /path".
    hits: RwLock<HashMap<String, usize>>,
    total_requests: AtomicUsize,

    /// Number of requests to fail with `fail_status` before recovering.
    fail_count: AtomicUsize,
    fail_status: AtomicU16,

    /// Delay injected before every response (milliseconds).
    delay_ms: AtomicU64,
}

impl MockState {
    fn new() -> Self {
        Self {
            eventos: RwLock::new(Vec::new()),
            proximos: RwLock::new(Vec::new()),
            ultimos: RwLock::new(Vec::new()),
            evento_details: RwLock::new(HashMap::new()),
            personas: RwLock::new(Vec::new()),
            usuarios: RwLock::new(Vec::new()),
            roles: RwLock::new(Vec::new()),
            event_roles: RwLock::new(Vec::new()),
            assignments: RwLock::new(Vec::new()),
            enrollments: RwLock::new(Vec::new()),
            proyectos: RwLock::new(HashMap::new()),
            equipos: RwLock::new(HashMap::new()),
            procesos: RwLock::new(Vec::new()),
            cedula_empty_ok: AtomicBool::new(false),
            usuario_empty_ok: AtomicBool::new(false),
            next_asignacion: AtomicU64::new(1000),
            next_rol: AtomicU64::new(100),
            token: RwLock::new("test-token".to_owned()),
            hits: RwLock::new(HashMap::new()),
            total_requests: AtomicUsize::new(0),
            fail_count: AtomicUsize::new(0),
            fail_status: AtomicU16::new(503),
            delay_ms: AtomicU64::new(0),
        }
    }

    /// Records the hit, applies any injected delay, then any injected
    /// failure, then (for authenticated routes) the bearer-token check.
    async fn begin(
        &self,
        label: &str,
        headers: Option<&HeaderMap>,
    ) -> std::result::Result<(), (StatusCode, Json<Value>)> {
        *self.hits.write().entry(label.to_owned()).or_insert(0) += 1;
        self.total_requests.fetch_add(1, Ordering::SeqCst);

        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if self.should_inject_failure() {
            let status = StatusCode::from_u16(self.fail_status.load(Ordering::SeqCst))
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
            return Err(failure(status, "Injected error"));
        }

        if let Some(headers) = headers {
            let expected = format!("Bearer {}", self.token.read());
            let authorized = headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == expected);
            if !authorized {
                return Err(failure(StatusCode::UNAUTHORIZED, "No autorizado"));
            }
        }
        Ok(())
    }

    fn should_inject_failure(&self) -> bool {
        loop {
            let current = self.fail_count.load(Ordering::SeqCst);
            if current == 0 {
                return false;
            }
            if self
                .fail_count
                .compare_exchange(current, current - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return true;
            }
        }
    }

    /// Fills denormalized person/event/role columns from the other fixtures.
    fn denormalize(&self, mut row: EventoRolPersona) -> EventoRolPersona {
        if row.nombre.is_none() {
            if let Some(persona_id) = row.persona_id {
                if let Some(p) = self.personas.read().iter().find(|p| p.id == persona_id) {
                    row.nombre.clone_from(&p.nombre);
                    row.apellido.clone_from(&p.apellido);
                    row.cedula.clone_from(&p.cedula);
                }
            }
        }
        if row.evento.is_none() {
            if let Some(evento_id) = row.evento_id {
                if let Some(e) = self.eventos.read().iter().find(|e| e.id == evento_id) {
                    row.evento = Some(e.nombre.clone());
                }
            }
        }
        if row.rol.is_none() {
            if let Some(rol_id) = row.rol_id {
                if let Some(r) = self.event_roles.read().iter().find(|r| r.id == rol_id) {
                    row.rol = Some(r.nombre.clone());
                }
            }
        }
        row
    }
}

/// Mock implementation of the admin REST API.
pub struct MockAdminServer {
    state: Arc<MockState>,
    endpoint: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockAdminServer {
    /// Starts a new mock server on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if binding fails.
    pub async fn start() -> Result<Self> {
        Self::start_on_port(0).await
    }

    /// Starts a new mock server on a specific port (0 for ephemeral).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if binding fails.
    pub async fn start_on_port(port: u16) -> Result<Self> {
        let state = Arc::new(MockState::new());

        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            ApiError::Config { message: format!("failed to bind mock server: {e}") }
        })?;
        let local_addr = listener.local_addr().map_err(|e| ApiError::Config {
            message: format!("failed to read local addr: {e}"),
        })?;
        let endpoint = format!("http://{local_addr}");

        let app = router(Arc::clone(&state));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!("mock server error: {e}");
            }
        });

        Ok(Self { state, endpoint, shutdown_tx: Some(shutdown_tx) })
    }

    /// Base URL for connecting a client to this server.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The bearer token authenticated routes expect.
    #[must_use]
    pub fn token(&self) -> String {
        self.state.token.read().clone()
    }

    /// Replaces the expected bearer token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.state.token.write() = token.into();
    }

    /// A ready-made identity for login in tests.
    #[must_use]
    pub fn test_identity() -> Identity {
        Identity { id: UsuarioId::new(1), rol_id: RolId::new(2), persona_id: PersonaId::new(1) }
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    /// Replaces the event catalog (serves the paginated and full listings).
    pub fn set_eventos(&self, eventos: Vec<Evento>) {
        *self.state.eventos.write() = eventos;
    }

    /// Replaces the upcoming-events fixture.
    pub fn set_proximos(&self, eventos: Vec<Evento>) {
        *self.state.proximos.write() = eventos;
    }

    /// Replaces the latest-events fixture.
    pub fn set_ultimos(&self, eventos: Vec<Evento>) {
        *self.state.ultimos.write() = eventos;
    }

    /// Stores an expanded event detail record.
    pub fn set_evento_detail(&self, detail: EventoCronograma) {
        self.state.evento_details.write().insert(detail.evento.id.value(), detail);
    }

    /// Adds a person record for cédula lookups.
    pub fn add_persona(&self, persona: Persona) {
        self.state.personas.write().push(persona);
    }

    /// Replaces the platform user fixture.
    pub fn set_usuarios(&self, usuarios: Vec<Usuario>) {
        *self.state.usuarios.write() = usuarios;
    }

    /// Replaces the global role catalog.
    pub fn set_roles(&self, roles: Vec<Rol>) {
        *self.state.roles.write() = roles;
    }

    /// Replaces the event-scoped role catalog.
    pub fn set_event_roles(&self, roles: Vec<RolEvento>) {
        *self.state.event_roles.write() = roles;
    }

    /// Adds an assignment row to the expanded listing.
    pub fn add_assignment(&self, row: EventoRolPersona) {
        self.state.assignments.write().push(row);
    }

    /// Current assignment rows, as the server would list them.
    #[must_use]
    pub fn assignments(&self) -> Vec<EventoRolPersona> {
        self.state.assignments.read().clone()
    }

    /// Replaces the signed-in person's enrolled events.
    pub fn set_enrollments(&self, eventos: Vec<EventoId>) {
        *self.state.enrollments.write() = eventos;
    }

    /// Replaces the project list of an event.
    pub fn set_proyectos(&self, event_id: EventoId, proyectos: Vec<Proyecto>) {
        self.state.proyectos.write().insert(event_id.value(), proyectos);
    }

    /// Stores a team record. The team must carry an id to be addressable.
    pub fn set_equipo(&self, equipo: Equipo) {
        if let Some(id) = equipo.id {
            self.state.equipos.write().insert(id.value(), equipo);
        }
    }

    /// Replaces the evaluation process catalog.
    pub fn set_procesos(&self, procesos: Vec<ProcesoEvaluacionDetalle>) {
        *self.state.procesos.write() = procesos;
    }

    /// Makes a cédula miss answer 200 with an empty list instead of 404.
    pub fn set_cedula_empty_ok(&self, enabled: bool) {
        self.state.cedula_empty_ok.store(enabled, Ordering::SeqCst);
    }

    /// Makes a user-lookup miss answer 200 with an empty list instead of 404.
    pub fn set_usuario_empty_ok(&self, enabled: bool) {
        self.state.usuario_empty_ok.store(enabled, Ordering::SeqCst);
    }

    // ------------------------------------------------------------------
    // Injection and counters
    // ------------------------------------------------------------------

    /// Fails the next `count` requests with `status`.
    pub fn inject_failures(&self, count: usize, status: u16) {
        self.state.fail_status.store(status, Ordering::SeqCst);
        self.state.fail_count.store(count, Ordering::SeqCst);
    }

    /// Delays every subsequent response; 0 disables.
    pub fn inject_delay(&self, millis: u64) {
        self.state.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Total requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.total_requests.load(Ordering::SeqCst)
    }

    /// Requests received for one route, keyed by `"METHOD /path"` (path
    /// parameters in `:name` form).
    #[must_use]
    pub fn hits(&self, label: &str) -> usize {
        self.state.hits.read().get(label).copied().unwrap_or(0)
    }
}

impl Drop for MockAdminServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// ============================================================================
// Routing
// ============================================================================

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/eventos", get(list_eventos))
        .route("/api/eventos/limit-offset", get(list_eventos_paged))
        .route("/api/eventos/proximos", get(list_proximos))
        .route("/api/eventos/ultimos", get(list_ultimos))
        .route("/api/eventos-cronogramas/:id", get(get_evento_detail))
        .route("/api/evento-rol-persona", post(create_assignment))
        .route("/api/evento-rol-persona/detalles", get(list_assignments))
        .route("/api/evento-rol-persona/eventos-por-persona", get(list_enrollments))
        .route("/api/evento-rol-persona/:id", put(update_assignment))
        .route("/api/evento-rol-persona/:id/borrar", delete(soft_delete_assignment))
        .route("/api/evento-rol-persona/:id/activar", patch(reactivate_assignment))
        .route("/api/persona/cedula/:cedula", get(find_persona_by_cedula))
        .route("/api/rolEvento", get(list_event_roles).post(create_event_role))
        .route("/api/rolEvento/:id", put(update_event_role).delete(delete_event_role))
        .route("/api/usuario", get(list_usuarios))
        .route(
            "/api/usuario/:key",
            get(find_usuario).put(update_usuario).delete(soft_delete_usuario),
        )
        .route("/api/rol", get(list_roles))
        .route("/api/proyecto/proyectosPorEvento/:id", get(list_proyectos))
        .route("/api/equipos/:id", get(get_equipo))
        .route("/api/procesos-evaluacion-detalle", get(list_procesos))
        .with_state(state)
}

// ============================================================================
// Event handlers
// ============================================================================

async fn list_eventos(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/eventos", Some(&headers)).await?;
    ok(state.eventos.read().clone())
}

async fn list_eventos_paged(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/eventos/limit-offset", Some(&headers)).await?;

    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(10);
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let search = params.get("search").map(|s| s.to_lowercase());

    let eventos = state.eventos.read();
    let matching: Vec<&Evento> = eventos
        .iter()
        .filter(|e| match &search {
            Some(term) => e.nombre.to_lowercase().contains(term),
            None => true,
        })
        .collect();
    let total = matching.len() as u64;
    let data: Vec<Evento> = matching.into_iter().skip(offset).take(limit).cloned().collect();

    ok(Paged { data, total })
}

async fn list_proximos(State(state): State<Arc<MockState>>) -> Reply {
    state.begin("GET /api/eventos/proximos", None).await?;
    ok(state.proximos.read().clone())
}

async fn list_ultimos(State(state): State<Arc<MockState>>) -> Reply {
    state.begin("GET /api/eventos/ultimos", None).await?;
    ok(state.ultimos.read().clone())
}

async fn get_evento_detail(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/eventos-cronogramas/:id", Some(&headers)).await?;
    let details = state.evento_details.read();
    match details.get(&id) {
        Some(detail) => ok(detail.clone()),
        None => Err(failure(StatusCode::NOT_FOUND, "Evento no encontrado")),
    }
}

// ============================================================================
// Assignment handlers
// ============================================================================

async fn list_assignments(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/evento-rol-persona/detalles", Some(&headers)).await?;
    let rows: Vec<EventoRolPersona> =
        state.assignments.read().iter().cloned().map(|r| state.denormalize(r)).collect();
    ok(rows)
}

async fn list_enrollments(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/evento-rol-persona/eventos-por-persona", Some(&headers)).await?;
    let rows: Vec<Value> =
        state.enrollments.read().iter().map(|id| json!({ "evento_id": id })).collect();
    ok(rows)
}

#[derive(serde::Deserialize)]
struct AssignmentBody {
    persona_id: Option<PersonaId>,
    evento_id: Option<EventoId>,
    rol_id: Option<RolId>,
    #[serde(default)]
    estado_borrado: bool,
}

async fn create_assignment(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<AssignmentBody>,
) -> Reply {
    state.begin("POST /api/evento-rol-persona", Some(&headers)).await?;

    let id = state.next_asignacion.fetch_add(1, Ordering::SeqCst) as i64;
    let row = EventoRolPersona {
        id: eventra_admin_types::AsignacionId::new(id),
        persona_id: body.persona_id,
        nombre: None,
        apellido: None,
        cedula: None,
        evento_id: body.evento_id,
        evento: None,
        rol: None,
        rol_id: body.rol_id,
        estado_borrado: body.estado_borrado,
        status: eventra_admin_types::RecordStatus::Activo,
    };
    state.assignments.write().push(row.clone());
    ok(state.denormalize(row))
}

async fn update_assignment(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<AssignmentBody>,
) -> Reply {
    state.begin("PUT /api/evento-rol-persona/:id", Some(&headers)).await?;

    let mut assignments = state.assignments.write();
    let Some(row) = assignments.iter_mut().find(|r| r.id.value() == id) else {
        return Err(failure(StatusCode::NOT_FOUND, "Asignación no encontrada"));
    };
    if body.persona_id.is_some() {
        row.persona_id = body.persona_id;
        row.nombre = None;
        row.apellido = None;
        row.cedula = None;
    }
    if body.evento_id.is_some() {
        row.evento_id = body.evento_id;
        row.evento = None;
    }
    if body.rol_id.is_some() {
        row.rol_id = body.rol_id;
        row.rol = None;
    }
    let updated = row.clone();
    drop(assignments);
    ok(state.denormalize(updated))
}

async fn soft_delete_assignment(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("DELETE /api/evento-rol-persona/:id/borrar", Some(&headers)).await?;
    set_assignment_flag(&state, id, true)
}

async fn reactivate_assignment(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("PATCH /api/evento-rol-persona/:id/activar", Some(&headers)).await?;
    set_assignment_flag(&state, id, false)
}

fn set_assignment_flag(state: &MockState, id: i64, borrado: bool) -> Reply {
    let mut assignments = state.assignments.write();
    let Some(row) = assignments.iter_mut().find(|r| r.id.value() == id) else {
        return Err(failure(StatusCode::NOT_FOUND, "Asignación no encontrada"));
    };
    row.estado_borrado = borrado;
    ok(json!({ "id": id, "estado_borrado": borrado }))
}

// ============================================================================
// Person and user handlers
// ============================================================================

async fn find_persona_by_cedula(
    State(state): State<Arc<MockState>>,
    Path(cedula): Path<String>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/persona/cedula/:cedula", Some(&headers)).await?;

    let matches: Vec<Persona> = state
        .personas
        .read()
        .iter()
        .filter(|p| p.cedula.as_deref() == Some(cedula.as_str()))
        .cloned()
        .collect();

    if matches.is_empty() && !state.cedula_empty_ok.load(Ordering::SeqCst) {
        return Err(failure(StatusCode::NOT_FOUND, "Persona no encontrada"));
    }
    ok(matches)
}

async fn list_usuarios(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/usuario", Some(&headers)).await?;
    ok(state.usuarios.read().clone())
}

async fn find_usuario(
    State(state): State<Arc<MockState>>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/usuario/:key", Some(&headers)).await?;
    let usuarios = state.usuarios.read();
    match usuarios.iter().find(|u| u.identificacion.as_deref() == Some(key.as_str())) {
        Some(user) => ok(user.clone()),
        None if state.usuario_empty_ok.load(Ordering::SeqCst) => ok(Vec::<Usuario>::new()),
        None => Err(failure(StatusCode::NOT_FOUND, "Usuario no encontrado")),
    }
}

#[derive(serde::Deserialize)]
struct UsuarioBody {
    nombre: Option<String>,
    correo: Option<String>,
    rol_id: Option<RolId>,
    estado_borrado: Option<bool>,
}

async fn update_usuario(
    State(state): State<Arc<MockState>>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UsuarioBody>,
) -> Reply {
    state.begin("PUT /api/usuario/:key", Some(&headers)).await?;

    let id: i64 = key
        .parse()
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Identificador inválido"))?;
    let mut usuarios = state.usuarios.write();
    let Some(user) = usuarios.iter_mut().find(|u| u.id.value() == id) else {
        return Err(failure(StatusCode::NOT_FOUND, "Usuario no encontrado"));
    };
    if body.nombre.is_some() {
        user.nombre = body.nombre;
    }
    if body.correo.is_some() {
        user.correo = body.correo;
    }
    if body.rol_id.is_some() {
        user.rol_id = body.rol_id;
    }
    if let Some(borrado) = body.estado_borrado {
        user.estado_borrado = borrado;
    }
    ok(user.clone())
}

async fn soft_delete_usuario(
    State(state): State<Arc<MockState>>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Reply {
    state.begin("DELETE /api/usuario/:key", Some(&headers)).await?;

    let id: i64 = key
        .parse()
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Identificador inválido"))?;
    let mut usuarios = state.usuarios.write();
    let Some(user) = usuarios.iter_mut().find(|u| u.id.value() == id) else {
        return Err(failure(StatusCode::NOT_FOUND, "Usuario no encontrado"));
    };
    user.estado_borrado = true;
    ok(json!({ "id": id, "estado_borrado": true }))
}

async fn list_roles(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/rol", Some(&headers)).await?;
    ok(state.roles.read().clone())
}

// ============================================================================
// Event-role handlers
// ============================================================================

async fn list_event_roles(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/rolEvento", Some(&headers)).await?;
    ok(state.event_roles.read().clone())
}

#[derive(serde::Deserialize)]
struct RoleBody {
    nombre: String,
}

async fn create_event_role(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<RoleBody>,
) -> Reply {
    state.begin("POST /api/rolEvento", Some(&headers)).await?;

    let id = state.next_rol.fetch_add(1, Ordering::SeqCst) as i64;
    let role = RolEvento { id: RolId::new(id), nombre: body.nombre };
    state.event_roles.write().push(role.clone());
    ok(role)
}

async fn update_event_role(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<RoleBody>,
) -> Reply {
    state.begin("PUT /api/rolEvento/:id", Some(&headers)).await?;

    let mut roles = state.event_roles.write();
    let Some(role) = roles.iter_mut().find(|r| r.id.value() == id) else {
        return Err(failure(StatusCode::NOT_FOUND, "Rol no encontrado"));
    };
    role.nombre = body.nombre;
    ok(role.clone())
}

async fn delete_event_role(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("DELETE /api/rolEvento/:id", Some(&headers)).await?;

    let in_use = state
        .assignments
        .read()
        .iter()
        .any(|r| r.rol_id.map(|rid| rid.value()) == Some(id) && !r.estado_borrado);
    if in_use {
        return Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "violates foreign key constraint",
        ));
    }
    state.event_roles.write().retain(|r| r.id.value() != id);
    ok(json!({ "id": id }))
}

// ============================================================================
// Project, team and template handlers
// ============================================================================

async fn list_proyectos(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/proyecto/proyectosPorEvento/:id", Some(&headers)).await?;
    let proyectos = state.proyectos.read();
    ok(proyectos.get(&id).cloned().unwrap_or_default())
}

async fn get_equipo(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Reply {
    state.begin("GET /api/equipos/:id", Some(&headers)).await?;
    let equipos = state.equipos.read();
    match equipos.get(&id) {
        Some(equipo) => ok(equipo.clone()),
        None => Err(failure(StatusCode::NOT_FOUND, "Equipo no encontrado")),
    }
}

async fn list_procesos(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.begin("GET /api/procesos-evaluacion-detalle", Some(&headers)).await?;
    ok(state.procesos.read().clone())
}
