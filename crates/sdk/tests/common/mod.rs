//! Shared fixtures for the integration suite.
#![allow(dead_code)]

use eventra_admin_sdk::{
    AdminClient, ClientConfig,
    mock::MockAdminServer,
    types::{
        AsignacionId, Equipo, EquipoId, Evento, EventoId, EventoRolPersona, PersonaId, Proyecto,
        ProyectoId, RecordStatus, RolId,
    },
};

/// Starts a mock server and a client logged in with the standard identity.
pub async fn logged_in() -> (MockAdminServer, AdminClient) {
    let (server, client) = anonymous().await;
    client.login(server.token(), MockAdminServer::test_identity()).unwrap();
    (server, client)
}

/// Starts a mock server and a client with no session.
pub async fn anonymous() -> (MockAdminServer, AdminClient) {
    let server = MockAdminServer::start().await.unwrap();
    let config = ClientConfig::builder().with_base_url(server.endpoint()).build().unwrap();
    let client = AdminClient::new(config).unwrap();
    (server, client)
}

pub fn evento(id: i64, nombre: &str) -> Evento {
    Evento {
        id: EventoId::new(id),
        nombre: nombre.to_owned(),
        descripcion: None,
        fecha_inicio: None,
        fecha_fin: None,
        estado_borrado: false,
    }
}

pub fn assignment(id: i64, persona: i64, evento: i64, rol: i64, borrado: bool) -> EventoRolPersona {
    EventoRolPersona {
        id: AsignacionId::new(id),
        persona_id: Some(PersonaId::new(persona)),
        nombre: None,
        apellido: None,
        cedula: None,
        evento_id: Some(EventoId::new(evento)),
        evento: None,
        rol: None,
        rol_id: Some(RolId::new(rol)),
        estado_borrado: borrado,
        status: RecordStatus::Activo,
    }
}

pub fn proyecto(id: i64, evento: i64, equipo: Option<i64>) -> Proyecto {
    Proyecto {
        id: ProyectoId::new(id),
        nombre: format!("Proyecto {id}"),
        descripcion: None,
        evento_id: EventoId::new(evento),
        equipo_id: equipo.map(EquipoId::new),
        equipo: Vec::new(),
    }
}

pub fn equipo(id: i64, nombre: &str) -> Equipo {
    Equipo { id: Some(EquipoId::new(id)), nombre: nombre.to_owned(), estado_borrado: false }
}
