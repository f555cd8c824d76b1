//! Event participant management against the mock backend.

mod common;

use common::{assignment, evento, logged_in};
use eventra_admin_sdk::types::{
    AsignacionId, EventoId, Persona, PersonaId, RecordStatus, RolEvento, RolId,
};

fn persona(id: i64, cedula: &str) -> Persona {
    Persona {
        id: PersonaId::new(id),
        nombre: Some("Ana".to_owned()),
        apellido: Some("Mora".to_owned()),
        cedula: Some(cedula.to_owned()),
        correo: None,
    }
}

#[tokio::test]
async fn test_fetch_users_derives_status() {
    let (server, client) = logged_in().await;
    server.add_assignment(assignment(1, 10, 5, 2, false));
    server.add_assignment(assignment(2, 11, 5, 2, true));

    assert!(client.event_users().fetch_users().await);

    let users = client.event_users().users();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].status, RecordStatus::Activo);
    assert_eq!(users[1].status, RecordStatus::Inactivo);
}

#[tokio::test]
async fn test_deactivate_then_activate_patches_in_place() {
    let (server, client) = logged_in().await;
    server.add_assignment(assignment(1, 10, 5, 2, false));
    assert!(client.event_users().fetch_users().await);
    let list_hits = server.hits("GET /api/evento-rol-persona/detalles");

    assert!(client.event_users().deactivate_user(AsignacionId::new(1)).await);
    let users = client.event_users().users();
    assert!(users[0].estado_borrado);
    assert_eq!(users[0].status, RecordStatus::Inactivo);

    assert!(client.event_users().activate_user(AsignacionId::new(1)).await);
    let users = client.event_users().users();
    assert!(!users[0].estado_borrado);
    assert_eq!(users[0].status, RecordStatus::Activo);

    // Both toggles patch locally; no refetch of the listing.
    assert_eq!(server.hits("GET /api/evento-rol-persona/detalles"), list_hits);
    assert_eq!(server.hits("DELETE /api/evento-rol-persona/:id/borrar"), 1);
    assert_eq!(server.hits("PATCH /api/evento-rol-persona/:id/activar"), 1);

    // And the server agrees with the final state.
    assert!(!server.assignments()[0].estado_borrado);
}

#[tokio::test]
async fn test_cedula_search_found() {
    let (server, client) = logged_in().await;
    server.add_persona(persona(10, "1-2345-6789"));

    let found = client.event_users().search_person_by_cedula("1-2345-6789").await.unwrap();
    assert_eq!(found.id, PersonaId::new(10));
    assert_eq!(client.event_users().error(), None);
}

#[tokio::test]
async fn test_cedula_search_not_found_records_exact_message() {
    let (_server, client) = logged_in().await;

    let found = client.event_users().search_person_by_cedula("0-0000-0000").await;
    assert!(found.is_none());
    assert_eq!(
        client.event_users().error().as_deref(),
        Some("Persona no encontrada con la cédula especificada.")
    );
}

#[tokio::test]
async fn test_cedula_search_empty_200_is_silent() {
    let (server, client) = logged_in().await;
    server.set_cedula_empty_ok(true);

    let found = client.event_users().search_person_by_cedula("0-0000-0000").await;
    assert!(found.is_none());
    assert_eq!(client.event_users().error(), None);
}

#[tokio::test]
async fn test_add_user_refetches_listing() {
    let (server, client) = logged_in().await;
    server.set_eventos(vec![evento(5, "Feria")]);
    server.add_persona(persona(10, "1-2345-6789"));
    server.set_event_roles(vec![RolEvento { id: RolId::new(2), nombre: "Gestor".to_owned() }]);

    let ok = client
        .event_users()
        .add_user_to_event(PersonaId::new(10), EventoId::new(5), RolId::new(2))
        .await;
    assert!(ok);

    let users = client.event_users().users();
    assert_eq!(users.len(), 1);
    // Denormalized columns come from the refetched listing.
    assert_eq!(users[0].nombre.as_deref(), Some("Ana"));
    assert_eq!(users[0].evento.as_deref(), Some("Feria"));
    assert_eq!(users[0].rol.as_deref(), Some("Gestor"));
}

#[tokio::test]
async fn test_edit_assignment_refetches_listing() {
    let (server, client) = logged_in().await;
    server.set_eventos(vec![evento(5, "Feria"), evento(6, "Congreso")]);
    server.add_assignment(assignment(1, 10, 5, 2, false));
    assert!(client.event_users().fetch_users().await);

    let ok = client
        .event_users()
        .edit_assignment(AsignacionId::new(1), PersonaId::new(10), EventoId::new(6), RolId::new(3))
        .await;
    assert!(ok);

    let users = client.event_users().users();
    assert_eq!(users[0].evento_id, Some(EventoId::new(6)));
    assert_eq!(users[0].rol_id, Some(RolId::new(3)));
}

#[tokio::test]
async fn test_role_catalog_crud() {
    let (server, client) = logged_in().await;
    server.set_event_roles(vec![RolEvento { id: RolId::new(1), nombre: "Juez".to_owned() }]);

    assert!(client.event_users().fetch_roles().await);
    assert_eq!(client.event_users().roles().len(), 1);

    assert!(client.event_users().create_role("Mentor").await);
    let roles = client.event_users().roles();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].nombre, "Mentor");

    assert!(client.event_users().update_role(RolId::new(1), "Jurado").await);
    assert_eq!(client.event_users().roles()[0].nombre, "Jurado");

    assert!(client.event_users().delete_role(RolId::new(1)).await);
    let roles = client.event_users().roles();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].nombre, "Mentor");
}

#[tokio::test]
async fn test_delete_assigned_role_keeps_it_with_message() {
    let (server, client) = logged_in().await;
    server.set_event_roles(vec![RolEvento { id: RolId::new(2), nombre: "Gestor".to_owned() }]);
    server.add_assignment(assignment(1, 10, 5, 2, false));
    assert!(client.event_users().fetch_roles().await);

    assert!(!client.event_users().delete_role(RolId::new(2)).await);

    assert_eq!(client.event_users().roles().len(), 1);
    assert_eq!(
        client.event_users().error().as_deref(),
        Some("El rol está asignado a una persona y no puede ser eliminado.")
    );
}

#[tokio::test]
async fn test_client_side_pagination_slices() {
    let (server, client) = logged_in().await;
    for i in 1..=12 {
        server.add_assignment(assignment(i, 100 + i, 5, 2, false));
    }

    assert!(client.event_users().fetch_users().await);
    assert_eq!(client.event_users().total_pages(), 2);
    assert_eq!(client.event_users().page_users().len(), 10);

    client.event_users().set_page(2);
    let page = client.event_users().page_users();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, AsignacionId::new(11));
}
