//! Global user administration against the mock backend.

mod common;

use common::logged_in;
use eventra_admin_sdk::{
    UserFilters,
    types::{RecordStatus, Rol, RolId, Usuario, UsuarioId},
};

fn usuario(id: i64, ident: &str, rol: i64, borrado: bool) -> Usuario {
    Usuario {
        id: UsuarioId::new(id),
        nombre: Some(format!("Usuario {id}")),
        correo: None,
        identificacion: Some(ident.to_owned()),
        rol_id: Some(RolId::new(rol)),
        estado_borrado: borrado,
    }
}

#[tokio::test]
async fn test_fetch_users_lists_everyone() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![usuario(1, "101", 2, false), usuario(2, "102", 3, true)]);

    assert!(client.global_users().fetch_users().await);
    assert_eq!(client.global_users().users().len(), 2);
    assert_eq!(client.global_users().error(), None);
}

#[tokio::test]
async fn test_filters_apply_client_side() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![
        usuario(1, "101", 2, false),
        usuario(2, "102", 3, false),
        usuario(3, "103", 2, true),
    ]);
    assert!(client.global_users().fetch_users().await);

    client.global_users().set_filters(UserFilters {
        role: Some(RolId::new(2)),
        status: Some(RecordStatus::Activo),
    });

    let filtered = client.global_users().filtered_users();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, UsuarioId::new(1));
    assert_eq!(client.global_users().current_page(), 1);
    assert_eq!(client.global_users().total_pages(), 1);
}

#[tokio::test]
async fn test_search_by_identificacion_found() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![usuario(1, "101", 2, false)]);

    let found = client.global_users().search_by_identificacion("101").await.unwrap();
    assert_eq!(found.id, UsuarioId::new(1));
    assert_eq!(client.global_users().error(), None);
}

#[tokio::test]
async fn test_search_by_identificacion_not_found_names_the_value() {
    let (_server, client) = logged_in().await;

    let found = client.global_users().search_by_identificacion("999").await;
    assert!(found.is_none());
    assert_eq!(
        client.global_users().error().as_deref(),
        Some("No se encontró ningún usuario con la identificación: 999")
    );
}

#[tokio::test]
async fn test_search_empty_200_is_silent() {
    let (server, client) = logged_in().await;
    server.set_usuario_empty_ok(true);

    let found = client.global_users().search_by_identificacion("999").await;
    assert!(found.is_none());
    assert_eq!(client.global_users().error(), None);
}

#[tokio::test]
async fn test_refetch_keeps_filtered_total() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![
        usuario(1, "101", 2, false),
        usuario(2, "102", 3, false),
        usuario(3, "103", 2, false),
    ]);
    assert!(client.global_users().fetch_users().await);

    client.global_users().set_filters(UserFilters { role: Some(RolId::new(2)), status: None });
    assert_eq!(client.global_users().total_pages(), 1);

    // A refetch with filters active keeps the total over the filtered list:
    // 25 accounts, 10 of them with the filtered role.
    server.set_usuarios(
        (1..=25)
            .map(|i| usuario(i, &format!("{i}"), if i <= 10 { 2 } else { 3 }, false))
            .collect(),
    );
    assert!(client.global_users().fetch_users().await);
    assert_eq!(client.global_users().filtered_users().len(), 10);
    assert_eq!(client.global_users().total_pages(), 1);
}

#[tokio::test]
async fn test_set_status_refetches() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![usuario(1, "101", 2, false)]);
    assert!(client.global_users().fetch_users().await);

    assert!(client.global_users().set_status(UsuarioId::new(1), true).await);

    let users = client.global_users().users();
    assert!(users[0].estado_borrado);
    // One initial fetch plus one refetch after the write.
    assert_eq!(server.hits("GET /api/usuario"), 2);
}

#[tokio::test]
async fn test_delete_user_soft_deletes_and_refetches() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![usuario(1, "101", 2, false)]);

    assert!(client.global_users().delete_user(UsuarioId::new(1)).await);

    let users = client.global_users().users();
    assert_eq!(users.len(), 1);
    assert!(users[0].estado_borrado);
}

#[tokio::test]
async fn test_update_user_applies_payload() {
    let (server, client) = logged_in().await;
    server.set_usuarios(vec![usuario(1, "101", 2, false)]);

    let ok = client
        .global_users()
        .update_user(UsuarioId::new(1), serde_json::json!({ "nombre": "Renombrado" }))
        .await;
    assert!(ok);
    assert_eq!(client.global_users().users()[0].nombre.as_deref(), Some("Renombrado"));
}

#[tokio::test]
async fn test_fetch_roles_populates_catalog() {
    let (server, client) = logged_in().await;
    server.set_roles(vec![Rol { id: RolId::new(8), nombre: "SuperAdmin".to_owned() }]);

    assert!(client.global_users().fetch_roles().await);
    assert_eq!(client.global_users().roles().len(), 1);
}

#[tokio::test]
async fn test_page_users_slices_filtered_list() {
    let (server, client) = logged_in().await;
    server.set_usuarios((1..=15).map(|i| usuario(i, &format!("{i}"), 2, false)).collect());
    assert!(client.global_users().fetch_users().await);

    assert_eq!(client.global_users().page_users().len(), 10);
    client.global_users().set_page(2);
    assert_eq!(client.global_users().page_users().len(), 5);

    client.global_users().set_items_per_page(4);
    assert_eq!(client.global_users().current_page(), 1);
    assert_eq!(client.global_users().page_users().len(), 4);
}
