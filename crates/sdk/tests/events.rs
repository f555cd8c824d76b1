//! Event store behavior against the mock backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{evento, logged_in};
use eventra_admin_sdk::types::{CronogramaEntrada, EventoCronograma, EventoId};

#[tokio::test]
async fn test_fetch_page_populates_items_and_total() {
    let (server, client) = logged_in().await;
    server.set_eventos((1..=25).map(|i| evento(i, &format!("Evento {i}"))).collect());

    assert!(client.events().fetch_page().await);

    let events = client.events().events();
    assert_eq!(events.len(), 20);
    assert_eq!(client.events().total_count(), 25);
    assert_eq!(client.events().total_pages(), 2);
    assert!(!client.events().loading());
    assert_eq!(client.events().error(), None);
}

#[tokio::test]
async fn test_second_page_uses_offset() {
    let (server, client) = logged_in().await;
    server.set_eventos((1..=25).map(|i| evento(i, &format!("Evento {i}"))).collect());

    client.events().set_page(2);
    assert!(client.events().fetch_page().await);

    let events = client.events().events();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].id, EventoId::new(21));
}

#[tokio::test]
async fn test_empty_listing_settles_cleanly() {
    let (_server, client) = logged_in().await;

    assert!(client.events().fetch_page().await);

    assert!(client.events().events().is_empty());
    assert_eq!(client.events().total_pages(), 0);
    assert!(!client.events().loading());
    assert_eq!(client.events().error(), None);
}

#[tokio::test]
async fn test_search_filters_and_encodes() {
    let (server, client) = logged_in().await;
    server.set_eventos(vec![
        evento(1, "Feria de ciencias"),
        evento(2, "Hackathon"),
        evento(3, "Feria gastronómica"),
    ]);

    client.events().set_search_query(Some("feria".to_owned()));
    assert!(client.events().fetch_page().await);

    assert_eq!(client.events().events().len(), 2);
    assert_eq!(client.events().total_count(), 2);
}

#[tokio::test]
async fn test_changing_page_size_resets_to_first_page() {
    let (_server, client) = logged_in().await;

    client.events().set_page(3);
    assert_eq!(client.events().current_page(), 3);

    client.events().set_items_per_page(50);
    assert_eq!(client.events().current_page(), 1);
    assert_eq!(client.events().items_per_page(), 50);
}

#[tokio::test]
async fn test_server_failure_clears_items_and_records_error() {
    let (server, client) = logged_in().await;
    server.set_eventos(vec![evento(1, "Evento")]);
    assert!(client.events().fetch_page().await);
    assert_eq!(client.events().events().len(), 1);

    server.inject_failures(1, 500);
    assert!(!client.events().fetch_page().await);

    assert!(client.events().events().is_empty());
    assert_eq!(client.events().total_count(), 0);
    let error = client.events().error().unwrap();
    assert!(error.starts_with("Error al cargar los eventos:"), "{error}");
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let (server, client) = common::anonymous().await;

    assert!(!client.events().fetch_page().await);

    assert_eq!(server.request_count(), 0);
    assert_eq!(
        client.events().error().as_deref(),
        Some("Token de autenticación no encontrado.")
    );
}

#[tokio::test]
async fn test_superseded_fetch_never_overwrites_newer_result() {
    let (server, client) = logged_in().await;
    server.set_eventos(vec![evento(1, "Alpha"), evento(2, "Beta")]);
    let client = Arc::new(client);

    // First fetch is slow and narrowed to one match.
    client.events().set_search_query(Some("alpha".to_owned()));
    server.inject_delay(150);
    let slow = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.events().fetch_page().await })
    };

    tokio::time::sleep(Duration::from_millis(40)).await;
    server.inject_delay(0);

    // Second fetch supersedes the first and sees both events.
    client.events().set_search_query(None);
    assert!(client.events().fetch_page().await);

    assert!(!slow.await.unwrap());
    assert_eq!(client.events().events().len(), 2);
    assert_eq!(client.events().total_count(), 2);
    assert_eq!(client.events().error(), None);
}

#[tokio::test]
async fn test_public_listings_need_no_token() {
    let (server, client) = common::anonymous().await;
    server.set_proximos(vec![evento(1, "Próximo")]);
    server.set_ultimos(vec![evento(2, "Último"), evento(3, "Anterior")]);

    assert!(client.events().fetch_proximos().await);
    assert_eq!(client.events().events().len(), 1);
    assert_eq!(client.events().total_count(), 1);

    assert!(client.events().fetch_ultimos().await);
    assert_eq!(client.events().all_events().len(), 2);
}

#[tokio::test]
async fn test_unpaged_listing_is_independent_of_pagination() {
    let (server, client) = logged_in().await;
    server.set_eventos((1..=30).map(|i| evento(i, &format!("Evento {i}"))).collect());

    assert!(client.events().fetch_page().await);
    assert!(client.events().fetch_all_unpaged().await);

    assert_eq!(client.events().events().len(), 20);
    assert_eq!(client.events().all_events().len(), 30);
    assert!(!client.events().loading_all());
    assert_eq!(client.events().all_events_error(), None);
}

#[tokio::test]
async fn test_detail_for_edit_roundtrip() {
    let (server, client) = logged_in().await;
    server.set_evento_detail(EventoCronograma {
        evento: evento(7, "Congreso"),
        cronogramas: vec![CronogramaEntrada {
            id: Some(1),
            descripcion: Some("Apertura".to_owned()),
            fecha: None,
            hora_inicio: Some("09:00".to_owned()),
            hora_fin: Some("10:00".to_owned()),
        }],
    });

    let detail = client.events().fetch_detail_for_edit(EventoId::new(7)).await.unwrap();
    assert_eq!(detail.evento.nombre, "Congreso");
    assert_eq!(detail.cronogramas.len(), 1);
    assert!(client.events().current_for_edit().is_some());

    client.events().clear_current_for_edit();
    assert!(client.events().current_for_edit().is_none());
}

#[tokio::test]
async fn test_detail_for_missing_event_records_error() {
    let (_server, client) = logged_in().await;

    let detail = client.events().fetch_detail_for_edit(EventoId::new(99)).await;
    assert!(detail.is_none());
    let error = client.events().error().unwrap();
    assert!(error.starts_with("Error al cargar detalles del evento:"), "{error}");
}
