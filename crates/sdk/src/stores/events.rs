//! Event store: paginated listing, unpaginated cross-reference list, and the
//! current-for-edit detail slot.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventra_admin_types::{Evento, EventoCronograma, EventoId, Paged};
use parking_lot::RwLock;

use crate::{
    pagination::PageState,
    stores::{store_error, AUTH_TOKEN_MISSING},
    transport::{encode_query, ApiTransport},
};

/// Default page size for the events listing.
const EVENTS_PER_PAGE: u32 = 20;

#[derive(Debug, Default)]
struct ListSlot {
    items: Vec<Evento>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug)]
struct EventState {
    /// Paginated view.
    events: Vec<Evento>,
    page: PageState,
    loading: bool,
    error: Option<String>,
    /// Unpaginated list for autocomplete/cross-referencing; independent flags
    /// so the two views never interfere.
    all_events: ListSlot,
    /// Expanded record for the edit flow; distinct from the list so editing
    /// never disturbs pagination.
    current_for_edit: Option<EventoCronograma>,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            page: PageState::new(EVENTS_PER_PAGE),
            loading: false,
            error: None,
            all_events: ListSlot::default(),
            current_for_edit: None,
        }
    }
}

/// State container for events.
pub struct EventStore {
    transport: Arc<ApiTransport>,
    state: RwLock<EventState>,
    /// Generation tag for the paginated slot.
    list_seq: AtomicU64,
    /// Generation tag for the unpaginated slot.
    all_seq: AtomicU64,
}

impl EventStore {
    pub(crate) fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            state: RwLock::new(EventState::default()),
            list_seq: AtomicU64::new(0),
            all_seq: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Paginated listing
    // ------------------------------------------------------------------

    /// Fetches the current page, replacing items and total wholesale.
    ///
    /// A call that is superseded before its response lands returns `false`
    /// without touching state or recording an error.
    pub async fn fetch_page(&self) -> bool {
        let seq = self.list_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let path = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;

            let mut path = format!(
                "eventos/limit-offset?limit={}&offset={}",
                state.page.items_per_page(),
                state.page.offset()
            );
            if let Some(query) = state.page.search_query() {
                path.push_str("&search=");
                path.push_str(&encode_query(query));
            }
            path
        };

        let result = self.transport.get_json::<Paged<Evento>>(&path, true).await;

        if self.list_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "event page fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(page) => {
                state.events = page.data;
                state.page.set_total_count(page.total);
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching event page failed");
                state.events = Vec::new();
                state.page.set_total_count(0);
                state.error = store_error("Error al cargar los eventos", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    /// Fetches upcoming events into the paginated slot. Public endpoint, no
    /// token required.
    pub async fn fetch_proximos(&self) -> bool {
        let seq = self.list_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.transport.get_json::<Vec<Evento>>("eventos/proximos", false).await;

        if self.list_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "upcoming-events fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(events) => {
                state.page.set_total_count(events.len() as u64);
                state.events = events;
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching upcoming events failed");
                state.events = Vec::new();
                state.page.set_total_count(0);
                state.error =
                    store_error("Error al cargar los próximos eventos", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    // ------------------------------------------------------------------
    // Unpaginated cross-reference list
    // ------------------------------------------------------------------

    /// Fetches every event into the separate unpaginated slot.
    pub async fn fetch_all_unpaged(&self) -> bool {
        let seq = self.all_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.all_events.loading = true;
            state.all_events.error = None;
        }

        let result = self.transport.get_json::<Vec<Evento>>("eventos", true).await;

        if self.all_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "all-events fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.all_events.loading = false;
        match result {
            Ok(events) => {
                state.all_events.items = events;
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching all events failed");
                state.all_events.items = Vec::new();
                state.all_events.error =
                    store_error("Error al cargar todos los eventos", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    /// Fetches the latest events into the unpaginated slot. Public endpoint.
    pub async fn fetch_ultimos(&self) -> bool {
        let seq = self.all_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.all_events.loading = true;
            state.all_events.error = None;
        }

        let result = self.transport.get_json::<Vec<Evento>>("eventos/ultimos", false).await;

        if self.all_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "latest-events fetch superseded");
            return false;
        }

        let mut state = self.state.write();
        state.all_events.loading = false;
        match result {
            Ok(events) => {
                state.all_events.items = events;
                true
            },
            Err(err) => {
                tracing::error!(error = %err, "fetching latest events failed");
                state.all_events.items = Vec::new();
                state.all_events.error =
                    store_error("Error al cargar los últimos eventos", AUTH_TOKEN_MISSING, &err);
                false
            },
        }
    }

    // ------------------------------------------------------------------
    // Detail-for-edit slot
    // ------------------------------------------------------------------

    /// Fetches the expanded record (event + schedule) into the edit slot.
    pub async fn fetch_detail_for_edit(&self, id: EventoId) -> Option<EventoCronograma> {
        {
            let mut state = self.state.write();
            state.loading = true;
        }

        let path = format!("eventos-cronogramas/{}", id.value());
        let result = self.transport.get_json::<EventoCronograma>(&path, true).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(detail) => {
                state.current_for_edit = Some(detail.clone());
                Some(detail)
            },
            Err(err) => {
                tracing::error!(error = %err, evento = %id, "fetching event detail failed");
                state.error =
                    store_error("Error al cargar detalles del evento", AUTH_TOKEN_MISSING, &err);
                None
            },
        }
    }

    /// Drops the edit slot.
    pub fn clear_current_for_edit(&self) {
        self.state.write().current_for_edit = None;
    }

    // ------------------------------------------------------------------
    // Pagination controls and accessors
    // ------------------------------------------------------------------

    /// Moves to the given page; takes effect on the next fetch.
    pub fn set_page(&self, page: u32) {
        self.state.write().page.set_page(page);
    }

    /// Changes the page size and resets to page 1.
    pub fn set_items_per_page(&self, per_page: u32) {
        self.state.write().page.set_items_per_page(per_page);
    }

    /// Replaces the search term applied by the next fetch.
    pub fn set_search_query(&self, query: Option<String>) {
        self.state.write().page.set_search_query(query);
    }

    /// Snapshot of the current page's events.
    #[must_use]
    pub fn events(&self) -> Vec<Evento> {
        self.state.read().events.clone()
    }

    /// Snapshot of the unpaginated list.
    #[must_use]
    pub fn all_events(&self) -> Vec<Evento> {
        self.state.read().all_events.items.clone()
    }

    /// Current edit-slot record, if loaded.
    #[must_use]
    pub fn current_for_edit(&self) -> Option<EventoCronograma> {
        self.state.read().current_for_edit.clone()
    }

    /// True while a paginated/detail operation is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Last error of the paginated slot.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// True while the unpaginated slot is loading.
    #[must_use]
    pub fn loading_all(&self) -> bool {
        self.state.read().all_events.loading
    }

    /// Last error of the unpaginated slot.
    #[must_use]
    pub fn all_events_error(&self) -> Option<String> {
        self.state.read().all_events.error.clone()
    }

    /// Current 1-based page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.read().page.current_page()
    }

    /// Page size.
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.state.read().page.items_per_page()
    }

    /// Backend-reported total across pages.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.state.read().page.total_count()
    }

    /// `ceil(total / per_page)`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.state.read().page.total_pages()
    }
}
