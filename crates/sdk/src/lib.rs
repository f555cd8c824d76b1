//! Rust SDK for the Eventra admin API.
//!
//! Typed, async data-access layer for event-management back offices: session
//! handling, per-resource stores with interior-mutable state snapshots, and
//! pure permission checks, all backed by one shared HTTP transport.
//!
//! # Features
//!
//! - **Type-safe API**: typed identifiers and wire entities for every resource
//! - **Store-per-resource**: events, participants, users, projects, templates
//! - **Stale-response protection**: superseded list fetches never overwrite
//!   newer results
//! - **Per-event caching**: project and template lists fetch once per event
//! - **Session persistence**: pluggable storage with a file-backed default
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eventra_admin_sdk::{AdminClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> eventra_admin_sdk::Result<()> {
//!     let config = ClientConfig::builder()
//!         .with_base_url("https://eventra.example.org")
//!         .build()?;
//!
//!     let client = AdminClient::new(config)?;
//!     client.login("token", identity)?;
//!
//!     client.events().fetch_page().await;
//!     for evento in client.events().events() {
//!         println!("{}: {}", evento.id, evento.nombre);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  AdminClient (Public API)                   │
//! │  .events() │ .event_users() │ .projects() │ .permissions()  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        Store Layer                          │
//! │  Snapshot accessors │ Fetch generations │ Keyed caches      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      Session Context                        │
//! │  Token │ Identity │ Event-role hints │ Pluggable storage    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      ApiTransport                           │
//! │  Bearer auth │ JSON codec │ Error normalization (reqwest)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod client;
mod config;
mod error;
pub mod mock;
mod pagination;
mod permissions;
mod session;
mod stores;
mod transport;

// Public API exports
pub use client::AdminClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, Result};
pub use pagination::PageState;
pub use permissions::{PermissionEvaluator, can_edit_project, is_super_admin};
pub use session::{
    FileSessionStorage, MemorySessionStorage, PersistedSession, SessionContext, SessionStorage,
};
pub use stores::{
    EnrollmentStore, EventStore, EventUserStore, GlobalUserStore, ProjectStore, TemplateStore,
    UserFilters,
};
pub use transport::ApiTransport;

// Re-export the domain types so applications need only one dependency.
pub use eventra_admin_types as types;
