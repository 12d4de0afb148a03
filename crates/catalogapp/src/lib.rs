//! # Catalog Architecture
//!
//! `catalogapp` is a **UI-agnostic typed-attribute catalog**. Categories
//! group typed feature definitions and inventory resources; feature values
//! attach one typed value to a (resource, feature) pair. The `catalog` binary
//! is one client of this library, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns store + Enforcer         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per entity store                              │
//! │  - Every mutation is a single transaction                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Integrity Enforcer (integrity.rs)                          │
//! │  - Reference checks, type checks, cascades                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, CatalogStore over a StorageBackend      │
//! │  - FsBackend (JSON file), MemBackend (tests, ephemeral)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout or stderr and never
//! exits the process. Diagnostics go through `tracing`; installing a
//! subscriber is the client's job.
//!
//! ## Example
//!
//! ```
//! use catalogapp::api::CatalogApi;
//! use catalogapp::model::{NewFeature, NewResource};
//! use catalogapp::store::memory::InMemoryStore;
//! use catalogapp::values::{ValueSlots, ValueType};
//!
//! let api = CatalogApi::new(InMemoryStore::new());
//! let lab = api.create_category("Lab").unwrap();
//! let voltage = api
//!     .create_feature(NewFeature::new("Voltage", ValueType::String, lab.id))
//!     .unwrap();
//! let meter = api.create_resource(NewResource::new("Meter", 3, lab.id)).unwrap();
//! api.create_feature_value(meter.id, voltage.id, ValueSlots::string("220V"))
//!     .unwrap();
//!
//! // Deleting the category takes everything with it
//! let removed = api.delete_category(lab.id).unwrap();
//! assert_eq!(removed.len(), 4);
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod init;
pub mod integrity;
pub mod model;
pub mod store;
pub mod validation;
pub mod values;
