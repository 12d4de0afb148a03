//! # Command Layer
//!
//! The **core business logic** of the catalog. Each entity store lives in its
//! own submodule as plain functions generic over [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! - Validate caller input (names, quantities, value slots)
//! - Ask the [`Enforcer`](crate::integrity::Enforcer) to check references,
//!   types and cascades
//! - Run every mutation as one [`transact`](crate::store::DataStore::transact)
//!   call, so a failed check leaves nothing behind
//! - Log committed mutations with `tracing`
//!
//! Commands never print, parse arguments or choose exit codes. They return
//! entities or a [`CatalogError`](crate::error::CatalogError) and let the
//! caller decide.
//!
//! ## Testing Strategy
//!
//! **This is where most tests live.** Command tests run against
//! `InMemoryStore` and the `LabFixture` catalog, covering every error kind
//! a command can return.
//!
//! ## Command Modules
//!
//! - [`categories`]: category CRUD and the full cascade delete
//! - [`features`]: typed feature definitions
//! - [`resources`]: inventory items
//! - [`feature_values`]: typed values binding a resource to a feature
//! - [`doctor`]: remove dangling and mistyped records
//! - [`seed`]: demo data

pub mod categories;
pub mod doctor;
pub mod feature_values;
pub mod features;
pub mod resources;
pub mod seed;
