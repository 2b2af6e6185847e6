//! # showcase-store
//!
//! The contract the showcase core requires from the remote relational store, and the
//! typed mapping boundary on top of it.
//!
//! ## Layers
//!
//! - [`RemoteStore`]: entity-generic `select` / `count` / `insert` / `delete` / `update`
//!   over untyped [`Record`]s. Any request/response store with these semantics fits.
//! - [`Repository`]: typed reads and writes. Joined relations are resolved here, once,
//!   into `Option<_>` fields of the models.
//! - [`StoreClient`]: decorator applying the configured request timeout.
//! - [`InMemoryStore`]: backend holding rows in memory and enforcing uniqueness, used by
//!   tests and demos.
//!
//! ```rust,ignore
//! use showcase_store::{Entity, InMemoryStore, Query, RemoteStore};
//!
//! let store = InMemoryStore::new();
//! let rows = store
//! 	.select(&Query::new(Entity::Projects).eq("is_published", true).order_desc("created_at").limit(20))
//! 	.await?;
//! ```

pub mod client;
pub mod entity;
pub mod error;
pub mod memory;
pub mod query;
pub mod record;
pub mod repository;
pub mod store;

pub use client::StoreClient;
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryStore, StoreOperation};
pub use query::{Direction, Filter, Include, OrderBy, Query};
pub use record::{Record, fields};
pub use repository::{ProjectCounter, Repository};
pub use store::RemoteStore;
