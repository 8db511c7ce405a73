//! Persistence store for the project collection.
//!
//! # Responsibility
//! - Own read-modify-write of the whole collection under one storage key.
//! - Own id generation, timestamps, defaulting and borehole-code derivation.
//!
//! # Invariants
//! - Writes validate records before persistence.
//! - Failed reads degrade to an empty collection; failed writes surface as
//!   `StoreError`.

pub mod defaults;
pub mod project_store;
pub mod schema;
