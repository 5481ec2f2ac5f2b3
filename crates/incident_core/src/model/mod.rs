//! Incident domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Hold the only definition of the status/source enumerations.
//!
//! # Invariants
//! - Every persisted incident is identified by a store-assigned `IncidentId`.
//! - Incidents are never deleted by core.

pub mod incident;
