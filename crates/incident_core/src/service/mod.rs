//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case level APIs.
//! - Keep HTTP/boundary layers decoupled from storage details.

pub mod incident_service;
