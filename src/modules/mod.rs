//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the HTTP client for the remote document service.

pub mod api;
