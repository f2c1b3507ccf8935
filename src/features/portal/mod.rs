//! The patient portal feature.
//!
//! Holds every piece of client-side state and the controller that applies
//! user intents to it:
//!
//! - [`store`] - cached snapshot of the server's document collection
//! - [`selection`] - the single staged-for-upload file
//! - [`notifications`] - the transient status message slot
//! - [`controller`] - the state machine wiring intents to the service client
//! - [`view`] - pure rendering of the current state
//! - [`downloads`] - persistence of fetched document bytes

pub mod commands;
pub mod controller;
pub mod downloads;
pub mod notifications;
pub mod selection;
pub mod store;
pub mod view;
