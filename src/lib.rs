//! Core library for the campaign desk client.
//!
//! This crate exposes the domain model, campaign form handling, the remote
//! data gateway and the page controllers used by a campaign-management
//! frontend. The composition root (routing, rendering, charting) lives in
//! the host application; it injects the capabilities the controllers need
//! and subscribes to their state.

pub mod controllers;
pub mod domain;
pub mod forms;
pub mod gateway;
