//! Core domain and services for EduTrackr.
//!
//! No UI code lives here: this crate owns configuration, the
//! identity/role model, the login flow state machine, the Gemini-backed
//! study service, and the demo data sets that back every screen.

pub mod config;
pub mod demo;
pub mod identity;
pub mod login;
pub mod study;
