//! Curling match orchestration
//!
//! A turn-based match between a human side and a computer side, driven as a
//! finite-state machine of eight phases. The engine sequences piece loading,
//! shots, set scoring and match termination, and routes input to whichever
//! phase is active. Physics, rendering, scoring rules and persistence are
//! collaborators behind traits; `sim` provides headless implementations.

pub mod ai;
pub mod collab;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod sim;

pub use error::{CurlingError, Result};
