//! Creative Banana product photo studio
//!
//! Serves browser studio sessions: a product photo and an optional style
//! reference are uploaded, style choices are turned into a generation prompt
//! by a text model, and an image model renders the final product shot.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod intake;
pub mod queue;
pub mod response;
pub mod studio;

pub use error::{AppError, Result};

use std::sync::Arc;

use studio::StudioRegistry;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub studios: Arc<StudioRegistry>,
}
