//! HTTP API - Routes and handlers for studio sessions

pub mod handlers;
pub mod routes;
