//! Users API with bearer-token authentication, per-route authorization guards
//! and parameterized partial updates.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
