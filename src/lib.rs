// src/lib.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use services::formatador::{format_report, ReportSink, TracingSink};
pub use services::validacao_service::{validate_post_generation, validate_request};
