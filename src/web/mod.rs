// src/web/mod.rs
pub mod routes;
pub mod validacao_handlers;
