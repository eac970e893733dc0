// src/models/mod.rs
pub mod escala;
pub mod validacao;
