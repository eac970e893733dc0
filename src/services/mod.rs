// src/services/mod.rs
pub mod formatador;
pub mod regras;
pub mod relatorio_corretor;
pub mod semana;
pub mod validacao_service;
