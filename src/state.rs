// src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;

// O validador não guarda estado entre pedidos; só a configuração é partilhada
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// Permite extrair a configuração diretamente
impl axum::extract::FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Arc<AppConfig> {
        state.config.clone()
    }
}
