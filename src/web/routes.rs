// src/web/routes.rs
use crate::{state::AppState, web::validacao_handlers};
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    let validacao_routes = Router::new()
        // Resultado estruturado (JSON)
        .route("/validacao", post(validacao_handlers::handle_validar))
        // Relatório em texto
        .route("/validacao/relatorio", post(validacao_handlers::handle_relatorio));

    Router::new()
        .route("/health", get(validacao_handlers::handle_health))
        .merge(validacao_routes)
        .with_state(app_state)
}
