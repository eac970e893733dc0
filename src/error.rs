// src/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuração inválida: {0}")]
    Config(String),

    // Corpo JSON que não corresponde ao contrato de entrada
    #[error("Pedido inválido: {0}")]
    InvalidPayload(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::InvalidPayload(_) => {
                tracing::warn!("Pedido rejeitado: {}", self);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_) => {
                tracing::error!("Erro processado: {:?}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Detalhes internos não vão para o cliente
        let message = match &self {
            AppError::InvalidPayload(_) => self.to_string(),
            _ => "Ocorreu um erro inesperado.".to_string(),
        };

        (status, Json(json!({ "erro": message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
