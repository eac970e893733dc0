// src/web/validacao_handlers.rs
use crate::{
    config::AppConfig,
    error::AppResult,
    models::{escala::ValidationRequest, validacao::PostValidationResult},
    services::{
        formatador::{self, ReportSink, TracingSink},
        validacao_service,
    },
};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

// --- GET /health ---
pub async fn handle_health() -> &'static str {
    "ok"
}

// Com VALIDADOR_LOG_RELATORIO ativo o texto também vai para o log
fn report_text(config: &AppConfig, result: &PostValidationResult) -> String {
    if config.log_relatorio {
        formatador::publish(result, &TracingSink)
    } else {
        formatador::format_report(result)
    }
}

// --- POST /validacao ---
// Corpo: ValidationRequest em JSON; resposta: PostValidationResult em JSON.
pub async fn handle_validar(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> AppResult<Json<PostValidationResult>> {
    let Json(request) = payload?;
    tracing::debug!(
        "POST /validacao: {} alocações recebidas",
        request.assignments.len()
    );
    let result = validacao_service::validate_request(&request);
    if config.log_relatorio {
        TracingSink.emit(&formatador::format_report(&result));
    }
    Ok(Json(result))
}

// --- POST /validacao/relatorio ---
// Mesmo corpo, resposta em texto simples.
pub async fn handle_relatorio(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload?;
    tracing::debug!(
        "POST /validacao/relatorio: {} alocações recebidas",
        request.assignments.len()
    );
    let result = validacao_service::validate_request(&request);
    let text = report_text(&config, &result);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
