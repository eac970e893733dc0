// src/main.rs
use axum::serve;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use validador_escala::{config::AppConfig, logging, state::AppState, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Configuração ---
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Falha ao ler a configuração: {}", e))?;

    // --- Configuração do Logging (Tracing) ---
    logging::init(&config.log_filter);

    tracing::info!("🚀 Iniciando validador de escalas...");
    if config.log_relatorio {
        tracing::info!("📝 Relatórios formatados serão enviados para o log.");
    }

    // --- Configuração do Endereço e Listener ---
    let addr = config.socket_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Servidor escutando em http://{}", addr);

    // --- Router e camadas ---
    let app = web::routes::create_router(AppState::new(config))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // --- Início do Servidor ---
    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
