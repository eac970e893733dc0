// src/config.rs
use crate::error::{AppError, AppResult};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_LOG_FILTER: &str = "validador_escala=debug,tower_http=info";

/// Configuração lida das variáveis de ambiente (e do `.env`, se existir).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Filtro usado quando `RUST_LOG` não está definido.
    pub log_filter: String,
    /// Enviar cada relatório formatado para o log.
    pub log_relatorio: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_relatorio: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok(); // Carrega .env
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual a `from_env`, mas com a fonte dos valores injetada (útil nos testes).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("VALIDADOR_HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("VALIDADOR_HOST inválido: '{}'", host)))?;
        }
        if let Some(port) = lookup("VALIDADOR_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("VALIDADOR_PORT inválido: '{}'", port)))?;
        }
        if let Some(filter) = lookup("VALIDADOR_LOG_FILTER") {
            if !filter.trim().is_empty() {
                config.log_filter = filter.trim().to_string();
            }
        }
        if let Some(flag) = lookup("VALIDADOR_LOG_RELATORIO") {
            config.log_relatorio = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "sim" => true,
                "0" | "false" | "nao" | "não" | "" => false,
                _ => {
                    return Err(AppError::Config(format!(
                        "VALIDADOR_LOG_RELATORIO inválido: '{}'",
                        flag
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VALIDADOR_HOST", "127.0.0.1"),
            ("VALIDADOR_PORT", "8080"),
            ("VALIDADOR_LOG_FILTER", "warn"),
            ("VALIDADOR_LOG_RELATORIO", "true"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_filter, "warn");
        assert!(config.log_relatorio);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("VALIDADOR_PORT", "abc")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("VALIDADOR_LOG_RELATORIO", "talvez")]))
            .unwrap_err();
        assert!(err.to_string().contains("VALIDADOR_LOG_RELATORIO"));
    }
}
