//! Configuração unificada via TOML.
//!
//! Um único `config.toml` cobre broker, publicador e monitor. Credenciais
//! nunca vão para o arquivo: são lidas do ambiente (com `.env` opcional,
//! como o cliente original).

use crate::types::DeviceCategory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Conexão com o broker MQTT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Host do broker (a variável BROKER_ADDR tem precedência)
    pub host: String,
    /// Porta do broker (8883 = TLS)
    pub port: u16,
    /// Prefixo do client-id MQTT
    pub client_id: String,
    /// Habilita TLS (brokers gerenciados exigem)
    pub use_tls: bool,
    /// Keep-alive da sessão (segundos)
    pub keep_alive_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8883,
            client_id: "sensoria".into(),
            use_tls: true,
            keep_alive_secs: 5,
        }
    }
}

/// Faixas de geração do simulador, por categoria (°C).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub freezer_min: f64,
    pub freezer_max: f64,
    pub geladeira_min: f64,
    pub geladeira_max: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            freezer_min: -30.0,
            freezer_max: -10.0,
            geladeira_min: -2.0,
            geladeira_max: 14.0,
        }
    }
}

impl SimulatorConfig {
    /// Faixa `(min, max)` de geração para a categoria.
    pub fn band(&self, category: DeviceCategory) -> (f64, f64) {
        match category {
            DeviceCategory::Freezer => (self.freezer_min, self.freezer_max),
            DeviceCategory::Geladeira => (self.geladeira_min, self.geladeira_max),
        }
    }
}

/// Configuração do Publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Número de unidades (lojas) simuladas; índices 0..units
    pub units: u32,
    /// Rodadas de publicação antes de desconectar
    pub rounds: u32,
    /// Intervalo entre rodadas (segundos)
    pub interval_secs: f64,
    /// Faixas do simulador
    pub simulator: SimulatorConfig,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            units: 3,
            rounds: 4,
            interval_secs: 2.0,
            simulator: SimulatorConfig::default(),
        }
    }
}

/// Configuração do Monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Filtro de assinatura (wildcard cobre todas as unidades/categorias)
    pub topic_filter: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            topic_filter: "sensor/#".into(),
        }
    }
}

/// Configuração raiz do aplicativo (unifica broker, publisher e monitor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub publisher: PublisherConfig,
    pub monitor: MonitorConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.broker.port == 0 {
            errors.push("Porta do broker não pode ser 0".into());
        }
        if self.publisher.units == 0 {
            errors.push("Publisher precisa de ao menos 1 unidade".into());
        }
        if self.publisher.interval_secs < 0.1 || self.publisher.interval_secs > 60.0 {
            errors.push(format!(
                "Intervalo do publisher inválido: {} (0.1–60.0)",
                self.publisher.interval_secs
            ));
        }
        for category in DeviceCategory::ALL {
            let (min, max) = self.publisher.simulator.band(category);
            if min >= max {
                errors.push(format!("Faixa do simulador inválida para {category}: {min}..{max}"));
            }
        }
        if self.monitor.topic_filter.is_empty() {
            errors.push("Filtro de assinatura do monitor não pode ser vazio".into());
        }

        errors
    }
}

// ──────────────────────────────────────────────
// Credenciais via ambiente
// ──────────────────────────────────────────────

/// Credenciais do broker lidas do ambiente.
#[derive(Debug, Clone)]
pub struct BrokerCredentials {
    pub username: String,
    pub password: String,
}

impl BrokerCredentials {
    /// Lê `HIVE_USER`/`HIVE_PSWD` do ambiente; se ausentes, tenta carregar
    /// um `.env` e lê de novo.
    pub fn from_env() -> Option<Self> {
        Self::read().or_else(|| {
            if let Err(e) = dotenvy::dotenv() {
                warn!("Não foi possível carregar .env: {e}");
            }
            Self::read()
        })
    }

    fn read() -> Option<Self> {
        match (std::env::var("HIVE_USER"), std::env::var("HIVE_PSWD")) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

/// Host efetivo do broker: `BROKER_ADDR` do ambiente tem precedência sobre
/// o config.toml.
pub fn broker_host(broker: &BrokerConfig) -> String {
    std::env::var("BROKER_ADDR")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| broker.host.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.broker.port, parsed.broker.port);
        assert_eq!(config.monitor.topic_filter, parsed.monitor.topic_filter);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[broker]
port = 1883
use_tls = false
"#;
        let config: AppConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.broker.port, 1883);
        assert!(!config.broker.use_tls);
        // Outros campos devem ter valor padrão
        assert_eq!(config.publisher.rounds, 4);
        assert_eq!(config.monitor.topic_filter, "sensor/#");
    }

    #[test]
    fn invalid_simulator_band_is_reported() {
        let mut config = AppConfig::default();
        config.publisher.simulator.freezer_min = -5.0;
        config.publisher.simulator.freezer_max = -20.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Freezer"));
    }

    #[test]
    fn simulator_band_per_category() {
        let sim = SimulatorConfig::default();
        assert_eq!(sim.band(DeviceCategory::Freezer), (-30.0, -10.0));
        assert_eq!(sim.band(DeviceCategory::Geladeira), (-2.0, 14.0));
    }
}
