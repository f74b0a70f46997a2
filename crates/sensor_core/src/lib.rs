//! # Sensor Core
//!
//! Crate compartilhada que define o modelo de pacotes, o codec JSON do
//! envelope MQTT, o avaliador de alertas por thresholds e a configuração
//! TOML do sistema Sensoria.
//!
//! ## Módulos
//! - [`types`] – Structs do domínio (Reading, PublishPacket, categorias)
//! - [`codec`] – Encode/decode JSON do envelope publicado
//! - [`alerts`] – Thresholds fixos por categoria e avaliação de findings
//! - [`config`] – Configuração unificada via TOML + credenciais do ambiente

pub mod types;
pub mod codec;
pub mod alerts;
pub mod config;

// Re-exports convenientes
pub use types::{DeviceCategory, PublishPacket, Reading};
pub use codec::{CodecError, decode, encode};
pub use alerts::{Finding, evaluate};
pub use config::AppConfig;
