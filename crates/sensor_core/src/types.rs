//! Definição de tipos/structs do domínio de sensores.
//!
//! Porta direta do modelo Go para structs Rust com serde. Os nomes de campo
//! JSON (`packet-id`, `topic-name`, `retain-flag`…) são os mesmos do
//! envelope original, um objeto por mensagem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Categoria de dispositivo
// ──────────────────────────────────────────────

/// Categoria do dispositivo monitorado.
///
/// Determina a tabela de thresholds aplicada pelo avaliador de alertas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCategory {
    #[serde(alias = "freezer")]
    Freezer,
    #[serde(alias = "geladeira")]
    Geladeira,
}

impl DeviceCategory {
    /// Todas as categorias publicadas pelo simulador.
    pub const ALL: [DeviceCategory; 2] = [DeviceCategory::Freezer, DeviceCategory::Geladeira];

    /// Segmento canônico (minúsculo) usado no nome do tópico.
    pub fn topic_segment(self) -> &'static str {
        match self {
            DeviceCategory::Freezer => "freezer",
            DeviceCategory::Geladeira => "geladeira",
        }
    }

    /// Rótulo exibido no payload (`tipo`) e nas linhas de alerta.
    pub fn label(self) -> &'static str {
        match self {
            DeviceCategory::Freezer => "Freezer",
            DeviceCategory::Geladeira => "Geladeira",
        }
    }

    /// Interpreta um nome de categoria sem diferenciar maiúsculas.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("freezer") {
            Some(DeviceCategory::Freezer)
        } else if s.eq_ignore_ascii_case("geladeira") {
            Some(DeviceCategory::Geladeira)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ──────────────────────────────────────────────
// Leitura
// ──────────────────────────────────────────────

/// Uma observação de sensor produzida pelo gerador.
///
/// Imutável; consumida uma única vez pelo codec no momento da publicação.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Identificador da unidade emissora (ex: "lj2f1"); colisões toleradas.
    pub device_id: String,
    /// Categoria que define a faixa de temperatura aceitável.
    pub category: DeviceCategory,
    /// Temperatura medida (°C).
    pub temperature_celsius: f64,
    /// Instante da leitura (relógio de parede).
    pub observed_at: DateTime<Utc>,
}

// ──────────────────────────────────────────────
// Envelope publicado
// ──────────────────────────────────────────────

/// Corpo do envelope: a leitura mais o identificador da unidade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorPayload {
    pub id: String,
    pub tipo: DeviceCategory,
    pub temperatura: f64,
    pub timestamp: DateTime<Utc>,
}

/// Envelope canônico trocado com o broker, um objeto JSON por mensagem.
///
/// `topic_name` e `payload.tipo` devem concordar na categoria; um decoder
/// que encontre divergência trata o pacote como apenas informativo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishPacket {
    /// Identificador do pacote; apenas para rastreio, colisões toleradas.
    #[serde(rename = "packet-id")]
    pub packet_id: u64,
    /// Tópico de destino: `sensor/<unidade>/<categoria>`.
    #[serde(rename = "topic-name")]
    pub topic_name: String,
    /// Nível de QoS (0, 1 ou 2); fixo em 1 para todo o tráfego.
    pub qos: u8,
    #[serde(rename = "retain-flag")]
    pub retain_flag: bool,
    pub payload: SensorPayload,
    #[serde(rename = "duplicated-flag")]
    pub dup_flag: bool,
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_ignores_case() {
        assert_eq!(DeviceCategory::parse("freezer"), Some(DeviceCategory::Freezer));
        assert_eq!(DeviceCategory::parse("Freezer"), Some(DeviceCategory::Freezer));
        assert_eq!(DeviceCategory::parse("GELADEIRA"), Some(DeviceCategory::Geladeira));
        assert_eq!(DeviceCategory::parse("adega"), None);
    }

    #[test]
    fn category_segments_are_lowercase() {
        for category in DeviceCategory::ALL {
            let segment = category.topic_segment();
            assert_eq!(segment, segment.to_lowercase());
            assert_eq!(DeviceCategory::parse(segment), Some(category));
        }
    }

    #[test]
    fn category_serde_accepts_both_cases() {
        let mixed: DeviceCategory = serde_json::from_str("\"Geladeira\"").unwrap();
        let lower: DeviceCategory = serde_json::from_str("\"geladeira\"").unwrap();
        assert_eq!(mixed, DeviceCategory::Geladeira);
        assert_eq!(lower, DeviceCategory::Geladeira);
        // O rótulo serializado é a forma mista do payload original
        assert_eq!(serde_json::to_string(&mixed).unwrap(), "\"Geladeira\"");
    }
}
