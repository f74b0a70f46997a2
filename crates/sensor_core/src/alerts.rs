//! Sistema de alertas – thresholds fixos por categoria e avaliação.
//!
//! A avaliação é uma função pura de (tópico, pacote): sem estado, sem
//! travas, segura para chamar de qualquer contexto de entrega do broker.

use crate::types::{DeviceCategory, PublishPacket};
use serde::{Deserialize, Serialize};

/// Resultado da avaliação de um pacote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finding {
    /// Leitura reconhecida, sem marca de severidade.
    Informational,
    /// Temperatura estritamente abaixo do limite inferior da categoria.
    LowAlert,
    /// Temperatura estritamente acima do limite superior da categoria.
    HighAlert,
    /// Tópico desconhecido ou em desacordo com o payload; silencioso.
    Suppressed,
}

impl Finding {
    pub fn is_alert(self) -> bool {
        matches!(self, Finding::LowAlert | Finding::HighAlert)
    }
}

/// Faixa normal de operação de uma categoria (°C).
///
/// Limites tratados como exclusivos: valor exatamente igual ao limite não
/// dispara alerta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBand {
    pub low: f64,
    pub high: f64,
}

impl DeviceCategory {
    /// Tabela fixa de thresholds por categoria.
    pub fn thresholds(self) -> ThresholdBand {
        match self {
            DeviceCategory::Freezer => ThresholdBand { low: -25.0, high: -15.0 },
            DeviceCategory::Geladeira => ThresholdBand { low: -2.0, high: 10.0 },
        }
    }
}

/// Extrai `(unidade, categoria)` de um tópico `sensor/<u>/<categoria>`.
///
/// A comparação de categoria ignora maiúsculas: o publicador emite o
/// segmento minúsculo, mas a forma mista também é aceita.
pub fn parse_topic(topic: &str) -> Option<(u32, DeviceCategory)> {
    let mut parts = topic.split('/');
    if parts.next() != Some("sensor") {
        return None;
    }
    let unit = parts.next()?.parse().ok()?;
    let category = DeviceCategory::parse(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((unit, category))
}

/// Classifica uma temperatura contra os thresholds da categoria.
pub fn classify(category: DeviceCategory, temperature: f64) -> Finding {
    let band = category.thresholds();
    if temperature < band.low {
        Finding::LowAlert
    } else if temperature > band.high {
        Finding::HighAlert
    } else {
        Finding::Informational
    }
}

/// Avalia um pacote decodificado contra o tópico em que chegou.
///
/// Tópico fora do padrão, ou categoria do tópico divergente da categoria do
/// payload, suprime o caminho de alerta.
pub fn evaluate(topic: &str, packet: &PublishPacket) -> Finding {
    let Some((_unit, category)) = parse_topic(topic) else {
        return Finding::Suppressed;
    };
    if packet.payload.tipo != category {
        return Finding::Suppressed;
    }
    classify(category, packet.payload.temperatura)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
