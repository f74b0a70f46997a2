//! Renderização de findings como linhas de console.
//!
//! A avaliação em si é pura ([`sensor_core::alerts::evaluate`]); aqui fica
//! só a apresentação, no formato de linha do monitor original.

use sensor_core::alerts::Finding;
use sensor_core::types::PublishPacket;

/// Marca de severidade anexada a linhas de alerta.
fn severity_tag(finding: Finding) -> Option<&'static str> {
    match finding {
        Finding::LowAlert => Some("[ALERTA: Temperatura BAIXA]"),
        Finding::HighAlert => Some("[ALERTA: Temperatura ALTA]"),
        Finding::Informational | Finding::Suppressed => None,
    }
}

/// Formata a linha impressa para um finding.
///
/// `Suppressed` não produz linha: tópico desconhecido ou divergente é
/// silencioso por contrato, não é erro.
pub fn render(packet: &PublishPacket, finding: Finding) -> Option<String> {
    if finding == Finding::Suppressed {
        return None;
    }

    let payload = &packet.payload;
    let mut line = format!("Lj {}: {} {:.1}°C", payload.id, payload.tipo, payload.temperatura);
    if let Some(tag) = severity_tag(finding) {
        line.push(' ');
        line.push_str(tag);
    }
    Some(line)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sensor_core::codec;
    use sensor_core::types::{DeviceCategory, Reading};

    fn packet(temperature: f64) -> PublishPacket {
        let reading = Reading {
            device_id: codec::device_id(1, 2),
            category: DeviceCategory::Freezer,
            temperature_celsius: temperature,
            observed_at: Utc::now(),
        };
        codec::packet_for(&reading, 1, 1)
    }

    #[test]
    fn alert_line_carries_severity_tag() {
        let line = render(&packet(-27.3), Finding::LowAlert).unwrap();
        assert_eq!(line, "Lj lj1f2: Freezer -27.3°C [ALERTA: Temperatura BAIXA]");

        let line = render(&packet(-12.0), Finding::HighAlert).unwrap();
        assert!(line.ends_with("[ALERTA: Temperatura ALTA]"));
    }

    #[test]
    fn informational_line_has_no_tag() {
        let line = render(&packet(-20.0), Finding::Informational).unwrap();
        assert_eq!(line, "Lj lj1f2: Freezer -20.0°C");
    }

    #[test]
    fn suppressed_renders_nothing() {
        assert_eq!(render(&packet(-27.3), Finding::Suppressed), None);
    }
}
