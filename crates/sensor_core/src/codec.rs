//! Codec do envelope publicado.
//!
//! Mapeamento bidirecional entre uma [`Reading`] (mais metadados de
//! envelope) e o objeto JSON transmitido ao broker:
//!
//! ```text
//! {
//!   "packet-id": 7,
//!   "topic-name": "sensor/2/freezer",
//!   "qos": 1,
//!   "retain-flag": false,
//!   "payload": { "id": "lj2f1", "tipo": "Freezer", "temperatura": -20.5,
//!                "timestamp": "2026-08-06T12:00:00Z" },
//!   "duplicated-flag": false
//! }
//! ```
//!
//! O codec é determinístico e sem estado: toda aleatoriedade (desambiguador
//! do id, sorteio de unidade) pertence ao gerador de leituras.

use crate::types::{DeviceCategory, PublishPacket, Reading, SensorPayload};

/// QoS fixo de todo o tráfego publicado.
pub const PUBLISH_QOS: u8 = 1;

/// Erros do codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Erro de serialização: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Erro de deserialização: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Nome de tópico canônico: `sensor/<unidade>/<categoria>`.
///
/// Unidade em decimal, categoria minúscula.
pub fn topic_for(unit: u32, category: DeviceCategory) -> String {
    format!("sensor/{unit}/{}", category.topic_segment())
}

/// Identificador de unidade: `lj<unidade>f<d>`, com `d` em 0..=2.
///
/// Desambiguador de baixa cardinalidade; colisões são esperadas e toleradas.
pub fn device_id(unit: u32, disambiguator: u8) -> String {
    format!("lj{unit}f{disambiguator}")
}

/// Monta o envelope de publicação sem serializar.
///
/// `sequence` vira o `packet-id`; QoS 1, retain e dup sempre falsos para
/// pacotes recém-publicados.
pub fn packet_for(reading: &Reading, unit: u32, sequence: u64) -> PublishPacket {
    PublishPacket {
        packet_id: sequence,
        topic_name: topic_for(unit, reading.category),
        qos: PUBLISH_QOS,
        retain_flag: false,
        payload: SensorPayload {
            id: reading.device_id.clone(),
            tipo: reading.category,
            temperatura: reading.temperature_celsius,
            timestamp: reading.observed_at,
        },
        dup_flag: false,
    }
}

/// Codifica uma leitura no pacote JSON transmitido ao broker.
pub fn encode(reading: &Reading, unit: u32, sequence: u64) -> Result<Vec<u8>, CodecError> {
    let packet = packet_for(reading, unit, sequence);
    serde_json::to_vec(&packet).map_err(CodecError::Encode)
}

/// Decodifica bytes recebidos do broker no envelope canônico.
///
/// Falha de parse é do pacote, nunca do processo: o chamador loga e
/// descarta a mensagem.
pub fn decode(bytes: &[u8]) -> Result<PublishPacket, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_reading() -> Reading {
        Reading {
            device_id: device_id(2, 1),
            category: DeviceCategory::Freezer,
            temperature_celsius: -20.5,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let reading = sample_reading();
        let encoded = encode(&reading, 2, 7).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded, packet_for(&reading, 2, 7));
        assert_eq!(decoded.payload.id, reading.device_id);
        assert_eq!(decoded.payload.tipo, reading.category);
        assert_eq!(decoded.payload.temperatura, reading.temperature_celsius);
    }

    #[test]
    fn wire_field_names_match_envelope() {
        let encoded = encode(&sample_reading(), 2, 7).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();

        assert_eq!(value["packet-id"], 7);
        assert_eq!(value["topic-name"], "sensor/2/freezer");
        assert_eq!(value["qos"], 1);
        assert_eq!(value["retain-flag"], false);
        assert_eq!(value["duplicated-flag"], false);
        assert_eq!(value["payload"]["id"], "lj2f1");
        assert_eq!(value["payload"]["tipo"], "Freezer");
        assert_eq!(value["payload"]["temperatura"], -20.5);
        assert!(value["payload"]["timestamp"].is_string());
    }

    #[test]
    fn unit_index_renders_in_decimal() {
        // Unidade 2 em binário seria "10"; o tópico e o id usam decimal.
        assert_eq!(topic_for(2, DeviceCategory::Geladeira), "sensor/2/geladeira");
        assert_eq!(device_id(2, 0), "lj2f0");
        assert_eq!(topic_for(10, DeviceCategory::Freezer), "sensor/10/freezer");
    }

    #[test]
    fn rejects_truncated_bytes() {
        let encoded = encode(&sample_reading(), 1, 1).unwrap();
        let truncated = &encoded[..encoded.len() / 2];
        assert!(matches!(decode(truncated), Err(CodecError::Decode(_))));
    }

    #[test]
    fn rejects_missing_field() {
        let no_payload = br#"{"packet-id":1,"topic-name":"sensor/1/freezer","qos":1,"retain-flag":false,"duplicated-flag":false}"#;
        assert!(matches!(decode(no_payload), Err(CodecError::Decode(_))));
    }

    #[test]
    fn rejects_mistyped_field() {
        let bad_temp = br#"{"packet-id":1,"topic-name":"sensor/1/freezer","qos":1,"retain-flag":false,"payload":{"id":"lj1f0","tipo":"Freezer","temperatura":"quente","timestamp":"2026-08-06T12:00:00Z"},"duplicated-flag":false}"#;
        assert!(matches!(decode(bad_temp), Err(CodecError::Decode(_))));
    }

    #[test]
    fn rejects_non_json() {
        assert!(decode(b"\x00\x01\x02").is_err());
        assert!(decode(b"").is_err());
    }
}
