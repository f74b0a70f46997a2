//! Simulador de leituras – valores sintéticos por categoria.
//!
//! Substitui a coleta de hardware por um gerador com faixas configuráveis.
//! O simulador é dono de toda a aleatoriedade do publicador: desambiguador
//! do id, sorteio de unidade e temperatura. O codec permanece determinístico.

use chrono::Utc;
use rand::Rng;
use rand::rngs::ThreadRng;
use sensor_core::codec;
use sensor_core::config::SimulatorConfig;
use sensor_core::types::{DeviceCategory, Reading};

/// Gerador de leituras sintéticas.
pub struct Simulator {
    ranges: SimulatorConfig,
    rng: ThreadRng,
}

impl Simulator {
    pub fn new(ranges: SimulatorConfig) -> Self {
        Self {
            ranges,
            rng: rand::thread_rng(),
        }
    }

    /// Produz uma leitura para a unidade/categoria pedida.
    ///
    /// A temperatura é uniforme na faixa da categoria; o instante é o
    /// relógio de parede no momento da chamada.
    pub fn reading(&mut self, unit: u32, category: DeviceCategory) -> Reading {
        let (min, max) = self.ranges.band(category);
        let disambiguator = self.rng.gen_range(0..3u8);

        Reading {
            device_id: codec::device_id(unit, disambiguator),
            category,
            temperature_celsius: self.rng.gen_range(min..max),
            observed_at: Utc::now(),
        }
    }

    /// Sorteia a unidade da rodada.
    pub fn unit(&mut self, units: u32) -> u32 {
        self.rng.gen_range(0..units.max(1))
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_stay_within_configured_band() {
        let mut sim = Simulator::new(SimulatorConfig::default());
        for category in DeviceCategory::ALL {
            let (min, max) = SimulatorConfig::default().band(category);
            for _ in 0..100 {
                let reading = sim.reading(0, category);
                assert_eq!(reading.category, category);
                assert!(
                    reading.temperature_celsius >= min && reading.temperature_celsius < max,
                    "{} fora da faixa {min}..{max}",
                    reading.temperature_celsius
                );
            }
        }
    }

    #[test]
    fn device_id_has_unit_and_disambiguator() {
        let mut sim = Simulator::new(SimulatorConfig::default());
        for _ in 0..50 {
            let reading = sim.reading(2, DeviceCategory::Freezer);
            let suffix = reading.device_id.strip_prefix("lj2f").unwrap();
            let d: u8 = suffix.parse().unwrap();
            assert!(d <= 2, "desambiguador fora de 0..=2: {d}");
        }
    }

    #[test]
    fn unit_draw_respects_bound() {
        let mut sim = Simulator::new(SimulatorConfig::default());
        for _ in 0..100 {
            assert!(sim.unit(3) < 3);
        }
        // Limite degenerado não entra em pânico
        assert_eq!(sim.unit(0), 0);
    }
}
