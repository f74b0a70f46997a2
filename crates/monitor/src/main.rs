//! # Sensoria Monitor
//!
//! Assina `sensor/#` no broker e imprime alertas de temperatura por
//! categoria: cada pacote recebido é decodificado e avaliado contra os
//! thresholds fixos de Freezer e Geladeira.
//!
//! ## Uso
//! ```bash
//! sensor_monitor          # config.toml ao lado do binário + credenciais do .env
//! ```

mod net_thread;
mod render;

use rumqttc::{Client, MqttOptions, Transport};
use sensor_core::alerts;
use sensor_core::config::{self, AppConfig, BrokerCredentials};
use std::time::Duration;
use tracing::{info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        let _ = config.save(&config_path);
    }
    for err in config.validate() {
        warn!("Config inválida: {err}");
    }

    // ── Conexão MQTT ──
    let credentials = BrokerCredentials::from_env();
    let host = config::broker_host(&config.broker);
    let port = config.broker.port;

    let mut options = MqttOptions::new(format!("{}-mon", config.broker.client_id), host.as_str(), port);
    options.set_keep_alive(Duration::from_secs(config.broker.keep_alive_secs));
    match credentials {
        Some(ref c) => {
            options.set_credentials(c.username.as_str(), c.password.as_str());
        }
        None => warn!("HIVE_USER/HIVE_PSWD ausentes; conectando sem autenticação"),
    }
    if config.broker.use_tls {
        options.set_transport(Transport::tls_with_default_config());
    }

    let (client, connection) = Client::new(options, 10);

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ⚡ SENSORIA MONITOR – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  Broker:  {host}:{port}");
    println!("  Filtro:  {}", config.monitor.topic_filter);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Thread de rede + loop de avaliação ──
    let rx = net_thread::spawn_receiver_thread(
        client,
        connection,
        config.monitor.topic_filter.clone(),
    );

    for msg in rx.iter() {
        let finding = alerts::evaluate(&msg.topic, &msg.packet);
        info!("← {} ({} bytes): {:?}", msg.topic, msg.raw_size, finding);

        if let Some(line) = render::render(&msg.packet, finding) {
            println!("{line}");
        }
    }
}
