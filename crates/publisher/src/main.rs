//! # Sensoria Publisher
//!
//! Simula sensores de frio (Freezer/Geladeira) e publica leituras em um
//! broker MQTT com QoS 1, um envelope JSON por mensagem.
//!
//! ## Uso
//! ```bash
//! sensor_publisher        # config.toml ao lado do binário + credenciais do .env
//! ```
//!
//! Variáveis de ambiente: `BROKER_ADDR` (host), `HIVE_USER`, `HIVE_PSWD`.

mod simulator;

use rumqttc::{Client, Event, MqttOptions, Outgoing, Packet, QoS, Transport};
use sensor_core::codec;
use sensor_core::config::{self, AppConfig, BrokerCredentials};
use sensor_core::types::DeviceCategory;
use simulator::Simulator;
use std::time::Duration;
use tracing::{debug, error, info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }
    for err in config.validate() {
        warn!("Config inválida: {err}");
    }

    // ── Credenciais e destino ──
    // from_env carrega o .env, portanto vem antes do BROKER_ADDR
    let credentials = BrokerCredentials::from_env();
    let host = config::broker_host(&config.broker);
    let port = config.broker.port;

    let mut options = MqttOptions::new(format!("{}-pub", config.broker.client_id), host.as_str(), port);
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

    let (client, mut connection) = Client::new(options, 10);

    // Thread que drena o event loop; ConnAck e PubAck chegam por aqui
    let driver = std::thread::Builder::new()
        .name("mqtt-driver".into())
        .spawn(move || {
            for notification in connection.iter() {
                match notification {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => info!("Conectado ao broker"),
                    Ok(Event::Incoming(Packet::PubAck(ack))) => {
                        debug!("PubAck pkid={}", ack.pkid);
                    }
                    Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                        info!("Desconectado do broker");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Event loop encerrado: {e}");
                        break;
                    }
                }
            }
        })
        .expect("Falha ao criar thread do event loop");

    let publisher_cfg = &config.publisher;
    let interval = Duration::from_secs_f64(publisher_cfg.interval_secs);

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ⚡ SENSORIA PUBLISHER – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  Broker:    {host}:{port}");
    println!("  Unidades:  {}", publisher_cfg.units);
    println!("  Rodadas:   {} ({}s de intervalo)", publisher_cfg.rounds, publisher_cfg.interval_secs);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop de publicação ──
    let mut sim = Simulator::new(publisher_cfg.simulator.clone());
    let mut sequence: u64 = 0;

    for round in 0..publisher_cfg.rounds {
        let unit = sim.unit(publisher_cfg.units);

        for category in DeviceCategory::ALL {
            let reading = sim.reading(unit, category);
            sequence += 1;

            let topic = codec::topic_for(unit, category);
            match codec::encode(&reading, unit, sequence) {
                Ok(body) => match client.publish(topic.as_str(), QoS::AtLeastOnce, false, body) {
                    Ok(()) => info!(
                        "→ {} | {} {:.1}°C (rodada {}/{})",
                        topic,
                        reading.device_id,
                        reading.temperature_celsius,
                        round + 1,
                        publisher_cfg.rounds
                    ),
                    // Falha de publicação aborta apenas esta leitura
                    Err(e) => error!("Falha ao publicar em {topic}: {e}"),
                },
                Err(e) => error!("Erro ao serializar leitura de {topic}: {e}"),
            }
        }

        std::thread::sleep(interval);
    }

    // ── Encerramento ──
    if let Err(e) = client.disconnect() {
        warn!("Erro ao desconectar: {e}");
    }
    let _ = driver.join();
    info!("Publicação concluída ({sequence} pacotes)");
}
