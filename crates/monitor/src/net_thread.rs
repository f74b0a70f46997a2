//! Thread de rede que drena o event loop MQTT e envia pacotes decodificados
//! para o loop de avaliação via channel.

use crossbeam_channel::{Receiver, Sender, bounded};
use rumqttc::{Client, Connection, Event, Packet, QoS};
use sensor_core::codec;
use sensor_core::types::PublishPacket;
use tracing::{debug, error, info, warn};

/// Mensagem enviada da thread de rede para o avaliador.
#[derive(Debug, Clone)]
pub struct NetMessage {
    pub topic: String,
    pub packet: PublishPacket,
    pub raw_size: usize,
}

/// Inicia a thread de rede. Retorna o receiver do channel.
pub fn spawn_receiver_thread(
    client: Client,
    mut connection: Connection,
    topic_filter: String,
) -> Receiver<NetMessage> {
    let (tx, rx) = bounded::<NetMessage>(64); // Buffer de 64 mensagens

    std::thread::Builder::new()
        .name("mqtt-receiver".into())
        .spawn(move || {
            receiver_loop(&tx, &client, &mut connection, &topic_filter);
        })
        .expect("Falha ao criar thread de rede");

    rx
}

fn receiver_loop(
    tx: &Sender<NetMessage>,
    client: &Client,
    connection: &mut Connection,
    topic_filter: &str,
) {
    for notification in connection.iter() {
        match notification {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                // Assina a cada sessão nova; o broker não preserva o filtro
                info!("Conectado; assinando {topic_filter}");
                if let Err(e) = client.subscribe(topic_filter, QoS::AtLeastOnce) {
                    error!("Falha ao assinar {topic_filter}: {e}");
                }
            }
            Ok(Event::Incoming(Packet::SubAck(_))) => {
                info!("Assinatura confirmada em {topic_filter}");
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                match codec::decode(&publish.payload) {
                    Ok(packet) => {
                        let msg = NetMessage {
                            topic: publish.topic.clone(),
                            packet,
                            raw_size: publish.payload.len(),
                        };
                        // Non-blocking send: se o avaliador está lento, descarta
                        if tx.try_send(msg).is_err() {
                            debug!("Channel cheio, descartando pacote");
                        }
                    }
                    Err(e) => {
                        debug!("Pacote inválido em {}: {e}", publish.topic);
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Erro de conexão MQTT: {e}. Tentando novamente em 2s...");
                std::thread::sleep(std::time::Duration::from_secs(2));
            }
        }
    }
}
