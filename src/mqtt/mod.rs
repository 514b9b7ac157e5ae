pub mod payload;

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use payload::SensorPayload;

pub struct BrokerListener {
    client: AsyncClient,
    eventloop: EventLoop,
    topic: String,
    reconnect_delay: Duration,
}

impl BrokerListener {
    pub fn new(config: &Config) -> Self {
        let mut options = MqttOptions::new(
            config.mqtt_client_id.clone(),
            config.mqtt_host.clone(),
            config.mqtt_port,
        );
        options.set_keep_alive(Duration::from_secs(60));

        let (client, eventloop) = AsyncClient::new(options, 10);
        Self {
            client,
            eventloop,
            topic: config.mqtt_topic.clone(),
            reconnect_delay: Duration::from_secs(config.mqtt_reconnect_secs),
        }
    }

    /// Consumes broker events and feeds decoded payloads into `tx` until the
    /// receiving side goes away.
    ///
    /// Reconnect policy: on a connection error the listener logs it, sleeps
    /// the configured delay and polls again, indefinitely. The subscription
    /// is re-issued on every ConnAck, so it survives broker restarts.
    pub async fn run(mut self, tx: mpsc::Sender<SensorPayload>) {
        info!(topic = %self.topic, "Broker listener started");

        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                    info!(topic = %self.topic, "Connected to broker, subscribing");
                    if let Err(e) = self.client.subscribe(&self.topic, QoS::AtMostOnce).await {
                        // Only possible once the client side is shut down.
                        error!(error = %e, "Subscribe request failed");
                        return;
                    }
                }
                Ok(Event::Incoming(Incoming::SubAck(_))) => {
                    info!(topic = %self.topic, "Subscription active");
                }
                Ok(Event::Incoming(Incoming::Publish(msg))) => {
                    debug!(topic = %msg.topic, bytes = msg.payload.len(), "Message received");
                    let decoded = match SensorPayload::decode(&msg.payload) {
                        Ok(p) => p,
                        Err(e) => {
                            warn!(topic = %msg.topic, error = %e, "Dropping undecodable message");
                            continue;
                        }
                    };
                    if tx.send(decoded).await.is_err() {
                        info!("Ingest queue closed, stopping listener");
                        return;
                    }
                }
                Ok(_) => {} // pings, acks
                Err(e) => {
                    error!(
                        error = %e,
                        retry_in_secs = self.reconnect_delay.as_secs(),
                        "Broker connection error"
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }
}
