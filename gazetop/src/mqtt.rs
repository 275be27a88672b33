//! Minimal MQTT receive side: connects, subscribes to one topic and forwards
//! raw records to the UI loop over a channel. It never decodes or draws.

use std::time::Duration;

use anyhow::{bail, Context};
use percent_encoding::percent_decode_str;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_BROKER: &str = "test.mosquitto.org";
pub const DEFAULT_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "retail/traffic";
pub const GREETING_TOPIC: &str = "mbed-sample";
pub const GREETING: &str = "gazetop subscriber online";
const KEEP_ALIVE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerTarget {
    pub broker: String,
    pub port: u16,
    pub topic: String,
}

impl Default for BrokerTarget {
    fn default() -> Self {
        Self {
            broker: DEFAULT_BROKER.into(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.into(),
        }
    }
}

impl BrokerTarget {
    /// Parse `mqtt://HOST[:PORT][/TOPIC]`; missing parts fall back to defaults.
    pub fn from_url(s: &str) -> anyhow::Result<Self> {
        let url = Url::parse(s).with_context(|| format!("invalid broker url {s:?}"))?;
        if !matches!(url.scheme(), "mqtt" | "tcp") {
            bail!("unsupported scheme {:?} (expected mqtt://)", url.scheme());
        }
        let Some(host) = url.host_str().filter(|h| !h.is_empty()) else {
            bail!("broker url {s:?} has no host");
        };
        let mut topic = percent_decode_str(url.path().trim_start_matches('/'))
            .decode_utf8()
            .with_context(|| format!("broker url {s:?} has a non-UTF-8 topic"))?
            .into_owned();
        // A trailing `#` is the multi-level wildcard, which url reads as an empty fragment
        match url.fragment() {
            None => {}
            Some("") => topic.push('#'),
            Some(rest) => bail!("'#' must be the last topic level, found {rest:?} after it"),
        }
        Ok(Self {
            broker: host.to_string(),
            port: url.port().unwrap_or(DEFAULT_PORT),
            topic: if topic.is_empty() {
                DEFAULT_TOPIC.into()
            } else {
                topic
            },
        })
    }

    pub fn label(&self) -> String {
        format!("{}:{}/{}", self.broker, self.port, self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Connecting,
    Connected,
    Subscribed,
    Demo,
    Disconnected(String),
}

/// What the receive side hands to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Status(LinkStatus),
    Message { topic: String, payload: Vec<u8> },
}

pub fn mqtt_options(target: &BrokerTarget) -> MqttOptions {
    let client_id = format!("gazetop-{}", std::process::id());
    let mut opts = MqttOptions::new(client_id, target.broker.clone(), target.port);
    opts.set_keep_alive(KEEP_ALIVE);
    opts
}

// Connect and queue the subscription; the event loop sends both once polled
pub async fn connect(target: &BrokerTarget) -> anyhow::Result<(AsyncClient, EventLoop)> {
    let (client, eventloop) = AsyncClient::new(mqtt_options(target), 16);
    client
        .subscribe(target.topic.clone(), QoS::AtMostOnce)
        .await
        .context("queue subscription")?;
    Ok((client, eventloop))
}

pub fn spawn_receiver(target: BrokerTarget, tx: UnboundedSender<Inbound>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _ = tx.send(Inbound::Status(LinkStatus::Connecting));
        info!(broker = %target.label(), "connecting");
        match connect(&target).await {
            Ok((client, eventloop)) => receive_loop(client, eventloop, tx).await,
            Err(e) => {
                warn!(error = %e, "mqtt setup failed");
                let _ = tx.send(Inbound::Status(LinkStatus::Disconnected(e.to_string())));
            }
        }
    })
}

// Runs until the connection fails or the UI side hangs up. No reconnects.
async fn receive_loop(
    client: AsyncClient,
    mut eventloop: EventLoop,
    tx: UnboundedSender<Inbound>,
) {
    loop {
        let ev = match eventloop.poll().await {
            Ok(ev) => ev,
            Err(e) => {
                warn!(error = %e, "mqtt connection closed");
                let _ = tx.send(Inbound::Status(LinkStatus::Disconnected(e.to_string())));
                return;
            }
        };
        let out = match ev {
            Event::Incoming(Packet::ConnAck(ack)) => {
                info!(code = ?ack.code, "connected");
                if let Err(e) =
                    client.try_publish(GREETING_TOPIC, QoS::AtMostOnce, false, GREETING)
                {
                    debug!(error = %e, "greeting not sent");
                }
                Inbound::Status(LinkStatus::Connected)
            }
            Event::Incoming(Packet::SubAck(_)) => {
                info!("subscribed");
                Inbound::Status(LinkStatus::Subscribed)
            }
            Event::Incoming(Packet::Publish(p)) => Inbound::Message {
                topic: p.topic,
                payload: p.payload.to_vec(),
            },
            _ => continue,
        };
        if tx.send(out).is_err() {
            debug!("ui closed; stopping receiver");
            let _ = client.try_disconnect();
            return;
        }
    }
}
