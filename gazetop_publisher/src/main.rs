//! gazetop_publisher: emits synthetic emotion counts to an MQTT topic so the
//! gazetop chart can be exercised without the camera pipeline.

mod payload;

use std::time::Duration;

use anyhow::Context;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use payload::Classroom;

const DEFAULT_BROKER: &str = "test.mosquitto.org";
const DEFAULT_PORT: u16 = 1883;
const DEFAULT_TOPIC: &str = "retail/traffic";
const USAGE: &str = "[--broker HOST|-b HOST] [--port PORT|-p PORT] [--topic TOPIC|-T TOPIC] [--rate SECS|-r SECS] [--students N|-s N]";

#[derive(Debug, PartialEq)]
struct Config {
    broker: String,
    port: u16,
    topic: String,
    rate: u64,
    students: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker: DEFAULT_BROKER.into(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.into(),
            rate: 1,
            students: 24,
        }
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Config, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "gazetop_publisher".into());
    let mut cfg = Config::default();
    while let Some(a) = it.next() {
        let (flag, inline) = match a.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (a.clone(), None),
        };
        if matches!(flag.as_str(), "-h" | "--help") {
            return Err(format!("Usage: {prog} {USAGE}"));
        }
        let Some(v) = inline.or_else(|| it.next()) else {
            return Err(format!("Missing value for {flag}. Usage: {prog} {USAGE}"));
        };
        match flag.as_str() {
            "--broker" | "-b" => cfg.broker = v,
            "--topic" | "-T" => cfg.topic = v,
            "--port" | "-p" => cfg.port = v.parse().map_err(|_| format!("Invalid port: {v}"))?,
            "--rate" | "-r" => cfg.rate = v.parse().map_err(|_| format!("Invalid rate: {v}"))?,
            "--students" | "-s" => {
                cfg.students = v.parse().map_err(|_| format!("Invalid students: {v}"))?
            }
            _ => return Err(format!("Unknown flag {flag}. Usage: {prog} {USAGE}")),
        }
    }
    if cfg.rate == 0 {
        return Err("rate must be at least 1 second".into());
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = match parse_args(std::env::args()) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            if msg.starts_with("Usage:") {
                return Ok(());
            }
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client_id = format!("gazetop-publisher-{}", std::process::id());
    let mut opts = MqttOptions::new(client_id, cfg.broker.clone(), cfg.port);
    opts.set_keep_alive(Duration::from_secs(60));
    let (client, mut eventloop) = AsyncClient::new(opts, 16);
    info!(
        broker = %cfg.broker,
        port = cfg.port,
        topic = %cfg.topic,
        "publishing every {}s",
        cfg.rate
    );

    let publisher = tokio::spawn(async move {
        if let Err(e) = publish_loop(client, cfg).await {
            warn!(error = %e, "publisher stopped");
        }
    });

    // Drive the connection; the publisher task only queues requests
    let res = loop {
        tokio::select! {
            ev = eventloop.poll() => match ev {
                Ok(Event::Incoming(Packet::ConnAck(_))) => info!("connected"),
                Ok(ev) => debug!(?ev, "mqtt event"),
                Err(e) => {
                    warn!(error = %e, "mqtt connection closed");
                    break Err(anyhow::anyhow!("mqtt connection: {e}"));
                }
            },
            _ = tokio::signal::ctrl_c() => break Ok(()),
        }
    };
    publisher.abort();
    res
}

async fn publish_loop(client: AsyncClient, cfg: Config) -> anyhow::Result<()> {
    let mut class = Classroom::new(cfg.students, fastrand::u64(..));
    debug!(students = class.students(), "classroom ready");
    let mut tick = tokio::time::interval(Duration::from_secs(cfg.rate));
    loop {
        tick.tick().await;
        let report = class.step();
        let payload = serde_json::to_vec(&report).context("encode report")?;
        client
            .publish(cfg.topic.clone(), QoS::AtMostOnce, false, payload)
            .await
            .context("queue publish")?;
        info!(topic = %cfg.topic, ?report, "published");
    }
}
