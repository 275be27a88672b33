//! Demo mode: synthesizes classroom emotion counts in-process so the chart can
//! be tried without a broker. Payloads go through the same decode path as MQTT.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::mqtt::{Inbound, LinkStatus};
use crate::types::EmotionCounts;

pub const DEMO_TOPIC: &str = "demo/gaze";

/// Random walk over the five counts, bounded to a plausible class size.
pub struct SyntheticClass {
    rng: fastrand::Rng,
    counts: [i64; 5],
    max: i64,
}

impl SyntheticClass {
    pub fn new(seed: u64, max: i64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            counts: [max / 2, max / 4, max / 8, 1, 0],
            max: max.max(1),
        }
    }

    pub fn next_counts(&mut self) -> EmotionCounts {
        for c in self.counts.iter_mut() {
            *c = (*c + self.rng.i64(-2..=2)).clamp(0, self.max);
        }
        EmotionCounts::from_array(self.counts)
    }

    pub fn next_payload(&mut self) -> Vec<u8> {
        let counts = self.next_counts();
        serde_json::to_vec(&counts).unwrap_or_default()
    }
}

pub fn spawn_demo(tx: UnboundedSender<Inbound>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tx.send(Inbound::Status(LinkStatus::Demo)).is_err() {
            return;
        }
        let mut class = SyntheticClass::new(fastrand::u64(..), 30);
        let mut tick = interval(period);
        loop {
            tick.tick().await;
            let msg = Inbound::Message {
                topic: DEMO_TOPIC.into(),
                payload: class.next_payload(),
            };
            if tx.send(msg).is_err() {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::decode_payload;

    #[test]
    fn synthetic_counts_stay_in_range() {
        let mut class = SyntheticClass::new(7, 30);
        for _ in 0..500 {
            let c = class.next_counts().to_array();
            assert!(c.iter().all(|&v| (0..=30).contains(&v)), "{c:?}");
        }
    }

    #[test]
    fn payloads_decode_like_broker_messages() {
        let mut class = SyntheticClass::new(1, 10);
        let payload = class.next_payload();
        assert!(decode_payload(&payload).is_ok());
    }

    #[tokio::test]
    async fn demo_task_announces_then_streams() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = spawn_demo(tx, Duration::from_millis(5));
        assert_eq!(rx.recv().await, Some(Inbound::Status(LinkStatus::Demo)));
        match rx.recv().await {
            Some(Inbound::Message { topic, payload }) => {
                assert_eq!(topic, DEMO_TOPIC);
                assert!(decode_payload(&payload).is_ok());
            }
            other => panic!("expected a message, got {other:?}"),
        }
        drop(rx);
        handle.await.unwrap();
    }
}
