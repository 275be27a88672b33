//! Message handler: owns the running sample counter and the rolling buffer.
//! Each decoded message becomes the next sample.

use tracing::{debug, warn};

use crate::error::FeedError;
use crate::history::RollingSeriesBuffer;
use crate::types::{decode_payload, Sample};

#[derive(Debug)]
pub struct EmotionFeed {
    next_index: i64,
    buffer: RollingSeriesBuffer,
    received: u64,
    rejected: u64,
    last_error: Option<String>,
}

impl EmotionFeed {
    pub fn new(capacity: i64) -> Result<Self, FeedError> {
        Ok(Self {
            next_index: 1,
            buffer: RollingSeriesBuffer::new(capacity)?,
            received: 0,
            rejected: 0,
            last_error: None,
        })
    }

    /// Decode and record one inbound message. Malformed payloads are counted
    /// and do not consume a sample index.
    pub fn on_message(&mut self, topic: &str, payload: &[u8]) -> Result<Sample, FeedError> {
        self.received += 1;
        let counts = match decode_payload(payload) {
            Ok(c) => c,
            Err(e) => {
                self.rejected += 1;
                warn!(topic, error = %e, "dropping malformed payload");
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };
        let sample = Sample {
            index: self.next_index,
            counts,
        };
        self.next_index += 1;
        self.buffer.push_sample(&sample);
        debug!(topic, index = sample.index, ?counts, "sample recorded");
        Ok(sample)
    }

    pub fn buffer(&self) -> &RollingSeriesBuffer {
        &self.buffer
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
