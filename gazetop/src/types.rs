//! Types that mirror the gaze monitor's JSON payload.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::FeedError;

/// The five tracked emotion categories, in chart/legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Surprised,
    Anger,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Anger,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Neutral => "Neutral",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprised => "Surprised",
            Emotion::Anger => "Anger",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EmotionCounts {
    #[serde(deserialize_with = "count")]
    pub neutral: i64,
    #[serde(deserialize_with = "count")]
    pub happy: i64,
    #[serde(deserialize_with = "count")]
    pub sad: i64,
    #[serde(deserialize_with = "count")]
    pub surprised: i64,
    #[serde(deserialize_with = "count")]
    pub anger: i64,
}

impl EmotionCounts {
    pub fn get(&self, e: Emotion) -> i64 {
        match e {
            Emotion::Neutral => self.neutral,
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Surprised => self.surprised,
            Emotion::Anger => self.anger,
        }
    }

    pub fn from_array(v: [i64; 5]) -> Self {
        Self {
            neutral: v[0],
            happy: v[1],
            sad: v[2],
            surprised: v[3],
            anger: v[4],
        }
    }

    pub fn to_array(self) -> [i64; 5] {
        Emotion::ALL.map(|e| self.get(e))
    }
}

/// One recorded observation: sample index plus the five counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub index: i64,
    pub counts: EmotionCounts,
}

// Publishers disagree on number encoding: the camera-side monitor quotes its
// integers, other senders emit plain numbers or floats.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
}

fn count<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match RawCount::deserialize(d)? {
        RawCount::Int(v) => Ok(v),
        RawCount::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
        RawCount::Float(v) => Err(de::Error::custom(format!("count is not finite: {v}"))),
        RawCount::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("count is not an integer: {s:?}"))),
    }
}

/// Decode one raw MQTT payload into counts.
pub fn decode_payload(payload: &[u8]) -> Result<EmotionCounts, FeedError> {
    let text = std::str::from_utf8(payload)?;
    Ok(serde_json::from_str::<EmotionCounts>(text)?)
}
