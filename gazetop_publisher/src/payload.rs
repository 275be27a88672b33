//! Outgoing payload: the same five keys the gaze monitor publishes, with the
//! counts quoted as strings like the camera-side sender does.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionReport {
    #[serde(serialize_with = "quoted")]
    pub neutral: u32,
    #[serde(serialize_with = "quoted")]
    pub happy: u32,
    #[serde(serialize_with = "quoted")]
    pub sad: u32,
    #[serde(serialize_with = "quoted")]
    pub surprised: u32,
    #[serde(serialize_with = "quoted")]
    pub anger: u32,
}

fn quoted<S: Serializer>(v: &u32, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

/// Simulated classroom: a fixed number of students whose expressions drift.
pub struct Classroom {
    rng: fastrand::Rng,
    students: u32,
    // Per-student emotion, as an index into the report fields
    moods: Vec<u8>,
}

impl Classroom {
    pub fn new(students: u32, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let moods = (0..students).map(|_| rng.u8(0..5)).collect();
        Self { rng, students, moods }
    }

    /// Let roughly a fifth of the students change expression, then report.
    pub fn step(&mut self) -> EmotionReport {
        for m in self.moods.iter_mut() {
            if self.rng.u8(0..5) == 0 {
                // Neutral is the most common resting expression
                *m = if self.rng.bool() { 0 } else { self.rng.u8(0..5) };
            }
        }
        self.report()
    }

    pub fn report(&self) -> EmotionReport {
        let mut counts = [0u32; 5];
        for &m in &self.moods {
            counts[m as usize] += 1;
        }
        EmotionReport {
            neutral: counts[0],
            happy: counts[1],
            sad: counts[2],
            surprised: counts[3],
            anger: counts[4],
        }
    }

    pub fn students(&self) -> u32 {
        self.students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_quoted() {
        let r = EmotionReport { neutral: 3, happy: 1, sad: 0, surprised: 2, anger: 0 };
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"neutral":"3","happy":"1","sad":"0","surprised":"2","anger":"0"}"#
        );
    }

    #[test]
    fn every_student_is_counted_once() {
        let mut class = Classroom::new(25, 42);
        for _ in 0..100 {
            let r = class.step();
            assert_eq!(r.neutral + r.happy + r.sad + r.surprised + r.anger, class.students());
        }
    }
}
