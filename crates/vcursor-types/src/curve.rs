//! Keyed acceleration curve.
//!
//! Maps stick magnitude to an acceleration scalar. Keys are kept sorted by
//! time; evaluation interpolates linearly between neighbours and holds the
//! first/last value outside the keyed range.

use serde::{Deserialize, Serialize};

/// A single `(time, value)` key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

#[derive(Serialize, Deserialize)]
struct CurveDef {
    #[serde(default)]
    keys: Vec<CurveKey>,
}

/// Piecewise-linear curve over stick magnitude.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CurveDef", into = "CurveDef")]
pub struct AccelerationCurve {
    keys: Vec<CurveKey>,
}

impl From<CurveDef> for AccelerationCurve {
    fn from(def: CurveDef) -> Self {
        Self::from_keys(def.keys)
    }
}

impl From<AccelerationCurve> for CurveDef {
    fn from(curve: AccelerationCurve) -> Self {
        Self { keys: curve.keys }
    }
}

impl AccelerationCurve {
    /// Build a curve, dropping non-finite keys and sorting by time.
    pub fn from_keys(keys: impl IntoIterator<Item = CurveKey>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .filter(|k| k.time.is_finite() && k.value.is_finite())
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A curve returning `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::from_keys([CurveKey::new(0.0, value)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluate at `time`. An empty curve evaluates to zero.
    pub fn eval(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        // First key strictly after `time`; guaranteed to exist and be > 0.
        let hi = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[hi - 1];
        let b = self.keys[hi];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        let t = (time - a.time) / span;
        a.value + (b.value - a.value) * t
    }
}
