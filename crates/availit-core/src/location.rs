use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One geocoder match, held exactly as the upstream sent it.
///
/// Nominatim sends `lat`/`lon` as decimal strings, but nothing here relies on
/// that: the entry is relayed unchanged, and [`LocationResult::coordinates`]
/// reads either strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationResult(Value);

impl LocationResult {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A top-level field of the match, if the match is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Parses `lat`/`lon` into floating point, or `None` if either is
    /// missing or not a number.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = coordinate(self.get("lat")?)?;
        let lon = coordinate(self.get("lon")?)?;
        Some((lat, lon))
    }
}

impl From<Value> for LocationResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}
