use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A numeric attribute exactly as the dashboard sent it.
///
/// Form inputs arrive as JSON numbers or as numeric strings, and may be
/// missing altogether. The raw value is kept so that each consumer can apply
/// its own fallback: feasibility counts non-numeric input as zero, the solver
/// payload builder substitutes a sensible minimum.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeric(Value);

impl Numeric {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The coerced value, or `None` when the input is not a finite number.
    ///
    /// Accepts JSON numbers and strings whose trimmed content parses as a
    /// decimal. Everything else (null, booleans, empty strings, arrays,
    /// objects) is non-numeric.
    pub fn value(&self) -> Option<f64> {
        let parsed = match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// The coerced value, counting non-numeric input as zero.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Whether the attribute was absent from the request (or explicitly null).
    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Self(Value::from(v))
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Self(Value::from(v))
    }
}

impl From<i32> for Numeric {
    fn from(v: i32) -> Self {
        Self(Value::from(v))
    }
}

impl From<&str> for Numeric {
    fn from(v: &str) -> Self {
        Self(Value::from(v))
    }
}

/// Round to the nearest integer with halves going toward positive infinity.
///
/// This is the dashboard's rounding rule (`2.5 -> 3`, `-2.5 -> -2`), which
/// differs from [`f64::round`] for negative halves.
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}
