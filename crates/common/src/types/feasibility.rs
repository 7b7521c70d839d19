use serde::{Deserialize, Serialize};

/// Outcome of the pre-flight feasibility check.
///
/// `ok` is false exactly when `errors` is non-empty; use [`Self::push_error`]
/// rather than touching the fields directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub ok: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    /// Reserved for soft findings; nothing produces warnings yet.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl FeasibilityResult {
    pub fn feasible() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.ok = false;
        self.errors.push(message.into());
    }
}

impl Default for FeasibilityResult {
    fn default() -> Self {
        Self::feasible()
    }
}
