//! Severity applied to a failed store write.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Hand the error back; the binary exits non-zero.
    Fatal,
    /// Print a warning and carry on.
    Warn,
}

impl FailurePolicy {
    /// Apply the policy to the result of `op`.
    ///
    /// Only persistence failures are downgraded by `Warn`; any other error,
    /// such as a rejected transition, is always returned.
    pub fn apply<T>(self, op: &str, result: AppResult<T>) -> AppResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_persistence() && self == FailurePolicy::Warn => {
                warning(format!("{} was not saved: {}", op, e));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
