use thiserror::Error;

use crate::payload::PayloadError;
use crate::{RuleError, TooltipError};

/// Unified error type covering rule construction, payload parsing, tooltip
/// rendering, and JSON text.
///
/// Returned by convenience methods like
/// [`RuleData::from_json_str()`](crate::RuleData::from_json_str).
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Tooltip(#[from] TooltipError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
