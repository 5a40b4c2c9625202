use thiserror::Error;

use super::mission::MissionId;

/// Errors raised while constructing live rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid target {target}: only -1 (require all) may be negative")]
    NegativeTarget { target: i64 },
}

/// Errors raised while rendering tooltip text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TooltipError {
    #[error("mission id {id} is missing from the tooltip lookup")]
    UnknownMission { id: MissionId },
}
