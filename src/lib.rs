mod compile;
mod convert;
mod error;
mod evaluate;
mod payload;
mod tooltip;
mod types;

pub use error::GateError;
pub use payload::PayloadError;
pub use types::{
    AccessPredicate, AccessRule, BeatMissions, BeatMissionsData, CollectedItems,
    CollectionState, CountMissions, CountMissionsData, EntryRule, Mission, MissionId,
    MissionInfo, MissionLookup, PlayerId, RuleData, RuleError, SubRule, SubRuleData,
    TooltipError, VisualReq, VisualReqData, REQUIRE_ALL,
};
