mod access;
mod error;
mod mission;
mod rule;
mod rule_data;
mod state;

pub use access::{AccessPredicate, AccessRule};
pub(crate) use access::CompiledGate;
pub use error::{RuleError, TooltipError};
pub use mission::{Mission, MissionId, MissionInfo, MissionLookup, PlayerId};
pub use rule::{BeatMissions, CountMissions, EntryRule, SubRule, VisualReq, REQUIRE_ALL};
pub use rule_data::{BeatMissionsData, CountMissionsData, RuleData, SubRuleData, VisualReqData};
pub use state::{CollectedItems, CollectionState};
