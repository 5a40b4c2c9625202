use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::mission::MissionId;

/// A resolved display requirement. Integers are mission ids looked up at
/// render time; strings are shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualReqData {
    Mission(MissionId),
    Label(String),
}

impl From<MissionId> for VisualReqData {
    fn from(id: MissionId) -> Self {
        VisualReqData::Mission(id)
    }
}

impl From<&str> for VisualReqData {
    fn from(label: &str) -> Self {
        VisualReqData::Label(label.to_owned())
    }
}

impl From<String> for VisualReqData {
    fn from(label: String) -> Self {
        VisualReqData::Label(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeatMissionsData {
    pub mission_ids: BTreeSet<MissionId>,
    pub visual_reqs: Vec<VisualReqData>,
}

impl BeatMissionsData {
    pub fn new(
        mission_ids: impl IntoIterator<Item = MissionId>,
        visual_reqs: Vec<VisualReqData>,
    ) -> Self {
        Self {
            mission_ids: mission_ids.into_iter().collect(),
            visual_reqs,
        }
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<MissionId>) -> bool {
        self.mission_ids.iter().all(|id| beaten.contains(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountMissionsData {
    pub mission_ids: BTreeSet<MissionId>,
    pub amount: usize,
    pub visual_reqs: Vec<VisualReqData>,
}

impl CountMissionsData {
    /// Built as-is: `amount` is not clamped, matching what a payload carries.
    pub fn new(
        mission_ids: impl IntoIterator<Item = MissionId>,
        amount: usize,
        visual_reqs: Vec<VisualReqData>,
    ) -> Self {
        Self {
            mission_ids: mission_ids.into_iter().collect(),
            amount,
            visual_reqs,
        }
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<MissionId>) -> bool {
        self.mission_ids
            .iter()
            .filter(|id| beaten.contains(*id))
            .count()
            >= self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRuleData {
    pub sub_rules: Vec<RuleData>,
    pub amount: usize,
}

impl SubRuleData {
    #[must_use]
    pub fn new(sub_rules: Vec<RuleData>, amount: usize) -> Self {
        Self { sub_rules, amount }
    }

    /// A gate with no children and amount zero. Always fulfilled.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<MissionId>) -> bool {
        self.sub_rules
            .iter()
            .filter(|rule| rule.is_fulfilled(beaten))
            .take(self.amount)
            .count()
            >= self.amount
    }
}

impl Default for SubRuleData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Self-contained, id-only form of an [`EntryRule`](super::EntryRule).
///
/// Carries no references into the mission graph, so it can be shipped to a
/// client and evaluated against ids of beaten missions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleData {
    BeatMissions(BeatMissionsData),
    CountMissions(CountMissionsData),
    SubRule(SubRuleData),
}

impl RuleData {
    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<MissionId>) -> bool {
        match self {
            RuleData::BeatMissions(rule) => rule.is_fulfilled(beaten),
            RuleData::CountMissions(rule) => rule.is_fulfilled(beaten),
            RuleData::SubRule(rule) => rule.is_fulfilled(beaten),
        }
    }

    /// Every mission id this rule tree mentions, including ids that only
    /// appear as visual requirements. A tooltip lookup must cover all of them.
    #[must_use]
    pub fn referenced_missions(&self) -> BTreeSet<MissionId> {
        let mut ids = BTreeSet::new();
        self.collect_missions(&mut ids);
        ids
    }

    fn collect_missions(&self, out: &mut BTreeSet<MissionId>) {
        let (mission_ids, visual_reqs) = match self {
            RuleData::BeatMissions(rule) => (&rule.mission_ids, &rule.visual_reqs),
            RuleData::CountMissions(rule) => (&rule.mission_ids, &rule.visual_reqs),
            RuleData::SubRule(rule) => {
                for child in &rule.sub_rules {
                    child.collect_missions(out);
                }
                return;
            }
        };
        out.extend(mission_ids.iter().copied());
        out.extend(visual_reqs.iter().filter_map(|req| match req {
            VisualReqData::Mission(id) => Some(*id),
            VisualReqData::Label(_) => None,
        }));
    }
}

impl From<BeatMissionsData> for RuleData {
    fn from(rule: BeatMissionsData) -> Self {
        RuleData::BeatMissions(rule)
    }
}

impl From<CountMissionsData> for RuleData {
    fn from(rule: CountMissionsData) -> Self {
        RuleData::CountMissions(rule)
    }
}

impl From<SubRuleData> for RuleData {
    fn from(rule: SubRuleData) -> Self {
        RuleData::SubRule(rule)
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &BTreeSet<MissionId>) -> fmt::Result {
    write!(f, "[")?;
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{id}")?;
    }
    write!(f, "]")
}

impl fmt::Display for RuleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleData::BeatMissions(rule) => {
                write!(f, "beat")?;
                write_ids(f, &rule.mission_ids)
            }
            RuleData::CountMissions(rule) => {
                write!(f, "count({} of ", rule.amount)?;
                write_ids(f, &rule.mission_ids)?;
                write!(f, ")")
            }
            RuleData::SubRule(rule) => {
                write!(f, "fulfill({} of [", rule.amount)?;
                for (i, child) in rule.sub_rules.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "])")
            }
        }
    }
}
