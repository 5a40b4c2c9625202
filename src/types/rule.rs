use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use super::access::{AccessPredicate, AccessRule};
use super::error::RuleError;
use super::mission::{Mission, MissionId, PlayerId};
use super::rule_data::RuleData;
use super::state::CollectionState;

/// Target sentinel meaning "every candidate" (or every child rule).
pub const REQUIRE_ALL: i64 = -1;

/// Clamp a requested target against the size of the counted collection.
///
/// `-1` and anything above `len` become `len`. Other negative targets are
/// rejected.
pub(crate) fn resolve_target(target: i64, len: usize) -> Result<usize, RuleError> {
    match usize::try_from(target) {
        Ok(target) => Ok(target.min(len)),
        Err(_) if target == REQUIRE_ALL => Ok(len),
        Err(_) => Err(RuleError::NegativeTarget { target }),
    }
}

/// A display-only requirement shown in tooltips: either a literal label or a
/// mission whose name is looked up at render time.
#[derive(Debug)]
pub enum VisualReq<M> {
    Label(String),
    Mission(Arc<M>),
}

impl<M> VisualReq<M> {
    pub fn label(label: impl Into<String>) -> Self {
        VisualReq::Label(label.into())
    }
}

/// Satisfied once every required mission is beaten.
#[derive(Debug)]
pub struct BeatMissions<M> {
    missions: HashSet<Arc<M>>,
    visual_reqs: Vec<VisualReq<M>>,
}

impl<M: Mission> BeatMissions<M> {
    pub fn new(
        missions: impl IntoIterator<Item = Arc<M>>,
        visual_reqs: Vec<VisualReq<M>>,
    ) -> Self {
        Self {
            missions: missions.into_iter().collect(),
            visual_reqs,
        }
    }

    #[must_use]
    pub fn missions(&self) -> &HashSet<Arc<M>> {
        &self.missions
    }

    #[must_use]
    pub fn visual_reqs(&self) -> &[VisualReq<M>] {
        &self.visual_reqs
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<Arc<M>>) -> bool {
        self.missions.is_subset(beaten)
    }
}

/// Satisfied once at least `target` of the candidate missions are beaten.
#[derive(Debug)]
pub struct CountMissions<M> {
    missions: HashSet<Arc<M>>,
    target: usize,
    visual_reqs: Vec<VisualReq<M>>,
}

impl<M: Mission> CountMissions<M> {
    /// Build a counting gate. `target` is clamped to the candidate count;
    /// pass [`REQUIRE_ALL`] to require every candidate.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NegativeTarget`] for negative targets other than
    /// [`REQUIRE_ALL`].
    pub fn new(
        missions: impl IntoIterator<Item = Arc<M>>,
        target: i64,
        visual_reqs: Vec<VisualReq<M>>,
    ) -> Result<Self, RuleError> {
        let missions: HashSet<Arc<M>> = missions.into_iter().collect();
        let target = resolve_target(target, missions.len())?;
        Ok(Self {
            missions,
            target,
            visual_reqs,
        })
    }

    #[must_use]
    pub fn missions(&self) -> &HashSet<Arc<M>> {
        &self.missions
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn visual_reqs(&self) -> &[VisualReq<M>] {
        &self.visual_reqs
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<Arc<M>>) -> bool {
        self.missions.intersection(beaten).count() >= self.target
    }
}

/// Satisfied once at least `target` of the child rules are satisfied.
#[derive(Debug)]
pub struct SubRule<M> {
    rules: Vec<EntryRule<M>>,
    target: usize,
}

impl<M: Mission> SubRule<M> {
    /// Build a composite gate. `target` is clamped to the child count;
    /// pass [`REQUIRE_ALL`] to require every child.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NegativeTarget`] for negative targets other than
    /// [`REQUIRE_ALL`].
    pub fn new(rules: Vec<EntryRule<M>>, target: i64) -> Result<Self, RuleError> {
        let target = resolve_target(target, rules.len())?;
        Ok(Self { rules, target })
    }

    #[must_use]
    pub fn rules(&self) -> &[EntryRule<M>] {
        &self.rules
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<Arc<M>>) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.is_fulfilled(beaten))
            .take(self.target)
            .count()
            >= self.target
    }
}

/// A gate attached to the mission graph while it is being built.
///
/// Live rules reference missions directly. Use [`to_slot_data`](Self::to_slot_data)
/// to obtain the self-contained [`RuleData`] form once the graph is gone.
#[derive(Debug)]
pub enum EntryRule<M> {
    BeatMissions(BeatMissions<M>),
    CountMissions(CountMissions<M>),
    SubRule(SubRule<M>),
}

impl<M: Mission> EntryRule<M> {
    /// Whether the gate is open given the missions beaten so far.
    #[must_use]
    pub fn is_fulfilled(&self, beaten: &HashSet<Arc<M>>) -> bool {
        match self {
            EntryRule::BeatMissions(rule) => rule.is_fulfilled(beaten),
            EntryRule::CountMissions(rule) => rule.is_fulfilled(beaten),
            EntryRule::SubRule(rule) => rule.is_fulfilled(beaten),
        }
    }

    /// Whether the gate is open before anything has been beaten.
    #[must_use]
    pub fn is_always_fulfilled(&self) -> bool {
        self.is_fulfilled(&HashSet::new())
    }

    /// Resolve the rule tree into an [`AccessRule`] for `player`.
    ///
    /// Child rules are compiled once here; evaluating the result never walks
    /// the live rule again.
    #[must_use]
    pub fn compile(&self, player: PlayerId) -> AccessRule<M::Token> {
        crate::compile::compile(self, player)
    }

    /// Compile into a boxed predicate over a [`CollectionState`].
    ///
    /// The predicate reads the state it is given on every call and is safe to
    /// share between threads.
    #[must_use]
    pub fn to_lambda<S>(&self, player: PlayerId) -> AccessPredicate<S>
    where
        S: CollectionState<Token = M::Token> + 'static,
        M::Token: Send + Sync + 'static,
    {
        self.compile(player).into_predicate()
    }

    /// Convert into the id-only form shipped to clients.
    #[must_use]
    pub fn to_slot_data(&self) -> RuleData {
        RuleData::from(self)
    }

    /// Every mission id this rule tree mentions, including display-only
    /// references.
    #[must_use]
    pub fn referenced_missions(&self) -> BTreeSet<MissionId> {
        let mut ids = BTreeSet::new();
        self.collect_missions(&mut ids);
        ids
    }

    fn collect_missions(&self, out: &mut BTreeSet<MissionId>) {
        let (missions, visual_reqs) = match self {
            EntryRule::BeatMissions(rule) => (rule.missions(), rule.visual_reqs()),
            EntryRule::CountMissions(rule) => (rule.missions(), rule.visual_reqs()),
            EntryRule::SubRule(rule) => {
                for child in rule.rules() {
                    child.collect_missions(out);
                }
                return;
            }
        };
        out.extend(missions.iter().map(|mission| mission.id()));
        out.extend(visual_reqs.iter().filter_map(|req| match req {
            VisualReq::Mission(mission) => Some(mission.id()),
            VisualReq::Label(_) => None,
        }));
    }
}

impl<M> From<BeatMissions<M>> for EntryRule<M> {
    fn from(rule: BeatMissions<M>) -> Self {
        EntryRule::BeatMissions(rule)
    }
}

impl<M> From<CountMissions<M>> for EntryRule<M> {
    fn from(rule: CountMissions<M>) -> Self {
        EntryRule::CountMissions(rule)
    }
}

impl<M> From<SubRule<M>> for EntryRule<M> {
    fn from(rule: SubRule<M>) -> Self {
        EntryRule::SubRule(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MissionInfo;

    fn missions() -> Vec<Arc<MissionInfo>> {
        vec![
            Arc::new(MissionInfo::new(1, "Alpha")),
            Arc::new(MissionInfo::new(2, "Beta")),
            Arc::new(MissionInfo::new(3, "Gamma")),
        ]
    }

    fn beaten(missions: &[Arc<MissionInfo>], ids: &[MissionId]) -> HashSet<Arc<MissionInfo>> {
        missions
            .iter()
            .filter(|m| ids.contains(&m.id()))
            .cloned()
            .collect()
    }

    #[test]
    fn resolve_target_clamps() {
        assert_eq!(resolve_target(-1, 4), Ok(4));
        assert_eq!(resolve_target(9, 4), Ok(4));
        assert_eq!(resolve_target(4, 4), Ok(4));
        assert_eq!(resolve_target(2, 4), Ok(2));
        assert_eq!(resolve_target(0, 4), Ok(0));
        assert_eq!(resolve_target(3, 0), Ok(0));
    }

    #[test]
    fn resolve_target_rejects_other_negatives() {
        assert_eq!(
            resolve_target(-2, 4),
            Err(RuleError::NegativeTarget { target: -2 })
        );
    }

    #[test]
    fn beat_missions_requires_superset() {
        let m = missions();
        let rule = BeatMissions::new(m[..2].iter().cloned(), vec![]);
        assert!(!rule.is_fulfilled(&beaten(&m, &[1])));
        assert!(rule.is_fulfilled(&beaten(&m, &[1, 2])));
        assert!(rule.is_fulfilled(&beaten(&m, &[1, 2, 3])));
    }

    #[test]
    fn count_missions_counts_candidates_only() {
        let m = missions();
        let rule = CountMissions::new(m[1..].iter().cloned(), 1, vec![]).unwrap();
        assert!(!rule.is_fulfilled(&beaten(&m, &[1])));
        assert!(rule.is_fulfilled(&beaten(&m, &[3])));
    }

    #[test]
    fn count_missions_clamps_target() {
        let m = missions();
        let rule = CountMissions::new(m.iter().cloned(), 10, vec![]).unwrap();
        assert_eq!(rule.target(), 3);
        let rule = CountMissions::new(m.iter().cloned(), REQUIRE_ALL, vec![]).unwrap();
        assert_eq!(rule.target(), 3);
    }

    #[test]
    fn count_missions_rejects_negative_target() {
        let m = missions();
        let result = CountMissions::new(m.iter().cloned(), -5, vec![]);
        assert!(matches!(
            result,
            Err(RuleError::NegativeTarget { target: -5 })
        ));
    }

    #[test]
    fn sub_rule_threshold() {
        let m = missions();
        let rule = SubRule::new(
            vec![
                BeatMissions::new([m[0].clone()], vec![]).into(),
                BeatMissions::new([m[1].clone()], vec![]).into(),
                BeatMissions::new([m[2].clone()], vec![]).into(),
            ],
            2,
        )
        .unwrap();
        assert!(!rule.is_fulfilled(&beaten(&m, &[1])));
        assert!(rule.is_fulfilled(&beaten(&m, &[1, 3])));
    }

    #[test]
    fn zero_of_n_is_always_fulfilled() {
        let m = missions();
        let rule: EntryRule<MissionInfo> = SubRule::new(
            vec![BeatMissions::new(m.iter().cloned(), vec![]).into()],
            0,
        )
        .unwrap()
        .into();
        assert!(rule.is_always_fulfilled());
    }

    #[test]
    fn beat_nothing_is_always_fulfilled() {
        let rule = EntryRule::from(BeatMissions::<MissionInfo>::new([], vec![]));
        assert!(rule.is_always_fulfilled());
    }

    #[test]
    fn referenced_missions_includes_visual_reqs() {
        let m = missions();
        let rule: EntryRule<MissionInfo> = SubRule::new(
            vec![
                BeatMissions::new(
                    [m[0].clone()],
                    vec![VisualReq::Mission(m[2].clone())],
                )
                .into(),
                CountMissions::new([m[1].clone()], 1, vec![VisualReq::label("Any")])
                    .unwrap()
                    .into(),
            ],
            REQUIRE_ALL,
        )
        .unwrap()
        .into();
        assert_eq!(
            rule.referenced_missions().into_iter().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
