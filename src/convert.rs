use crate::types::{
    BeatMissions, BeatMissionsData, CountMissions, CountMissionsData, EntryRule, Mission, RuleData,
    SubRule, SubRuleData, VisualReq, VisualReqData,
};

impl<M: Mission> From<&VisualReq<M>> for VisualReqData {
    fn from(req: &VisualReq<M>) -> Self {
        match req {
            VisualReq::Label(label) => VisualReqData::Label(label.clone()),
            VisualReq::Mission(mission) => VisualReqData::Mission(mission.id()),
        }
    }
}

fn resolve_visual_reqs<M: Mission>(reqs: &[VisualReq<M>]) -> Vec<VisualReqData> {
    reqs.iter().map(VisualReqData::from).collect()
}

impl<M: Mission> From<&BeatMissions<M>> for BeatMissionsData {
    fn from(rule: &BeatMissions<M>) -> Self {
        BeatMissionsData::new(
            rule.missions().iter().map(|m| m.id()),
            resolve_visual_reqs(rule.visual_reqs()),
        )
    }
}

impl<M: Mission> From<&CountMissions<M>> for CountMissionsData {
    fn from(rule: &CountMissions<M>) -> Self {
        CountMissionsData::new(
            rule.missions().iter().map(|m| m.id()),
            rule.target(),
            resolve_visual_reqs(rule.visual_reqs()),
        )
    }
}

impl<M: Mission> From<&SubRule<M>> for SubRuleData {
    fn from(rule: &SubRule<M>) -> Self {
        SubRuleData::new(
            rule.rules().iter().map(RuleData::from).collect(),
            rule.target(),
        )
    }
}

impl<M: Mission> From<&EntryRule<M>> for RuleData {
    fn from(rule: &EntryRule<M>) -> Self {
        match rule {
            EntryRule::BeatMissions(rule) => RuleData::BeatMissions(rule.into()),
            EntryRule::CountMissions(rule) => RuleData::CountMissions(rule.into()),
            EntryRule::SubRule(rule) => RuleData::SubRule(rule.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::{
        BeatMissions, BeatMissionsData, CountMissions, CountMissionsData, EntryRule, MissionInfo,
        RuleData, SubRule, SubRuleData, VisualReq, VisualReqData, REQUIRE_ALL,
    };

    fn mission(id: u32, name: &str) -> Arc<MissionInfo> {
        Arc::new(MissionInfo::new(id, name))
    }

    #[test]
    fn beat_missions_resolves_visual_reqs() {
        let alpha = mission(1, "Alpha");
        let rule: EntryRule<MissionInfo> = BeatMissions::new(
            [alpha.clone(), mission(2, "Beta")],
            vec![VisualReq::Mission(alpha), VisualReq::label("the Beta mission")],
        )
        .into();

        assert_eq!(
            rule.to_slot_data(),
            RuleData::BeatMissions(BeatMissionsData::new(
                [1, 2],
                vec![
                    VisualReqData::Mission(1),
                    VisualReqData::Label("the Beta mission".to_owned()),
                ],
            ))
        );
    }

    #[test]
    fn count_missions_carries_clamped_target() {
        let rule: EntryRule<MissionInfo> = CountMissions::new(
            [mission(1, "Alpha"), mission(2, "Beta")],
            REQUIRE_ALL,
            vec![VisualReq::label("Act 1")],
        )
        .unwrap()
        .into();

        assert_eq!(
            rule.to_slot_data(),
            RuleData::CountMissions(CountMissionsData::new(
                [1, 2],
                2,
                vec![VisualReqData::Label("Act 1".to_owned())],
            ))
        );
    }

    #[test]
    fn sub_rule_converts_recursively_in_order() {
        let rule: EntryRule<MissionInfo> = SubRule::new(
            vec![
                CountMissions::new([mission(3, "Gamma")], 1, vec![])
                    .unwrap()
                    .into(),
                BeatMissions::new([mission(1, "Alpha")], vec![]).into(),
            ],
            1,
        )
        .unwrap()
        .into();

        assert_eq!(
            rule.to_slot_data(),
            RuleData::SubRule(SubRuleData::new(
                vec![
                    CountMissionsData::new([3], 1, vec![]).into(),
                    BeatMissionsData::new([1], vec![]).into(),
                ],
                1,
            ))
        );
    }

    #[test]
    fn conversion_preserves_evaluation() {
        let alpha = mission(1, "Alpha");
        let beta = mission(2, "Beta");
        let rule: EntryRule<MissionInfo> = SubRule::new(
            vec![
                BeatMissions::new([alpha.clone()], vec![]).into(),
                CountMissions::new([beta.clone()], 1, vec![]).unwrap().into(),
            ],
            REQUIRE_ALL,
        )
        .unwrap()
        .into();
        let data = rule.to_slot_data();

        let live: HashSet<Arc<MissionInfo>> = [alpha].into_iter().collect();
        let ids: HashSet<u32> = [1].into_iter().collect();
        assert_eq!(rule.is_fulfilled(&live), data.is_fulfilled(&ids));

        let live: HashSet<Arc<MissionInfo>> = [mission(1, "Alpha"), beta].into_iter().collect();
        let ids: HashSet<u32> = [1, 2].into_iter().collect();
        assert!(rule.is_fulfilled(&live));
        assert!(data.is_fulfilled(&ids));
    }
}
