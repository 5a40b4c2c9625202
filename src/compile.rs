use log::debug;

use crate::types::{AccessRule, CompiledGate, EntryRule, Mission, PlayerId};

pub(crate) fn compile<M: Mission>(rule: &EntryRule<M>, player: PlayerId) -> AccessRule<M::Token> {
    let gate = compile_gate(rule);
    debug!(
        "compiled access rule for player {player}: {} gate nodes",
        gate_count(&gate)
    );
    AccessRule { player, gate }
}

fn compile_gate<M: Mission>(rule: &EntryRule<M>) -> CompiledGate<M::Token> {
    match rule {
        EntryRule::BeatMissions(rule) => {
            CompiledGate::All(rule.missions().iter().map(|m| m.beat_item()).collect())
        }
        EntryRule::CountMissions(rule) => CompiledGate::AtLeast {
            tokens: rule.missions().iter().map(|m| m.beat_item()).collect(),
            target: rule.target(),
        },
        EntryRule::SubRule(rule) => CompiledGate::Threshold {
            gates: rule.rules().iter().map(compile_gate).collect(),
            target: rule.target(),
        },
    }
}

fn gate_count<T>(gate: &CompiledGate<T>) -> usize {
    match gate {
        CompiledGate::All(_) | CompiledGate::AtLeast { .. } => 1,
        CompiledGate::Threshold { gates, .. } => 1 + gates.iter().map(gate_count).sum::<usize>(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::types::CompiledGate;
    use crate::{BeatMissions, CountMissions, EntryRule, MissionInfo, SubRule, REQUIRE_ALL};

    fn mission(id: u32, name: &str) -> Arc<MissionInfo> {
        Arc::new(MissionInfo::new(id, name))
    }

    #[test]
    fn beat_missions_compiles_to_all_tokens() {
        let rule: EntryRule<MissionInfo> =
            BeatMissions::new([mission(1, "Alpha")], vec![]).into();
        let compiled = rule.compile(4);
        assert_eq!(compiled.player(), 4);
        assert_eq!(compiled.gate, CompiledGate::All(vec!["Beat Alpha".to_owned()]));
    }

    #[test]
    fn count_missions_keeps_clamped_target() {
        let rule: EntryRule<MissionInfo> =
            CountMissions::new([mission(1, "Alpha")], REQUIRE_ALL, vec![])
                .unwrap()
                .into();
        match rule.compile(1).gate {
            CompiledGate::AtLeast { tokens, target } => {
                assert_eq!(tokens, vec!["Beat Alpha".to_owned()]);
                assert_eq!(target, 1);
            }
            other => panic!("expected AtLeast, got {other:?}"),
        }
    }

    #[test]
    fn sub_rule_compiles_children_in_order() {
        let rule: EntryRule<MissionInfo> = SubRule::new(
            vec![
                BeatMissions::new([mission(1, "Alpha")], vec![]).into(),
                CountMissions::new([mission(2, "Beta")], 1, vec![])
                    .unwrap()
                    .into(),
            ],
            1,
        )
        .unwrap()
        .into();
        match rule.compile(1).gate {
            CompiledGate::Threshold { gates, target } => {
                assert_eq!(target, 1);
                assert_eq!(gates.len(), 2);
                assert!(matches!(gates[0], CompiledGate::All(_)));
                assert!(matches!(gates[1], CompiledGate::AtLeast { .. }));
            }
            other => panic!("expected Threshold, got {other:?}"),
        }
    }

    #[test]
    fn gate_count_walks_tree() {
        let gate: CompiledGate<String> = CompiledGate::Threshold {
            gates: vec![
                CompiledGate::All(vec![]),
                CompiledGate::Threshold {
                    gates: vec![CompiledGate::AtLeast {
                        tokens: vec![],
                        target: 0,
                    }],
                    target: 1,
                },
            ],
            target: 2,
        };
        assert_eq!(super::gate_count(&gate), 4);
    }
}
