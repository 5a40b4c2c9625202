use std::collections::HashSet;
use std::sync::Arc;

use mission_gates::{
    BeatMissions, CollectedItems, CountMissions, EntryRule, Mission, MissionInfo, SubRule,
    VisualReq, REQUIRE_ALL,
};

fn main() {
    let liberation = Arc::new(MissionInfo::new(1, "Liberation Day"));
    let outlaws = Arc::new(MissionInfo::new(2, "The Outlaws"));
    let zero_hour = Arc::new(MissionInfo::new(3, "Zero Hour"));

    // Beat the opener, then any one of the two follow-ups.
    let rule: EntryRule<MissionInfo> = SubRule::new(
        vec![
            BeatMissions::new(
                [liberation.clone()],
                vec![VisualReq::Mission(liberation.clone())],
            )
            .into(),
            CountMissions::new(
                [outlaws.clone(), zero_hour.clone()],
                1,
                vec![VisualReq::label("the Mar Sara missions")],
            )
            .expect("target is non-negative")
            .into(),
        ],
        REQUIRE_ALL,
    )
    .expect("target is the require-all sentinel")
    .into();

    println!("open from the start: {}", rule.is_always_fulfilled());

    let beaten: HashSet<Arc<MissionInfo>> = [liberation.clone(), zero_hour.clone()].into();
    println!("open after Liberation Day and Zero Hour: {}", rule.is_fulfilled(&beaten));

    // Compile once, evaluate against item state many times.
    let check = rule.to_lambda::<CollectedItems<String>>(1);
    let mut state = CollectedItems::new().with(1, liberation.beat_item());
    println!("predicate with {} item(s): {}", state.count(1), check(&state));
    state.collect(1, outlaws.beat_item());
    println!("predicate with {} item(s): {}", state.count(1), check(&state));

    let data = rule.to_slot_data();
    println!("slot data: {data}");
    println!("payload: {}", data.to_json_string());
}
