use std::sync::Arc;
use std::thread;

use mission_gates::{
    AccessPredicate, CollectedItems, CountMissions, EntryRule, Mission, MissionInfo,
};

fn main() {
    let missions: Vec<Arc<MissionInfo>> = ["Alpha", "Beta", "Gamma", "Delta"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Arc::new(MissionInfo::new(id, name)))
        .collect();

    let rule: EntryRule<MissionInfo> = CountMissions::new(missions.iter().cloned(), 3, vec![])
        .expect("target is non-negative")
        .into();

    // One predicate per player, shared with every worker.
    let predicates: Vec<Arc<AccessPredicate<CollectedItems<String>>>> =
        (1..=2).map(|player| Arc::new(rule.to_lambda(player))).collect();

    let state = Arc::new(
        CollectedItems::new()
            .with(1, missions[0].beat_item())
            .with(1, missions[1].beat_item())
            .with(1, missions[3].beat_item())
            .with(2, missions[2].beat_item()),
    );

    let handles: Vec<_> = predicates
        .into_iter()
        .zip(1_u32..)
        .map(|(check, player)| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                println!("[player {player}] gate open: {}", check(&state));
            })
        })
        .collect();

    for h in handles {
        h.join().expect("worker panicked");
    }
}
