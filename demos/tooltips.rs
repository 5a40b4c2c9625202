use std::collections::HashMap;

use mission_gates::{MissionId, MissionInfo, RuleData};

const PAYLOAD: &str = r#"{
    "amount": 1,
    "sub_rules": [
        {"mission_ids": [1, 2], "visual_reqs": [1, 2]},
        {"mission_ids": [3, 4, 5], "amount": 2, "visual_reqs": ["the Covert missions"]},
        {
            "amount": 2,
            "sub_rules": [
                {"mission_ids": [4], "visual_reqs": [4]},
                {"mission_ids": [5], "visual_reqs": [5]}
            ]
        }
    ]
}"#;

fn main() {
    let missions: HashMap<MissionId, MissionInfo> = [
        "Devil's Playground",
        "Welcome to the Jungle",
        "Breakout",
        "Ghost of a Chance",
        "The Great Train Robbery",
    ]
    .into_iter()
    .zip(1..)
    .map(|(name, id)| (id, MissionInfo::new(id, name)))
    .collect();

    let rule = match RuleData::from_json_str(PAYLOAD) {
        Ok(rule) => rule,
        Err(err) => {
            eprintln!("Failed to parse rule payload: {err}");
            std::process::exit(1);
        }
    };

    println!("{rule}\n");
    for indents in [0, 3] {
        match rule.tooltip(indents, &missions) {
            Ok(text) => println!("indent level {indents}:\n{text}\n"),
            Err(err) => eprintln!("Failed to render tooltip: {err}"),
        }
    }

    // A lookup missing a referenced mission is reported, not rendered blank.
    let mut partial = missions.clone();
    partial.remove(&4);
    if let Err(err) = rule.tooltip(0, &partial) {
        println!("partial lookup: {err}");
    }
}
