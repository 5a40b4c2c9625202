//! Conversion between [`RuleData`] trees and generic payloads.
//!
//! A payload is a `serde_json::Value` made of mappings, lists, integers and
//! strings. Rules carry no type tag; the variant is recovered from which keys
//! a mapping holds.
//!
//! ## Shape
//!
//! ```text
//! BeatMissionsData   {"mission_ids": [int], "visual_reqs": [int | str]}
//! CountMissionsData  {"mission_ids": [int], "amount": int, "visual_reqs": [int | str]}
//! SubRuleData        {"sub_rules": [rule], "amount": int}
//! ```
//!
//! ## Dispatch
//!
//! Checked in this order for every mapping, recursively:
//!
//! 1. has `sub_rules` → [`SubRuleData`]
//! 2. has `amount` → [`CountMissionsData`]
//! 3. otherwise → [`BeatMissionsData`]
//!
//! Leaf mappings are read field by field with no coercion or defaults, and
//! unknown keys are rejected.

mod error;

pub use error::PayloadError;

use log::{debug, trace};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::types::{BeatMissionsData, CountMissionsData, RuleData, SubRuleData};

const SUB_RULES: &str = "sub_rules";
const AMOUNT: &str = "amount";
const ROOT: &str = "$";

impl RuleData {
    /// Parse a rule tree from a payload using structural dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if any node is not a mapping, lacks a
    /// required field, or carries a field of the wrong type.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let rule = parse_rule(payload, ROOT)?;
        debug!("parsed rule payload: {rule}");
        Ok(rule)
    }

    #[must_use]
    pub fn to_payload(&self) -> Value {
        match self {
            RuleData::BeatMissions(rule) => json!({
                "mission_ids": rule.mission_ids,
                "visual_reqs": rule.visual_reqs,
            }),
            RuleData::CountMissions(rule) => json!({
                "mission_ids": rule.mission_ids,
                "amount": rule.amount,
                "visual_reqs": rule.visual_reqs,
            }),
            RuleData::SubRule(rule) => rule.to_payload(),
        }
    }

    /// Parse a rule tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`](crate::GateError) if the text is not valid JSON
    /// or the payload is malformed.
    pub fn from_json_str(input: &str) -> Result<Self, crate::GateError> {
        let payload: Value = serde_json::from_str(input)?;
        Ok(Self::from_payload(&payload)?)
    }

    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_payload().to_string()
    }
}

impl SubRuleData {
    /// Parse a composite rule from a payload. The payload must carry
    /// `sub_rules` and `amount`; children are dispatched structurally.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] on any malformed node.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let fields = payload.as_object().ok_or_else(|| PayloadError::NotAMapping {
            path: ROOT.to_owned(),
        })?;
        let rule = parse_sub_rule(fields, ROOT)?;
        debug!(
            "parsed sub-rule payload: {} children, amount {}",
            rule.sub_rules.len(),
            rule.amount
        );
        Ok(rule)
    }

    #[must_use]
    pub fn to_payload(&self) -> Value {
        let sub_rules: Vec<Value> = self.sub_rules.iter().map(RuleData::to_payload).collect();
        json!({
            "sub_rules": sub_rules,
            "amount": self.amount,
        })
    }
}

fn parse_rule(payload: &Value, path: &str) -> Result<RuleData, PayloadError> {
    let fields = payload.as_object().ok_or_else(|| PayloadError::NotAMapping {
        path: path.to_owned(),
    })?;

    if fields.contains_key(SUB_RULES) {
        trace!("{path}: sub-rule");
        parse_sub_rule(fields, path).map(RuleData::SubRule)
    } else if fields.contains_key(AMOUNT) {
        trace!("{path}: count-missions rule");
        parse_leaf::<CountMissionsData>(payload, path, "count-missions")
            .map(RuleData::CountMissions)
    } else {
        trace!("{path}: beat-missions rule");
        parse_leaf::<BeatMissionsData>(payload, path, "beat-missions")
            .map(RuleData::BeatMissions)
    }
}

fn parse_sub_rule(fields: &Map<String, Value>, path: &str) -> Result<SubRuleData, PayloadError> {
    let amount = fields
        .get(AMOUNT)
        .ok_or_else(|| PayloadError::MissingField {
            path: path.to_owned(),
            field: AMOUNT,
        })?
        .as_u64()
        .and_then(|amount| usize::try_from(amount).ok())
        .ok_or_else(|| PayloadError::InvalidField {
            path: path.to_owned(),
            field: AMOUNT,
            expected: "a non-negative integer",
        })?;

    let children = fields
        .get(SUB_RULES)
        .ok_or_else(|| PayloadError::MissingField {
            path: path.to_owned(),
            field: SUB_RULES,
        })?
        .as_array()
        .ok_or_else(|| PayloadError::InvalidField {
            path: path.to_owned(),
            field: SUB_RULES,
            expected: "a list of rules",
        })?;

    let sub_rules = children
        .iter()
        .enumerate()
        .map(|(i, child)| parse_rule(child, &format!("{path}.{SUB_RULES}[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubRuleData { sub_rules, amount })
}

fn parse_leaf<T: DeserializeOwned>(
    payload: &Value,
    path: &str,
    kind: &'static str,
) -> Result<T, PayloadError> {
    T::deserialize(payload).map_err(|source| PayloadError::MalformedLeaf {
        path: path.to_owned(),
        kind,
        source,
    })
}

impl Serialize for RuleData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RuleData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        Self::from_payload(&payload).map_err(de::Error::custom)
    }
}

impl Serialize for SubRuleData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SubRuleData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        Self::from_payload(&payload).map_err(de::Error::custom)
    }
}
