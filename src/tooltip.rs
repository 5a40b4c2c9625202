use std::borrow::Borrow;

use crate::types::{
    BeatMissionsData, CountMissionsData, MissionLookup, RuleData, SubRuleData, TooltipError,
    VisualReqData,
};

/// Indent string for a nesting level: one space less than the level, none
/// below level two.
fn indent(level: usize) -> String {
    " ".repeat(level.saturating_sub(1))
}

/// `header` followed by one `- item` line per entry.
fn bulleted<S: Borrow<str>>(header: &str, indent: &str, items: &[S]) -> String {
    let separator = format!("\n{indent}- ");
    let mut out = String::from(header);
    out.push_str(&separator);
    out.push_str(&items.join(separator.as_str()));
    out
}

fn label<'a, L>(req: &'a VisualReqData, missions: &'a L) -> Result<&'a str, TooltipError>
where
    L: MissionLookup + ?Sized,
{
    match req {
        VisualReqData::Label(text) => Ok(text.as_str()),
        VisualReqData::Mission(id) => missions
            .mission_name(*id)
            .ok_or(TooltipError::UnknownMission { id: *id }),
    }
}

fn labels<'a, L>(
    reqs: &'a [VisualReqData],
    missions: &'a L,
) -> Result<Vec<&'a str>, TooltipError>
where
    L: MissionLookup + ?Sized,
{
    reqs.iter().map(|req| label(req, missions)).collect()
}

impl RuleData {
    /// Render human-readable requirement text.
    ///
    /// `indents` is the nesting level; each nested condition is rendered two
    /// levels deeper than its parent.
    ///
    /// # Errors
    ///
    /// Returns [`TooltipError::UnknownMission`] if a visual requirement names a
    /// mission id absent from `missions`.
    pub fn tooltip<L>(&self, indents: usize, missions: &L) -> Result<String, TooltipError>
    where
        L: MissionLookup + ?Sized,
    {
        match self {
            RuleData::BeatMissions(rule) => rule.tooltip(indents, missions),
            RuleData::CountMissions(rule) => rule.tooltip(indents, missions),
            RuleData::SubRule(rule) => rule.tooltip(indents, missions),
        }
    }
}

impl BeatMissionsData {
    /// # Errors
    ///
    /// Returns [`TooltipError::UnknownMission`] for an unresolvable mission id.
    pub fn tooltip<L>(&self, indents: usize, missions: &L) -> Result<String, TooltipError>
    where
        L: MissionLookup + ?Sized,
    {
        if let [req] = self.visual_reqs.as_slice() {
            return Ok(format!("Beat {}", label(req, missions)?));
        }
        let labels = labels(&self.visual_reqs, missions)?;
        Ok(bulleted("Beat all of these:", &indent(indents), &labels))
    }
}

impl CountMissionsData {
    /// # Errors
    ///
    /// Returns [`TooltipError::UnknownMission`] for an unresolvable mission id.
    pub fn tooltip<L>(&self, indents: usize, missions: &L) -> Result<String, TooltipError>
    where
        L: MissionLookup + ?Sized,
    {
        let amount = if self.amount == self.mission_ids.len() {
            "all".to_owned()
        } else {
            self.amount.to_string()
        };
        if let [req] = self.visual_reqs.as_slice() {
            let label = label(req, missions)?;
            if self.amount == 1 {
                return Ok(format!("Beat {label}"));
            }
            return Ok(format!("Beat {amount} missions from {label}"));
        }
        let noun = if self.amount == 1 { "mission" } else { "missions" };
        let labels = labels(&self.visual_reqs, missions)?;
        Ok(bulleted(
            &format!("Beat {amount} {noun} from:"),
            &indent(indents),
            &labels,
        ))
    }
}

impl SubRuleData {
    /// # Errors
    ///
    /// Returns [`TooltipError::UnknownMission`] for an unresolvable mission id
    /// anywhere in the tree.
    pub fn tooltip<L>(&self, indents: usize, missions: &L) -> Result<String, TooltipError>
    where
        L: MissionLookup + ?Sized,
    {
        let amount = if self.amount == self.sub_rules.len() {
            // A lone required child needs no wrapper.
            if let [only] = self.sub_rules.as_slice() {
                return only.tooltip(indents, missions);
            }
            "all".to_owned()
        } else {
            self.amount.to_string()
        };
        let conditions = self
            .sub_rules
            .iter()
            .map(|rule| rule.tooltip(indents + 2, missions))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bulleted(
            &format!("Fulfill {amount} of these conditions:"),
            &indent(indents),
            &conditions,
        ))
    }
}
