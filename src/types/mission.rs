use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// Stable integer identifier of a mission.
pub type MissionId = u32;

/// Identifier of the player (slot) an access predicate is compiled for.
pub type PlayerId = u32;

/// A unit of completable content owned by the surrounding mission table.
///
/// Live rules hold missions behind [`Arc`] and compare them with `Eq`/`Hash`,
/// so two handles to the same mission must compare equal.
pub trait Mission: Eq + Hash {
    /// Capability key granted when the mission is beaten.
    type Token;

    fn id(&self) -> MissionId;

    fn name(&self) -> &str;

    /// The token a player holds once this mission has been beaten.
    fn beat_item(&self) -> Self::Token;
}

impl<M: Mission> Mission for Arc<M> {
    type Token = M::Token;

    fn id(&self) -> MissionId {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn beat_item(&self) -> Self::Token {
        (**self).beat_item()
    }
}

/// Minimal mission record: an id and a display name.
///
/// Its completion token is the string `"Beat {name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissionInfo {
    id: MissionId,
    name: String,
}

impl MissionInfo {
    pub fn new(id: MissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Mission for MissionInfo {
    type Token = String;

    fn id(&self) -> MissionId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn beat_item(&self) -> String {
        format!("Beat {}", self.name)
    }
}

/// Resolves mission ids to display names when rendering tooltips.
pub trait MissionLookup {
    fn mission_name(&self, id: MissionId) -> Option<&str>;
}

impl<M: Mission, S: BuildHasher> MissionLookup for HashMap<MissionId, M, S> {
    fn mission_name(&self, id: MissionId) -> Option<&str> {
        self.get(&id).map(Mission::name)
    }
}

impl<M: Mission> MissionLookup for BTreeMap<MissionId, M> {
    fn mission_name(&self, id: MissionId) -> Option<&str> {
        self.get(&id).map(Mission::name)
    }
}
