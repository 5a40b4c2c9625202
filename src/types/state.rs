use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::mission::PlayerId;

/// Capability view queried by compiled access predicates.
///
/// Implementations answer whether a player currently holds completion
/// tokens. Queries must not mutate the state.
pub trait CollectionState {
    type Token;

    fn has(&self, token: &Self::Token, player: PlayerId) -> bool;

    fn has_all(&self, tokens: &[Self::Token], player: PlayerId) -> bool {
        tokens.iter().all(|token| self.has(token, player))
    }
}

/// In-memory token inventory keyed by player.
#[derive(Debug, Clone)]
pub struct CollectedItems<T> {
    held: HashMap<PlayerId, HashSet<T>>,
}

impl<T> Default for CollectedItems<T> {
    fn default() -> Self {
        Self {
            held: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash> CollectedItems<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `token` to `player`, builder style.
    #[must_use]
    pub fn with(mut self, player: PlayerId, token: T) -> Self {
        self.collect(player, token);
        self
    }

    pub fn collect(&mut self, player: PlayerId, token: T) {
        self.held.entry(player).or_default().insert(token);
    }

    /// Number of distinct tokens held by `player`.
    #[must_use]
    pub fn count(&self, player: PlayerId) -> usize {
        self.held.get(&player).map_or(0, HashSet::len)
    }
}

impl<T: Eq + Hash> CollectionState for CollectedItems<T> {
    type Token = T;

    fn has(&self, token: &T, player: PlayerId) -> bool {
        self.held
            .get(&player)
            .is_some_and(|tokens| tokens.contains(token))
    }
}
