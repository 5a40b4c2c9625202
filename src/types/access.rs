use super::mission::PlayerId;
use super::state::CollectionState;

/// Boxed single-argument predicate handed to item-placement logic.
pub type AccessPredicate<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// A live rule compiled for one player: missions are resolved to their
/// completion tokens and child rules are compiled ahead of time.
///
/// Produced by [`EntryRule::compile()`](super::EntryRule::compile). Immutable,
/// so it can be evaluated any number of times and shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule<T> {
    pub(crate) player: PlayerId,
    pub(crate) gate: CompiledGate<T>,
}

/// Compiled gate tree. Mirrors the live rule variants with tokens in place of
/// mission references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CompiledGate<T> {
    /// Every token must be held.
    All(Vec<T>),
    /// At least `target` of the tokens must be held.
    AtLeast { tokens: Vec<T>, target: usize },
    /// At least `target` of the child gates must pass.
    Threshold {
        gates: Vec<CompiledGate<T>>,
        target: usize,
    },
}

impl<T> AccessRule<T> {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Evaluate against the tokens `state` currently holds for this rule's
    /// player.
    #[must_use]
    pub fn check<S>(&self, state: &S) -> bool
    where
        S: CollectionState<Token = T>,
    {
        crate::evaluate::evaluate(&self.gate, state, self.player)
    }
}

impl<T: Send + Sync + 'static> AccessRule<T> {
    /// Box this rule as a predicate over `S`.
    #[must_use]
    pub fn into_predicate<S>(self) -> AccessPredicate<S>
    where
        S: CollectionState<Token = T> + 'static,
    {
        Box::new(move |state: &S| self.check(state))
    }
}
