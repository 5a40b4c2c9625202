use crate::types::{CollectionState, CompiledGate, PlayerId};

pub(crate) fn evaluate<T, S>(gate: &CompiledGate<T>, state: &S, player: PlayerId) -> bool
where
    S: CollectionState<Token = T>,
{
    match gate {
        CompiledGate::All(tokens) => state.has_all(tokens, player),
        CompiledGate::AtLeast { tokens, target } => {
            tokens
                .iter()
                .filter(|token| state.has(token, player))
                .count()
                >= *target
        }
        // Stops polling children once the target is met.
        CompiledGate::Threshold { gates, target } => {
            gates
                .iter()
                .filter(|&gate| evaluate(gate, state, player))
                .take(*target)
                .count()
                >= *target
        }
    }
}
