use crate::FeatureId;

/// The error type for [`FeaturePool::load`](crate::FeaturePool::load).
///
/// No game can start without at least one labeled feature, so this is a
/// fatal load failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmptyPoolError;

impl std::error::Error for EmptyPoolError {}

impl std::fmt::Display for EmptyPoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No features with a usable label remain after filtering")
    }
}

/// The error type for [`Game::submit_guess`](crate::Game::submit_guess).
///
/// These are contract violations by the caller, not gameplay events.
/// The engine rejects them without touching its state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidGuess {
    /// A guess was submitted while no round was active.
    NoActiveRound,
    /// The chosen feature is not among the current round's choices.
    NotAChoice { id: FeatureId },
}

impl std::error::Error for InvalidGuess {}

impl std::fmt::Display for InvalidGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGuess::NoActiveRound => {
                write!(f, "A guess was submitted, but no round is active")
            }
            InvalidGuess::NotAChoice { id } => write!(
                f,
                "Feature #{} is not among this round's choices",
                id.index()
            ),
        }
    }
}
