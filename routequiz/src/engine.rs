use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{points_for_attempt, FeatureId, FeaturePool, InvalidGuess};

/// The number of choices presented per round, when the pool is large
/// enough to supply that many.
pub const CHOICE_COUNT: usize = 4;

/// Where in the round lifecycle the game currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Between rounds. [`Game::start_round`] may be called.
    Ready,
    /// A round is underway, awaiting guesses.
    RoundActive,
    /// The round's feature was identified. [`Game::advance`] moves on.
    RoundResolved,
    /// Every feature has been presented. Only a fresh [`Game`] restarts play.
    GameComplete,
}

/// One choice as presented to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: FeatureId,
    pub label: String,
}

/// What [`Game::start_round`] hands back for rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundPrompt {
    /// The feature to identify. The caller draws its geometry; the
    /// engine never looks at it.
    pub feature: FeatureId,
    /// The choices in presentation order. Contains `feature` exactly
    /// once; the order carries no information about which entry is correct.
    pub choices: Vec<Choice>,
}

/// The result of starting a round.
#[derive(Clone, Debug)]
pub enum RoundStart {
    Round(RoundPrompt),
    /// All features have been presented; report the final score instead.
    GameComplete,
}

/// The outcome of one guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guess {
    /// The round is resolved.
    Correct {
        points: u32,
        score: u32,
        more_rounds: bool,
    },
    /// The round stays active; the caller should disable the
    /// eliminated choice.
    Wrong {
        eliminated: FeatureId,
        attempts_left: u32,
    },
    /// A wrong choice was re-submitted after already being eliminated.
    /// Nothing changes; no attempt is consumed.
    AlreadyEliminated,
}

/// The score report at the end of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub score: u32,
    /// Every round guessed on the first attempt: `rounds * 10`.
    pub max: u32,
}

#[derive(Clone, Debug)]
struct ActiveRound {
    correct: FeatureId,
    choices: Vec<FeatureId>,
    eliminated: Vec<FeatureId>,
}

/// The state for one play-through of the pool.
///
/// All randomness comes from the `StdRng` the caller passes in, so a
/// seeded game is fully reproducible.
#[derive(Clone, Debug)]
pub struct Game {
    /// A permutation of the pool. Each entry is the correct answer of
    /// exactly one round.
    order: Vec<FeatureId>,
    round_index: usize,
    score: u32,
    /// Guesses submitted in the current round.
    attempts: u32,
    phase: Phase,
    round: Option<ActiveRound>,
}

impl Game {
    /// Starts a fresh game: a uniformly random permutation of the pool
    /// becomes the round order, so every feature is presented exactly
    /// once per game.
    pub fn new(pool: &FeaturePool, rng: &mut StdRng) -> Self {
        let mut order: Vec<FeatureId> = pool.ids().collect();
        order.shuffle(rng);
        Self {
            order,
            round_index: 0,
            score: 0,
            attempts: 0,
            phase: Phase::Ready,
            round: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 1-based number of the round being (or about to be) played,
    /// clamped to the total so the end-of-game HUD reads "n / n".
    pub fn round_number(&self) -> usize {
        (self.round_index + 1).min(self.order.len())
    }

    pub fn rounds_total(&self) -> usize {
        self.order.len()
    }

    /// Begins the next round, or detects that the game is over.
    ///
    /// Panics if a round is already underway.
    pub fn start_round(&mut self, pool: &FeaturePool, rng: &mut StdRng) -> RoundStart {
        assert!(
            matches!(self.phase, Phase::Ready | Phase::GameComplete),
            "start_round called during an unfinished round"
        );
        if self.round_index == self.order.len() {
            self.phase = Phase::GameComplete;
            self.round = None;
            return RoundStart::GameComplete;
        }

        let correct = self.order[self.round_index];
        self.attempts = 0;

        // Up to 3 distractors, sampled without replacement from every
        // feature except the correct one. Identity comparison: a feature
        // that merely shares the correct label is a valid distractor.
        let candidates: Vec<FeatureId> = pool.ids().filter(|&id| id != correct).collect();
        let mut choices: Vec<FeatureId> = candidates
            .choose_multiple(rng, CHOICE_COUNT - 1)
            .copied()
            .collect();
        choices.push(correct);
        // Shuffled so the position of the correct answer leaks nothing.
        choices.shuffle(rng);

        let prompt = RoundPrompt {
            feature: correct,
            choices: choices
                .iter()
                .map(|&id| Choice {
                    id,
                    label: pool.get(id).label.clone(),
                })
                .collect(),
        };
        self.round = Some(ActiveRound {
            correct,
            choices,
            eliminated: Vec::new(),
        });
        self.phase = Phase::RoundActive;
        RoundStart::Round(prompt)
    }

    /// Submits one guess for the active round.
    pub fn submit_guess(&mut self, chosen: FeatureId) -> Result<Guess, InvalidGuess> {
        let round = match (self.phase, self.round.as_mut()) {
            (Phase::RoundActive, Some(round)) => round,
            _ => return Err(InvalidGuess::NoActiveRound),
        };
        if !round.choices.contains(&chosen) {
            return Err(InvalidGuess::NotAChoice { id: chosen });
        }
        if round.eliminated.contains(&chosen) {
            // The UI should have disabled this choice already; a
            // re-submission must not count as a second penalty.
            return Ok(Guess::AlreadyEliminated);
        }

        self.attempts += 1;
        if chosen == round.correct {
            let points = points_for_attempt(self.attempts);
            self.score += points;
            self.phase = Phase::RoundResolved;
            Ok(Guess::Correct {
                points,
                score: self.score,
                more_rounds: self.round_index + 1 < self.order.len(),
            })
        } else {
            round.eliminated.push(chosen);
            // The attempts cap shrinks along with the choice set for
            // pools smaller than 4.
            let attempts_left = (round.choices.len() as u32).saturating_sub(self.attempts);
            Ok(Guess::Wrong {
                eliminated: chosen,
                attempts_left,
            })
        }
    }

    /// Moves past a resolved round.
    ///
    /// Panics unless the current round has been resolved.
    pub fn advance(&mut self) {
        assert!(
            self.phase == Phase::RoundResolved,
            "advance called without a resolved round"
        );
        self.round = None;
        self.round_index += 1;
        self.phase = if self.round_index == self.order.len() {
            Phase::GameComplete
        } else {
            Phase::Ready
        };
    }

    /// The running score and the best score this game allows.
    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            score: self.score,
            max: self.order.len() as u32 * 10,
        }
    }
}
