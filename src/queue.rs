//! Next/hold piece queue
//!
//! The queue always knows the next piece and can hold one piece aside.
//! How the next piece is picked depends on the [`Randomizer`] policy;
//! all policies draw from a seeded ChaCha RNG so a run can be replayed.

use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How the next piece is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Randomizer {
    /// Every kind equally likely, repeats allowed
    #[default]
    Uniform,
    /// Never deal the same kind twice in a row
    NoRepeat,
    /// 7-bag: all 7 pieces are shuffled, then dealt out before reshuffling
    Bag,
}

impl std::str::FromStr for Randomizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Randomizer::Uniform),
            "no-repeat" | "norepeat" => Ok(Randomizer::NoRepeat),
            "bag" | "7-bag" => Ok(Randomizer::Bag),
            other => Err(format!("unknown randomizer '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieceQueue {
    policy: Randomizer,
    rng: ChaCha8Rng,
    next: TetrominoType,
    held: Option<TetrominoType>,
    /// Remaining pieces of the current bag, dealt from the back
    bag: Vec<TetrominoType>,
    /// Fixed kinds dealt before the randomizer takes over
    preset: VecDeque<TetrominoType>,
}

impl PieceQueue {
    pub fn new(policy: Randomizer, seed: u64) -> Self {
        Self::with_sequence(policy, seed, std::iter::empty())
    }

    /// Deal `sequence` first, in order, then continue with `policy`
    pub fn with_sequence(
        policy: Randomizer,
        seed: u64,
        sequence: impl IntoIterator<Item = TetrominoType>,
    ) -> Self {
        let mut queue = Self {
            policy,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next: TetrominoType::I,
            held: None,
            bag: Vec::with_capacity(7),
            preset: sequence.into_iter().collect(),
        };
        queue.next = queue.draw(None);
        queue
    }

    /// The piece that will spawn next
    pub fn peek(&self) -> TetrominoType {
        self.next
    }

    pub fn held(&self) -> Option<TetrominoType> {
        self.held
    }

    /// Take the next piece and pick a new one behind it
    pub fn take_next(&mut self) -> TetrominoType {
        let current = self.next;
        self.next = self.draw(Some(current));
        current
    }

    /// Put `kind` in the hold slot, returning what was there
    pub fn swap_held(&mut self, kind: TetrominoType) -> Option<TetrominoType> {
        self.held.replace(kind)
    }

    fn draw(&mut self, last: Option<TetrominoType>) -> TetrominoType {
        if let Some(kind) = self.preset.pop_front() {
            return kind;
        }
        let all = TetrominoType::all();
        match self.policy {
            Randomizer::Uniform => all[self.rng.gen_range(0..all.len())],
            Randomizer::NoRepeat => {
                let candidates: Vec<_> = all.into_iter().filter(|&k| Some(k) != last).collect();
                candidates[self.rng.gen_range(0..candidates.len())]
            }
            Randomizer::Bag => {
                if self.bag.is_empty() {
                    self.refill();
                }
                // refill always leaves 7 pieces
                self.bag.pop().unwrap_or(TetrominoType::I)
            }
        }
    }

    /// Refill the bag with a new shuffled set
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::all().to_vec();
        new_bag.shuffle(&mut self.rng);
        self.bag = new_bag;
    }
}
