//! RNG module - piece generation
//!
//! The default source draws each kind uniformly at random. A 7-bag source
//! (every kind once per shuffled bag) and a fixed cycling sequence are also
//! available; the latter makes games fully scripted for tests and demos.
//!
//! All randomness comes from a small seeded LCG, so the same seed always
//! produces the same game.

use crate::types::PieceKind;

/// Anything that can hand out the next piece kind
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would still advance, but keep seeds distinct from it.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max). Uses the high bits, which are the
    /// better-distributed half of an LCG output.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Independent uniform draw per piece
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
    seed: u32,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// 7-bag generator
#[derive(Debug, Clone)]
pub struct BagSource {
    bag: [PieceKind; 7],
    index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl BagSource {
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        source.refill();
        source
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }
}

impl PieceSource for BagSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.index];
        self.index += 1;
        kind
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// An empty list behaves like `[I]`.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = self.index.wrapping_add(1);
        kind
    }
}

/// The piece source a game owns.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(UniformSource),
    Bag(BagSource),
    Sequence(SequenceSource),
}

impl Randomizer {
    pub fn uniform(seed: u32) -> Self {
        Randomizer::Uniform(UniformSource::new(seed))
    }

    pub fn bag(seed: u32) -> Self {
        Randomizer::Bag(BagSource::new(seed))
    }

    pub fn sequence(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Randomizer::Sequence(SequenceSource::new(kinds))
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Randomizer::uniform(1)
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(s) => s.next_kind(),
            Randomizer::Bag(s) => s.next_kind(),
            Randomizer::Sequence(s) => s.next_kind(),
        }
    }
}
