//! # Placeholder Text Generation
//!
//! Produces "lorem ipsum" pseudo-sentences from a fixed five word dictionary.
//!
//! Word choice is fully deterministic: word `j` of every sentence is
//! `DICTIONARY[j % DICTIONARY.len()]`, restarting at `lorem` for each sentence.
//! Only the sentence length is drawn from a [`LengthSource`], so swapping in
//! [`FixedLengths`] makes the whole output reproducible.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// The words sentences are built from, in cycling order.
pub static DICTIONARY: [&str; 5] = ["lorem", "ipsum", "dolor", "sit", "amet"];

/// Continuous range sentence lengths are drawn from.
pub const SENTENCE_LENGTH: Range<f64> = 5.0..15.0;

/// Sentence count used when a request does not name one.
pub const DEFAULT_COUNT: usize = 3;

/// Largest sentence count a single request may ask for.
pub const MAX_COUNT: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoremError {
    #[error("Unsupported units '{0}', expected 'sentences'")]
    UnsupportedUnits(String),
    #[error("Invalid sentence count '{0}', expected an integer from 0 to {max}", max = MAX_COUNT)]
    InvalidCount(String),
    #[error("Invalid sentence length '{0}', expected a number from 5 up to 15")]
    InvalidLength(String),
}

/// Granularity of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Sentences,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Sentences => "sentences",
        }
    }
}

impl FromStr for Units {
    type Err = LoremError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentences" => Ok(Units::Sentences),
            other => Err(LoremError::UnsupportedUnits(other.to_string())),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generation call: how much text, in which units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub count: usize,
    pub units: Units,
}

impl GenerationRequest {
    pub fn sentences(count: usize) -> Self {
        Self {
            count,
            units: Units::Sentences,
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::sentences(DEFAULT_COUNT)
    }
}

/// Source of sentence lengths, measured in (possibly fractional) words.
pub trait LengthSource {
    /// Next sentence length, expected within [`SENTENCE_LENGTH`].
    fn sentence_length(&mut self) -> f64;
}

/// Uniformly random lengths over [`SENTENCE_LENGTH`].
#[derive(Debug, Clone)]
pub struct RandomLengths<R> {
    rng: R,
}

impl<R: Rng> RandomLengths<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomLengths<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomLengths<StdRng> {
    /// Reproducible lengths for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LengthSource for RandomLengths<R> {
    fn sentence_length(&mut self) -> f64 {
        self.rng.gen_range(SENTENCE_LENGTH)
    }
}

/// Cycles through a fixed list of lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLengths {
    lengths: Vec<f64>,
    next: usize,
}

impl FixedLengths {
    /// Lengths are used in order and repeat once exhausted. An empty list
    /// falls back to the shortest sentence.
    ///
    /// Every length must lie within [`SENTENCE_LENGTH`].
    pub fn new(lengths: impl IntoIterator<Item = f64>) -> Result<Self, LoremError> {
        let lengths = lengths
            .into_iter()
            .map(|length| {
                if SENTENCE_LENGTH.contains(&length) {
                    Ok(length)
                } else {
                    Err(LoremError::InvalidLength(length.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lengths, next: 0 })
    }
}

impl LengthSource for FixedLengths {
    fn sentence_length(&mut self) -> f64 {
        if self.lengths.is_empty() {
            return SENTENCE_LENGTH.start;
        }
        let length = self.lengths[self.next % self.lengths.len()];
        self.next = (self.next + 1) % self.lengths.len();
        length
    }
}

/// Generate text for `request`, drawing sentence lengths from `lengths`.
pub fn generate(request: GenerationRequest, lengths: &mut dyn LengthSource) -> String {
    match request.units {
        Units::Sentences => (0..request.count)
            .map(|_| sentence(word_count(lengths.sentence_length())))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Generate `count` units of text using the thread-local RNG.
pub fn lorem(count: usize, units: Units) -> String {
    generate(GenerationRequest { count, units }, &mut RandomLengths::thread())
}

/// Number of words emitted for a drawn length: every index `j < length`.
///
/// Lengths from other sources are clamped into [`SENTENCE_LENGTH`], so every
/// sentence has between 5 and 15 words.
fn word_count(length: f64) -> usize {
    let length = if length.is_nan() {
        SENTENCE_LENGTH.start
    } else {
        length.clamp(SENTENCE_LENGTH.start, SENTENCE_LENGTH.end)
    };
    length.ceil() as usize
}

/// Build one sentence of `len` words. Zero words yields an empty string.
fn sentence(len: usize) -> String {
    let mut words: Vec<String> = (0..len)
        .map(|j| DICTIONARY[j % DICTIONARY.len()].to_string())
        .collect();

    if let Some(first) = words.first_mut() {
        *first = capitalize(first);
    }
    if let Some(last) = words.last_mut() {
        last.push('.');
    }
    words.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
