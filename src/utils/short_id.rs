//! Short id generation.
//!
//! Short ids are drawn uniformly, with replacement, from the 62 ASCII letters
//! and digits. Generation alone never guarantees uniqueness: the chance of a
//! repeat is `1/62^len` per draw, so callers must still go through the
//! store's uniqueness constraint.

use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Default length of generated short ids.
pub const SHORT_ID_LENGTH: usize = 8;

/// Symbols a short id is drawn from.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws a short id of `length` characters from `rng`.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use urlsnip::utils::short_id::generate_short_id;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let id = generate_short_id(&mut rng, 8);
/// assert_eq!(id.len(), 8);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_short_id<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Source of candidate short ids for the allocation loop.
///
/// Injected into [`crate::application::services::LinkService`] so that tests
/// can replace randomness with a fixed sequence.
pub trait ShortIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generator backed by the thread-local, OS-seeded random source.
#[derive(Debug, Clone, Copy)]
pub struct RandomShortIdGenerator {
    length: usize,
}

impl RandomShortIdGenerator {
    /// Creates a generator producing ids of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomShortIdGenerator {
    fn default() -> Self {
        Self::new(SHORT_ID_LENGTH)
    }
}

impl ShortIdGenerator for RandomShortIdGenerator {
    fn generate(&self) -> String {
        generate_short_id(&mut rand::rng(), self.length)
    }
}

/// Deterministic generator replaying a fixed list of ids.
///
/// Once the list is drained, the last id is repeated forever.
#[derive(Debug)]
pub struct SequenceShortIdGenerator {
    state: Mutex<SequenceState>,
}

#[derive(Debug)]
struct SequenceState {
    pending: VecDeque<String>,
    last: String,
}

impl SequenceShortIdGenerator {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Mutex::new(SequenceState {
                pending: ids.into_iter().map(Into::into).collect(),
                last: String::new(),
            }),
        }
    }

    /// Number of ids not yet handed out.
    pub fn remaining(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }
}

impl ShortIdGenerator for SequenceShortIdGenerator {
    fn generate(&self) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(next) = state.pending.pop_front() {
            state.last = next;
        }

        state.last.clone()
    }
}
