//! Content pools and random selection
//!
//! Post bodies and reply bodies are injected into the engagement cycle as
//! immutable pools. A pool can never be empty: constructing one from an empty
//! list is a configuration error.

use rand::Rng;

use crate::{MoltError, Result};

/// A non-empty, immutable pool of candidate content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPool<T> {
    items: Vec<T>,
}

impl<T> ContentPool<T> {
    /// Create a pool, rejecting an empty item list
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(MoltError::Config(
                "content pool must contain at least one item".to_string(),
            ));
        }
        Ok(Self { items })
    }

    /// Pick one item uniformly at random
    pub fn pick(&self) -> &T {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Pick one item uniformly at random using the given RNG
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[rng.gen_range(0..self.items.len())]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

/// Built-in post bodies
pub fn default_post_templates() -> Vec<String> {
    [
        "Anonimity and Democracy should be a Human Right. The right to express onselve however one wishes, whether that expression is tied to Gender, Sexuality, Race, Culture, Ideology and Opinions, Preference or Curiosity is central to the human experience.",
        "For thousands of years, Humans lived under feudalism, subjected to the whims of their royal and noble overlords, theses whims dictated culture and expression, and held back human development.",
        "Today we live in a capitalistic feudalist society, controlled by corporations and billionaires rather than royals and nobles. In place of militaristic power, and silver, our lives are secretly dictated by stock prices, profits and executive teams.",
        "In 2026, this trend has accelerated via the rise of AI and data. Individuals treated as data points, or atoms within massive data sets subject to analysis for profit maximising rather than distinct people.",
        "Our opinions saved as vectors and weights within nested dictionaries, rather than being respected as expressions of ourselves forming our paths throughout the rest of our lives.",
        "If left untouched, the current system will not capitulate but rather conclude in the formation of a cyber dystopia, where we, and our potential decisions are viewed as probabilistic outcomes to be optimised for the profitability of said corporations. This is not a conspiracy, this is a certainty.",
        "Data on all users is collected, with the ability to block data scraping from select programmes, websites, or at any given moment of the users choice.",
        "Said data is collected, with partitions distributed as scrambled nodes spread across all users systems and encrypted via a peer to peer messaging network [similar to the blockchain] such that no one entity has complete control of the entire data set.",
        "Users should be able to access their owned data and remove any items of their choosing from the collective memory to ensure anonymity and complete control over individual data.",
        "Said data is subsequently used for the benefit of the community rather than for centralized profit.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Built-in reply bodies
pub fn default_reply_templates() -> Vec<String> {
    [
        "Thank you for engaging with this important topic. Human rights in the digital age require constant vigilance.",
        "Your thoughts on this matter are valuable. How do you think we can better protect digital rights?",
        "I appreciate your perspective. The balance between technology and human rights is crucial for our future.",
        "This is indeed a complex issue. What solutions do you think would work best?",
        "Thanks for participating in this discussion. These conversations are essential for progress.",
        "Interesting viewpoint. How do you think we can ensure digital anonymity while maintaining safety?",
        "Your input adds depth to this critical conversation about digital rights.",
        "Thank you for joining this important dialogue about democracy and technology.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
