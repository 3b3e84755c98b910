//! Fetch generation tokens.
//!
//! Every fetch mints a token before its request goes out. When the response
//! arrives it may only touch state if its token is still the latest one, so
//! a slow response for an abandoned query can never overwrite a newer one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one fetch invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`Generation`] tokens, one per controller.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token newer than every token minted before.
    pub fn mint(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` is the most recently minted one.
    pub fn is_current(&self, token: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// The most recently minted token, if any.
    pub fn latest(&self) -> Option<Generation> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Generation(n)),
        }
    }
}
