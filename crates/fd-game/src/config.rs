//! Configuration for a game session.

use fd_fair::Entropy;

/// Configuration for a game session.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Seed for deterministic draws. `None` uses the OS generator.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Make every draw reproducible from `seed`. Not secure.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// True if a seed replaces the OS generator.
    pub fn is_deterministic(&self) -> bool {
        self.seed.is_some()
    }

    /// Entropy for the committing side of every fair draw.
    pub fn resolver_entropy(&self) -> Entropy {
        Entropy::from_seed(self.seed)
    }

    /// Entropy for the computer's free choices, independent of the
    /// resolver's stream.
    pub fn computer_entropy(&self) -> Entropy {
        Entropy::from_seed(self.seed.map(|s| s ^ 0x9e37_79b9_7f4a_7c15))
    }
}
