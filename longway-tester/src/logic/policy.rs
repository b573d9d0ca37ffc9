use std::fmt;

use longway_game::RouteSession;
use longway_game::constants::RATING_MAX;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`WalkPolicy`] for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDecision {
    /// Position within the allowed columns, not a column index.
    pub allowed_idx: usize,
    pub rating: u8,
}

/// Policy interface for automated route walks.
pub trait WalkPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Choose a column and rating for the row the session is browsing.
    fn decide(&mut self, session: &RouteSession) -> RowDecision;
}

/// Built-in walking strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalkStrategy {
    FirstChoice,
    LastChoice,
    Random,
}

impl WalkStrategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstChoice => "First Choice",
            Self::LastChoice => "Last Choice",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn WalkPolicy + Send> {
        match self {
            Self::FirstChoice => Box::new(FirstChoicePolicy),
            Self::LastChoice => Box::new(LastChoicePolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for WalkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct FirstChoicePolicy;
struct LastChoicePolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl WalkPolicy for FirstChoicePolicy {
    fn name(&self) -> &'static str {
        "First Choice"
    }

    fn decide(&mut self, _session: &RouteSession) -> RowDecision {
        RowDecision {
            allowed_idx: 0,
            rating: 3,
        }
    }
}

impl WalkPolicy for LastChoicePolicy {
    fn name(&self) -> &'static str {
        "Last Choice"
    }

    fn decide(&mut self, session: &RouteSession) -> RowDecision {
        RowDecision {
            allowed_idx: session.navigator().allowed().len().saturating_sub(1),
            rating: RATING_MAX,
        }
    }
}

impl WalkPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn decide(&mut self, session: &RouteSession) -> RowDecision {
        let width = session.navigator().allowed().len().max(1);
        RowDecision {
            allowed_idx: self.rng.gen_range(0..width),
            rating: self.rng.gen_range(0..=RATING_MAX),
        }
    }
}
