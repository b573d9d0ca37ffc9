use serde::{Deserialize, Serialize};

use crate::challenge::{ChallengeFactory, SetlistFactory};
use crate::constants::{LOG_ROUTE_ACT_SWITCH, LOG_ROUTE_REROLL};
use crate::generator::RouteGenerator;
use crate::graph::{Act, Node, Run};
use crate::navigation::{NavPhase, PathNavigator};
use crate::seed::{clock_seed, reroll_seed};
use crate::songs::SongCatalog;

/// Discrete commands accepted from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavCommand {
    MoveLeft,
    MoveRight,
    /// Commit while browsing, submit the pending rating while awaiting one.
    Enter,
    Digit(char),
    Backspace,
    NextAct,
    PrevAct,
    Reroll(u64),
}

/// High-level session binding a generated run to a navigator.
#[derive(Debug, Clone)]
pub struct RouteSession<F = SetlistFactory> {
    generator: RouteGenerator<F>,
    catalog: SongCatalog,
    run: Run,
    current_act: usize,
    navigator: PathNavigator,
}

impl RouteSession<SetlistFactory> {
    /// Construct a session with the built-in generator.
    #[must_use]
    pub fn new(seed: u64, catalog: SongCatalog) -> Self {
        Self::with_generator(RouteGenerator::default(), seed, catalog)
    }
}

impl<F: ChallengeFactory> RouteSession<F> {
    #[must_use]
    pub fn with_generator(generator: RouteGenerator<F>, seed: u64, catalog: SongCatalog) -> Self {
        let run = generator.generate_run(seed, catalog.songs());
        let navigator = run.acts.first().map(PathNavigator::enter).unwrap_or_default();
        Self {
            generator,
            catalog,
            run,
            current_act: 0,
            navigator,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.run.seed
    }

    #[must_use]
    pub const fn run(&self) -> &Run {
        &self.run
    }

    #[must_use]
    pub const fn catalog(&self) -> &SongCatalog {
        &self.catalog
    }

    /// Zero-based index of the act being navigated.
    #[must_use]
    pub const fn current_act(&self) -> usize {
        self.current_act
    }

    /// The act being navigated. A validated generator always builds at least one.
    #[must_use]
    pub fn act(&self) -> &Act {
        &self.run.acts[self.current_act]
    }

    #[must_use]
    pub const fn navigator(&self) -> &PathNavigator {
        &self.navigator
    }

    /// Node under the cursor.
    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.run
            .act(self.current_act)?
            .node(self.navigator.row(), self.navigator.cursor_col())
    }

    pub fn move_left(&mut self) {
        self.navigator.move_horizontal(-1);
    }

    pub fn move_right(&mut self) {
        self.navigator.move_horizontal(1);
    }

    pub fn commit(&mut self) {
        self.navigator.commit();
    }

    pub fn push_digit(&mut self, digit: char) {
        self.navigator.push_digit(digit);
    }

    pub fn backspace(&mut self) {
        self.navigator.backspace();
    }

    /// Submit free-form rating text for the committed row.
    pub fn submit_rating(&mut self, input: &str) {
        let act = &self.run.acts[self.current_act];
        self.navigator.submit_rating(act, input);
    }

    /// Enter key: commit while browsing, submit the typed rating while awaiting.
    pub fn enter(&mut self) {
        let act = &self.run.acts[self.current_act];
        match self.navigator.phase() {
            NavPhase::Browsing => self.navigator.commit(),
            NavPhase::AwaitingRating => self.navigator.submit_pending(act),
            NavPhase::Complete => {}
        }
    }

    pub fn next_act(&mut self) {
        if self.current_act + 1 < self.run.acts.len() {
            self.switch_to(self.current_act + 1);
        }
    }

    pub fn prev_act(&mut self) {
        if let Some(prev) = self.current_act.checked_sub(1) {
            self.switch_to(prev);
        }
    }

    /// Replace the run with one built from `seed`, dropping all navigation.
    ///
    /// A seed equal to the current one is bumped so a reroll always changes it.
    pub fn reroll(&mut self, seed: u64) {
        let seed = reroll_seed(self.run.seed, seed);
        self.run = self.generator.generate_run(seed, self.catalog.songs());
        self.current_act = 0;
        if let Some(act) = self.run.acts.first() {
            self.navigator.reset(act);
        }
        self.navigator.record(LOG_ROUTE_REROLL);
        log::debug!("rerolled run with seed {seed}");
    }

    pub fn reroll_from_clock(&mut self) {
        self.reroll(clock_seed());
    }

    pub fn apply(&mut self, command: NavCommand) {
        match command {
            NavCommand::MoveLeft => self.move_left(),
            NavCommand::MoveRight => self.move_right(),
            NavCommand::Enter => self.enter(),
            NavCommand::Digit(digit) => self.push_digit(digit),
            NavCommand::Backspace => self.backspace(),
            NavCommand::NextAct => self.next_act(),
            NavCommand::PrevAct => self.prev_act(),
            NavCommand::Reroll(seed) => self.reroll(seed),
        }
    }

    fn switch_to(&mut self, act_idx: usize) {
        self.current_act = act_idx;
        let act = &self.run.acts[act_idx];
        self.navigator.reset(act);
        self.navigator.record(LOG_ROUTE_ACT_SWITCH);
        log::debug!("switched to act {}", act.index);
    }
}
