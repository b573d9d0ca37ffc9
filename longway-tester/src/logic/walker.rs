use anyhow::Result;
use std::sync::Arc;

use longway_game::{
    Act, InvariantViolation, NavCommand, NavPhase, RouteGenerator, RouteSession, SongCatalog,
    audit_run, seed_label,
};

use super::policy::{WalkPolicy, WalkStrategy};

/// Declarative plan for one automated pass over a run.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    pub strategy: WalkStrategy,
    /// How many acts to walk from the start; 0 only generates and audits.
    pub acts_to_walk: usize,
    /// Reroll with the current seed once walking is done.
    pub reroll: bool,
    pub expectations: Vec<WalkExpectation>,
}

impl WalkPlan {
    #[must_use]
    pub fn new(strategy: WalkStrategy) -> Self {
        Self {
            strategy,
            acts_to_walk: 0,
            reroll: false,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_acts(mut self, acts: usize) -> Self {
        self.acts_to_walk = acts;
        self
    }

    #[must_use]
    pub const fn with_reroll(mut self) -> Self {
        self.reroll = true;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<WalkExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a walk completes.
type WalkExpectationFn = Arc<dyn Fn(&WalkSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct WalkExpectation(WalkExpectationFn);

impl std::fmt::Debug for WalkExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkExpectation").finish()
    }
}

impl WalkExpectation {
    pub fn evaluate(&self, summary: &WalkSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for WalkExpectation
where
    F: Fn(&WalkSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Path taken through one act.
#[derive(Debug, Clone, Default)]
pub struct ActWalk {
    pub index: usize,
    /// Committed column per row, in row order.
    pub path: Vec<usize>,
    /// Rating recorded per row, in row order.
    pub stars: Vec<u8>,
    /// Ratings the policy asked for, before clamping.
    pub requested: Vec<u8>,
    pub complete: bool,
    /// Every consecutive pair of committed nodes is joined by an edge.
    pub follows_edges: bool,
    /// The cursor sat on an allowed column after every command.
    pub cursor_contained: bool,
    /// Each new row opened exactly the committed node's edges.
    pub allowed_follows_commit: bool,
}

/// State observed right after a reroll.
#[derive(Debug)]
pub struct RerollOutcome {
    pub previous_seed: u64,
    pub seed: u64,
    pub state_cleared: bool,
    pub fingerprint: u64,
    pub audit: Result<(), InvariantViolation>,
}

/// Complete record of a walk.
#[derive(Debug)]
pub struct WalkSummary {
    pub seed: u64,
    /// Share code or decimal seed; resolves back to `seed`.
    pub seed_label: String,
    pub strategy: WalkStrategy,
    pub fingerprint: u64,
    /// Fingerprint of a second, independent generation from the same inputs.
    pub replay_fingerprint: u64,
    pub act_count: usize,
    pub node_count: usize,
    pub audit: Result<(), InvariantViolation>,
    pub acts: Vec<ActWalk>,
    pub commands: usize,
    pub logs: Vec<String>,
    pub reroll: Option<RerollOutcome>,
}

/// Headless deterministic walker over generated runs.
#[derive(Clone)]
pub struct RouteWalker {
    verbose: bool,
    catalog: Arc<SongCatalog>,
    generator: RouteGenerator,
}

impl RouteWalker {
    pub fn new(catalog: Arc<SongCatalog>, verbose: bool) -> Self {
        Self {
            verbose,
            catalog,
            generator: RouteGenerator::default(),
        }
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn catalog(&self) -> &SongCatalog {
        &self.catalog
    }

    pub fn run_plan(&self, plan: &WalkPlan, seed: u64) -> WalkSummary {
        let mut session =
            RouteSession::with_generator(self.generator.clone(), seed, (*self.catalog).clone());
        let replay = self.generator.generate_run(seed, self.catalog.songs());
        let fingerprint = session.run().fingerprint();

        let mut policy = plan.strategy.create_policy(seed);
        if self.verbose {
            println!(
                "🎸 Walking seed:{seed} ({}) policy:{} songs:{}",
                seed_label(seed),
                policy.name(),
                self.catalog.len()
            );
        }

        let mut commands = 0;
        let mut acts = Vec::new();
        let act_count = session.run().acts.len();
        for act_idx in 0..plan.acts_to_walk.min(act_count) {
            if act_idx > 0 {
                session.apply(NavCommand::NextAct);
                commands += 1;
            }
            let walk = walk_act(&mut session, policy.as_mut(), &mut commands);
            if self.verbose {
                log_act(&walk);
            }
            acts.push(walk);
        }

        let reroll = plan.reroll.then(|| {
            let previous_seed = session.seed();
            session.apply(NavCommand::Reroll(previous_seed));
            commands += 1;
            RerollOutcome {
                previous_seed,
                seed: session.seed(),
                state_cleared: navigation_is_fresh(&session),
                fingerprint: session.run().fingerprint(),
                audit: audit_run(session.run(), self.generator.config()),
            }
        });

        WalkSummary {
            seed,
            seed_label: seed_label(seed),
            strategy: plan.strategy,
            fingerprint,
            replay_fingerprint: replay.fingerprint(),
            act_count,
            node_count: replay.node_count(),
            audit: audit_run(&replay, self.generator.config()),
            acts,
            commands,
            logs: session.navigator().logs().to_vec(),
            reroll,
        }
    }
}

fn walk_act(
    session: &mut RouteSession,
    policy: &mut (dyn WalkPolicy + Send),
    commands: &mut usize,
) -> ActWalk {
    let mut walk = ActWalk {
        index: session.act().index,
        cursor_contained: true,
        allowed_follows_commit: true,
        ..ActWalk::default()
    };
    let rows = session.act().row_count();

    for _ in 0..rows {
        if session.navigator().phase() != NavPhase::Browsing {
            break;
        }
        let decision = policy.decide(session);
        let mut script = vec![NavCommand::MoveRight; decision.allowed_idx];
        script.push(NavCommand::Enter);
        script.extend(char::from_digit(u32::from(decision.rating), 10).map(NavCommand::Digit));
        script.push(NavCommand::Enter);
        *commands += script.len();

        let row = session.navigator().row();
        for command in script {
            session.apply(command);
            let nav = session.navigator();
            if nav.phase() != NavPhase::Complete && !nav.allowed().contains(&nav.cursor_col()) {
                walk.cursor_contained = false;
            }
        }
        walk.requested.push(decision.rating);
        if let Some(col) = session.navigator().committed(row) {
            walk.path.push(col);
            if session.navigator().phase() == NavPhase::Browsing {
                let edges = session.act().node(row, col).map(|node| node.edges());
                walk.allowed_follows_commit &= edges == Some(session.navigator().allowed());
            }
        }
        if let Some(stars) = session.navigator().stars(row) {
            walk.stars.push(stars);
        }
    }

    walk.complete = session.navigator().phase() == NavPhase::Complete;
    walk.follows_edges = path_follows_edges(session.act(), &walk.path);
    walk
}

fn path_follows_edges(act: &Act, path: &[usize]) -> bool {
    path.windows(2).enumerate().all(|(row, pair)| {
        act.node(row, pair[0])
            .is_some_and(|node| node.links_to(pair[1]))
    })
}

fn navigation_is_fresh(session: &RouteSession) -> bool {
    let nav = session.navigator();
    session.current_act() == 0
        && nav.row() == 0
        && nav.phase() == NavPhase::Browsing
        && (0..session.act().row_count())
            .all(|row| nav.committed(row).is_none() && nav.stars(row).is_none())
}

fn log_act(walk: &ActWalk) {
    println!(
        "  🧭 Act {}: path {:?} stars {:?}{}",
        walk.index,
        walk.path,
        walk.stars,
        if walk.complete { "" } else { " (incomplete)" }
    );
}
