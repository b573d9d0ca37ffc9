pub mod policy;
pub mod reports;
pub mod seeds;
pub mod tester;
pub mod walker;

pub use policy::WalkStrategy;
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use tester::*;
pub use walker::{RouteWalker, WalkPlan, WalkSummary};
