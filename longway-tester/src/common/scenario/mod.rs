use anyhow::{Result, anyhow, ensure};

use crate::logic::{WalkPlan, WalkStrategy, WalkSummary};
use longway_game::constants::LOG_ROUTE_REROLL;

/// Named walk plan selectable from the command line.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub plan: WalkPlan,
}

impl TestScenario {
    fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        plan: WalkPlan,
    ) -> Self {
        Self {
            key,
            name,
            description,
            plan,
        }
    }
}

fn catalog() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "smoke",
            "Smoke",
            "Generate a run and audit its structure",
            WalkPlan::new(WalkStrategy::FirstChoice).with_expectation(structure_expectation),
        ),
        TestScenario::new(
            "determinism",
            "Deterministic Generation",
            "Same seed and catalog must produce the same graph",
            WalkPlan::new(WalkStrategy::FirstChoice).with_expectation(determinism_expectation),
        ),
        TestScenario::new(
            "walk",
            "Random Walk",
            "Walk every act with a seeded random policy",
            WalkPlan::new(WalkStrategy::Random)
                .with_acts(usize::MAX)
                .with_expectation(structure_expectation)
                .with_expectation(walk_expectation),
        ),
        TestScenario::new(
            "reroll",
            "Reroll Isolation",
            "Reroll mid-run and verify navigation starts over",
            WalkPlan::new(WalkStrategy::LastChoice)
                .with_acts(1)
                .with_reroll()
                .with_expectation(walk_expectation)
                .with_expectation(reroll_expectation),
        ),
    ]
}

/// Keys and descriptions of every scenario, in catalog order.
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    catalog()
        .into_iter()
        .find(|scenario| scenario.key.eq_ignore_ascii_case(key))
}

fn structure_expectation(summary: &WalkSummary) -> Result<()> {
    if let Err(violation) = &summary.audit {
        return Err(anyhow!("audit failed: {violation}"));
    }
    ensure!(summary.act_count > 0, "run has no acts");
    ensure!(summary.node_count > 0, "run has no nodes");
    Ok(())
}

fn determinism_expectation(summary: &WalkSummary) -> Result<()> {
    ensure!(
        summary.fingerprint == summary.replay_fingerprint,
        "fingerprint {:016x} differs from replay {:016x}",
        summary.fingerprint,
        summary.replay_fingerprint
    );
    Ok(())
}

fn walk_expectation(summary: &WalkSummary) -> Result<()> {
    ensure!(!summary.acts.is_empty(), "no acts were walked");
    for act in &summary.acts {
        ensure!(act.complete, "act {} was not completed", act.index);
        ensure!(
            act.follows_edges,
            "act {} path {:?} leaves the graph",
            act.index,
            act.path
        );
        ensure!(
            act.cursor_contained,
            "act {} cursor left the allowed columns",
            act.index
        );
        ensure!(
            act.allowed_follows_commit,
            "act {} opened columns that do not match the committed edges",
            act.index
        );
        ensure!(
            act.stars == act.requested,
            "act {} recorded {:?}, expected {:?}",
            act.index,
            act.stars,
            act.requested
        );
    }
    Ok(())
}

fn reroll_expectation(summary: &WalkSummary) -> Result<()> {
    let reroll = summary
        .reroll
        .as_ref()
        .ok_or_else(|| anyhow!("no reroll recorded"))?;
    ensure!(
        reroll.seed != reroll.previous_seed,
        "reroll kept seed {}",
        reroll.seed
    );
    ensure!(reroll.state_cleared, "navigation survived the reroll");
    ensure!(
        reroll.fingerprint != summary.fingerprint,
        "rerolled run matches the previous graph"
    );
    if let Err(violation) = &reroll.audit {
        return Err(anyhow!("rerolled run failed audit: {violation}"));
    }
    ensure!(
        summary.logs.last().map(String::as_str) == Some(LOG_ROUTE_REROLL),
        "reroll was not logged"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RouteWalker;
    use longway_game::SongCatalog;
    use std::sync::Arc;

    #[test]
    fn every_listed_scenario_resolves() {
        let listed = list_scenarios();
        assert_eq!(listed.len(), 4);
        for (key, _) in listed {
            assert_eq!(get_scenario(key).map(|s| s.key), Some(key));
        }
        assert!(get_scenario("SMOKE").is_some());
        assert!(get_scenario("missing").is_none());
    }

    #[test]
    fn scenarios_pass_on_the_bundled_catalog() {
        let walker = RouteWalker::new(Arc::new(SongCatalog::load_from_static()), false);
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).unwrap();
            for seed in [1, 1337, 90_210] {
                let summary = walker.run_plan(&scenario.plan, seed);
                for expectation in &scenario.plan.expectations {
                    expectation.evaluate(&summary).unwrap();
                }
            }
        }
    }

    #[test]
    fn walk_expectation_flags_unfinished_acts() {
        let walker = RouteWalker::new(Arc::new(SongCatalog::load_from_static()), false);
        let summary = walker.run_plan(&WalkPlan::new(WalkStrategy::FirstChoice), 3);
        assert!(walk_expectation(&summary).is_err());
        assert!(reroll_expectation(&summary).is_err());
    }
}
