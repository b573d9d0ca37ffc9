//! Run and act generation.
//!
//! A run is built from one seed and one song catalog through a single
//! [`RouteRng`] stream. Acts are generated in ascending order, rows in order
//! within an act, and connectivity right after each row, so the draw order
//! (and therefore the whole graph) is a pure function of `(seed, catalog)`.
use std::collections::BTreeSet;

use crate::challenge::{ChallengeFactory, SetlistFactory};
use crate::config::{RouteConfig, RouteConfigError};
use crate::connectivity::connect;
use crate::difficulty::{choose_pool_size, filter_for_act};
use crate::graph::{Act, Node, NodeContent, Row, Run};
use crate::rng::RouteRng;
use crate::songs::Song;

/// Generates runs for a validated configuration and a challenge factory.
#[derive(Debug, Clone)]
pub struct RouteGenerator<F = SetlistFactory> {
    config: RouteConfig,
    factory: F,
}

impl RouteGenerator<SetlistFactory> {
    /// Generator using the default setlist factory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: RouteConfig) -> Result<Self, RouteConfigError> {
        Self::with_factory(config, SetlistFactory)
    }
}

impl Default for RouteGenerator<SetlistFactory> {
    fn default() -> Self {
        Self {
            config: RouteConfig::default(),
            factory: SetlistFactory,
        }
    }
}

impl<F: ChallengeFactory> RouteGenerator<F> {
    /// Generator using a custom challenge factory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_factory(config: RouteConfig, factory: F) -> Result<Self, RouteConfigError> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    #[must_use]
    pub const fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Build every act of a run from one continuous stream.
    #[must_use]
    pub fn generate_run(&self, seed: u64, songs: &[Song]) -> Run {
        let mut rng = RouteRng::from_user_seed(seed);
        let acts = (1..=self.config.total_acts)
            .map(|index| self.generate_act(index, &mut rng, songs))
            .collect();
        log::debug!(
            "generated run for seed {seed} ({} songs, {} draws)",
            songs.len(),
            rng.draws()
        );
        Run { seed, acts }
    }

    /// Build one act, continuing the caller's stream.
    pub fn generate_act(&self, index: usize, rng: &mut RouteRng, songs: &[Song]) -> Act {
        let pool = filter_for_act(index, songs);
        let pool_size = choose_pool_size(index, pool.len(), rng);
        let shop_rows = self.pick_shop_rows(rng);
        let boss_row = self.config.boss_row();

        let mut rows: Vec<Row> = Vec::with_capacity(self.config.rows_per_act);
        for row in 0..self.config.rows_per_act {
            let is_boss = row == boss_row;
            let is_shop = shop_rows.contains(&row);
            let count = if is_boss || is_shop {
                1
            } else {
                rng.inclusive(self.config.min_nodes_per_row, self.config.max_nodes_per_row)
            };

            let mut nodes: Row = Vec::with_capacity(count);
            for col in 0..count {
                let content = if is_boss {
                    NodeContent::Boss(self.factory.boss_challenge(songs))
                } else if is_shop {
                    NodeContent::Shop
                } else {
                    NodeContent::Challenge(self.factory.new_challenge(&pool, rng, pool_size))
                };
                nodes.push(Node::new(col, content));
            }

            if let Some(prev) = rows.last_mut() {
                connect(prev, &nodes, rng);
            }
            rows.push(nodes);
        }

        log::debug!(
            "act {index}: {} rows, shops at {:?}, pool {pool_size}/{}",
            rows.len(),
            shop_rows,
            pool.len()
        );
        Act { index, rows }
    }

    /// Choose the interior shop rows, never first, last, or adjacent.
    ///
    /// Random sampling runs until the retry budget of rejected samples is
    /// spent; remaining rows are then filled by an in-order scan. If the
    /// random picks left no room for the scan, the rows fall back to an even
    /// spacing starting at row 1, which validation guarantees fits.
    pub fn pick_shop_rows(&self, rng: &mut RouteRng) -> BTreeSet<usize> {
        let wanted = self.config.shop_rows_per_act;
        let candidates: Vec<usize> = (1..self.config.boss_row()).collect();
        let mut selected = BTreeSet::new();
        if wanted == 0 || candidates.is_empty() {
            return selected;
        }

        let mut rejections = 0;
        while selected.len() < wanted && rejections < self.config.shop_retry_budget {
            let row = candidates[rng.below(candidates.len())];
            if selected.contains(&row) || touches(&selected, row) {
                rejections += 1;
                continue;
            }
            selected.insert(row);
        }

        if selected.len() < wanted {
            log::debug!("shop row sampling exhausted its budget; scanning in order");
            for &row in &candidates {
                if selected.len() >= wanted {
                    break;
                }
                if !selected.contains(&row) && !touches(&selected, row) {
                    selected.insert(row);
                }
            }
        }

        if selected.len() < wanted {
            log::debug!("shop rows {selected:?} leave no room; using even spacing");
            selected = (0..wanted).map(|i| 1 + 2 * i).collect();
        }
        selected
    }
}

fn touches(selected: &BTreeSet<usize>, row: usize) -> bool {
    selected.contains(&(row + 1)) || row.checked_sub(1).is_some_and(|up| selected.contains(&up))
}

/// Generate a run with the built-in configuration and setlist factory.
#[must_use]
pub fn generate_run(seed: u64, songs: &[Song]) -> Run {
    RouteGenerator::default().generate_run(seed, songs)
}
