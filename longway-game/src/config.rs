//! Run-shape configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    MAX_NODES_PER_ROW, MIN_NODES_PER_ROW, ROWS_PER_ACT, SHOP_ROW_RETRY_BUDGET, SHOP_ROWS_PER_ACT,
    TOTAL_ACTS,
};

/// Errors raised when a route configuration cannot produce a valid run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("a run needs at least one act")]
    NoActs,
    #[error("node bounds invalid (min {min}, max {max}); min must be at least 1 and not above max")]
    NodeBounds { min: usize, max: usize },
    #[error(
        "{rows} rows per act cannot hold {shops} non-adjacent shop rows between the first row and the boss row"
    )]
    TooFewRows { rows: usize, shops: usize },
    #[error("route config could not be parsed: {0}")]
    Parse(String),
}

/// Shape of a generated run. Every field falls back to the built-in constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "RouteConfig::default_total_acts")]
    pub total_acts: usize,
    #[serde(default = "RouteConfig::default_rows_per_act")]
    pub rows_per_act: usize,
    #[serde(default = "RouteConfig::default_min_nodes_per_row")]
    pub min_nodes_per_row: usize,
    #[serde(default = "RouteConfig::default_max_nodes_per_row")]
    pub max_nodes_per_row: usize,
    #[serde(default = "RouteConfig::default_shop_rows_per_act")]
    pub shop_rows_per_act: usize,
    #[serde(default = "RouteConfig::default_shop_retry_budget")]
    pub shop_retry_budget: u32,
}

impl RouteConfig {
    const fn default_total_acts() -> usize {
        TOTAL_ACTS
    }

    const fn default_rows_per_act() -> usize {
        ROWS_PER_ACT
    }

    const fn default_min_nodes_per_row() -> usize {
        MIN_NODES_PER_ROW
    }

    const fn default_max_nodes_per_row() -> usize {
        MAX_NODES_PER_ROW
    }

    const fn default_shop_rows_per_act() -> usize {
        SHOP_ROWS_PER_ACT
    }

    const fn default_shop_retry_budget() -> u32 {
        SHOP_ROW_RETRY_BUDGET
    }

    /// Parse a (possibly partial) configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting shape is invalid.
    pub fn from_json(json: &str) -> Result<Self, RouteConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| RouteConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the shape can satisfy every run invariant.
    ///
    /// Shop rows live strictly between the first row and the boss row and may
    /// not touch each other, so `n` shops need at least `2n - 1` interior rows.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), RouteConfigError> {
        if self.total_acts == 0 {
            return Err(RouteConfigError::NoActs);
        }
        if self.min_nodes_per_row == 0 || self.min_nodes_per_row > self.max_nodes_per_row {
            return Err(RouteConfigError::NodeBounds {
                min: self.min_nodes_per_row,
                max: self.max_nodes_per_row,
            });
        }
        let interior = self.rows_per_act.saturating_sub(2);
        let needed = (2 * self.shop_rows_per_act).saturating_sub(1);
        if self.rows_per_act < 2 || interior < needed {
            return Err(RouteConfigError::TooFewRows {
                rows: self.rows_per_act,
                shops: self.shop_rows_per_act,
            });
        }
        Ok(())
    }

    /// Index of the boss row within every act.
    #[must_use]
    pub const fn boss_row(&self) -> usize {
        self.rows_per_act - 1
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            total_acts: Self::default_total_acts(),
            rows_per_act: Self::default_rows_per_act(),
            min_nodes_per_row: Self::default_min_nodes_per_row(),
            max_nodes_per_row: Self::default_max_nodes_per_row(),
            shop_rows_per_act: Self::default_shop_rows_per_act(),
            shop_retry_budget: Self::default_shop_retry_budget(),
        }
    }
}
