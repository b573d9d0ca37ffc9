//! Structural audit of generated runs.
use thiserror::Error;

use crate::config::RouteConfig;
use crate::graph::{Act, NodeKind, Run};

/// First broken run invariant found by [`audit_run`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("run has {found} acts, expected {expected}")]
    ActCount { expected: usize, found: usize },
    #[error("act {act} has index {found}, expected {act}")]
    ActIndex { act: usize, found: usize },
    #[error("act {act} has {found} rows, expected {expected}")]
    RowCount {
        act: usize,
        expected: usize,
        found: usize,
    },
    #[error("act {act} row {row} has {found} nodes, allowed {min}..={max}")]
    RowWidth {
        act: usize,
        row: usize,
        min: usize,
        max: usize,
        found: usize,
    },
    #[error("act {act} row {row} node {col} reports column {found}")]
    ColumnIndex {
        act: usize,
        row: usize,
        col: usize,
        found: usize,
    },
    #[error("act {act} row {row} node {col} is a {found:?} node, expected {expected:?}")]
    NodeKind {
        act: usize,
        row: usize,
        col: usize,
        expected: NodeKind,
        found: NodeKind,
    },
    #[error("act {act} row {row} node {col} links to missing column {target}")]
    DanglingEdge {
        act: usize,
        row: usize,
        col: usize,
        target: usize,
    },
    #[error("act {act} row {row} node {col} is unreachable from the previous row")]
    Unreachable { act: usize, row: usize, col: usize },
    #[error("act {act} row {row} node {col} is a dead end")]
    DeadEnd { act: usize, row: usize, col: usize },
    #[error("act {act} shop rows {rows:?} are misplaced (need {expected}, interior, non-adjacent)")]
    ShopRows {
        act: usize,
        expected: usize,
        rows: Vec<usize>,
    },
}

/// Check every act of `run` against the configuration's invariants.
///
/// # Errors
///
/// Returns the first violation, scanning acts and rows in order.
pub fn audit_run(run: &Run, config: &RouteConfig) -> Result<(), InvariantViolation> {
    if run.acts.len() != config.total_acts {
        return Err(InvariantViolation::ActCount {
            expected: config.total_acts,
            found: run.acts.len(),
        });
    }
    for (idx, act) in run.acts.iter().enumerate() {
        if act.index != idx + 1 {
            return Err(InvariantViolation::ActIndex {
                act: idx + 1,
                found: act.index,
            });
        }
        audit_act(act, config)?;
    }
    Ok(())
}

/// Check one act's shape, node kinds and connectivity.
///
/// # Errors
///
/// Returns the first violation, scanning rows in order.
pub fn audit_act(act: &Act, config: &RouteConfig) -> Result<(), InvariantViolation> {
    let act_no = act.index;
    if act.row_count() != config.rows_per_act {
        return Err(InvariantViolation::RowCount {
            act: act_no,
            expected: config.rows_per_act,
            found: act.row_count(),
        });
    }

    let shop_rows = act.shop_rows();
    let last = act.last_row();
    let spaced = shop_rows.windows(2).all(|pair| pair[1] > pair[0] + 1);
    let interior = shop_rows.iter().all(|&row| row > 0 && row < last);
    if shop_rows.len() != config.shop_rows_per_act || !spaced || !interior {
        return Err(InvariantViolation::ShopRows {
            act: act_no,
            expected: config.shop_rows_per_act,
            rows: shop_rows,
        });
    }

    for (row, nodes) in act.rows.iter().enumerate() {
        let expected_kind = if row == last {
            NodeKind::Boss
        } else if shop_rows.contains(&row) {
            NodeKind::Shop
        } else {
            NodeKind::Challenge
        };
        let (min, max) = if expected_kind == NodeKind::Challenge {
            (config.min_nodes_per_row, config.max_nodes_per_row)
        } else {
            (1, 1)
        };
        if nodes.len() < min || nodes.len() > max {
            return Err(InvariantViolation::RowWidth {
                act: act_no,
                row,
                min,
                max,
                found: nodes.len(),
            });
        }

        let next_width = act.rows.get(row + 1).map_or(0, Vec::len);
        for (col, node) in nodes.iter().enumerate() {
            if node.col != col {
                return Err(InvariantViolation::ColumnIndex {
                    act: act_no,
                    row,
                    col,
                    found: node.col,
                });
            }
            if node.kind() != expected_kind {
                return Err(InvariantViolation::NodeKind {
                    act: act_no,
                    row,
                    col,
                    expected: expected_kind,
                    found: node.kind(),
                });
            }
            if let Some(&target) = node.edges.iter().find(|&&t| t >= next_width) {
                return Err(InvariantViolation::DanglingEdge {
                    act: act_no,
                    row,
                    col,
                    target,
                });
            }
            if row < last && node.edges.is_empty() {
                return Err(InvariantViolation::DeadEnd {
                    act: act_no,
                    row,
                    col,
                });
            }
            if row > 0 && !act.rows[row - 1].iter().any(|prev| prev.links_to(col)) {
                return Err(InvariantViolation::Unreachable {
                    act: act_no,
                    row,
                    col,
                });
            }
        }
    }
    Ok(())
}
