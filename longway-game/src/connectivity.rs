//! Edge wiring between adjacent rows.
use crate::challenge::pick_distinct;
use crate::graph::Node;
use crate::rng::RouteRng;

/// Wire `prev` to `next` so that every `next` node has an inbound edge and
/// every `prev` node has an outbound edge.
///
/// Draw order is fixed: the spanning pass over `next` in column order, then
/// the branching pass over `prev` in column order. A target picked by both
/// passes is kept twice; traversal treats repeated targets as one option.
pub fn connect(prev: &mut [Node], next: &[Node], rng: &mut RouteRng) {
    if prev.is_empty() || next.is_empty() {
        return;
    }

    // spanning pass
    for target in 0..next.len() {
        let src = rng.below(prev.len());
        prev[src].edges.push(target);
    }

    // branching pass
    let max_targets = if next.len() > 1 { 2 } else { 1 };
    for node in prev.iter_mut() {
        let count = 1 + rng.below(max_targets);
        node.edges.extend(pick_distinct(next.len(), count, rng));
    }

    log::trace!(
        "wired {} -> {} nodes ({} edges)",
        prev.len(),
        next.len(),
        prev.iter().map(|n| n.edges.len()).sum::<usize>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeContent;

    fn row(width: usize) -> Vec<Node> {
        (0..width).map(|col| Node::new(col, NodeContent::Shop)).collect()
    }

    fn inbound(prev: &[Node], target: usize) -> usize {
        prev.iter().filter(|n| n.links_to(target)).count()
    }

    #[test]
    fn every_node_is_reachable_and_branches() {
        for seed in 0..200 {
            let mut rng = RouteRng::from_user_seed(seed);
            for (prev_width, next_width) in [(1, 3), (3, 1), (2, 3), (3, 2), (3, 3)] {
                let mut prev = row(prev_width);
                let next = row(next_width);
                connect(&mut prev, &next, &mut rng);
                for target in 0..next_width {
                    assert!(inbound(&prev, target) >= 1, "seed {seed} target {target}");
                }
                for node in &prev {
                    assert!(!node.edges.is_empty());
                    assert!(node.edges.iter().all(|&t| t < next_width));
                }
            }
        }
    }

    #[test]
    fn single_target_row_gets_one_branch_per_source() {
        let mut rng = RouteRng::from_user_seed(5);
        let mut prev = row(3);
        let next = row(1);
        connect(&mut prev, &next, &mut rng);
        let total: usize = prev.iter().map(|n| n.edges.len()).sum();
        // one spanning edge plus exactly one branching edge per source
        assert_eq!(total, 1 + 3);
    }

    #[test]
    fn wiring_is_reproducible() {
        let wire = |seed| {
            let mut rng = RouteRng::from_user_seed(seed);
            let mut prev = row(3);
            connect(&mut prev, &row(2), &mut rng);
            prev.into_iter().map(|n| n.edges.to_vec()).collect::<Vec<_>>()
        };
        assert_eq!(wire(77), wire(77));
    }

    #[test]
    fn empty_rows_are_left_alone() {
        let mut rng = RouteRng::from_user_seed(5);
        let mut prev = row(2);
        connect(&mut prev, &[], &mut rng);
        assert!(prev.iter().all(|n| n.edges.is_empty()));
        assert_eq!(rng.draws(), 0);
    }
}
