use longway_game::{
    Act, NavCommand, NavPhase, NodeKind, RouteConfig, RouteGenerator, RouteRng, RouteSession, Run,
    Song, SongCatalog, audit_run, choose_pool_size, connect, filter_for_act, generate_run,
    graph::{Node, NodeContent},
};

fn two_song_catalog() -> SongCatalog {
    SongCatalog::from_songs(vec![
        Song::new("Eye of the Tiger", 1),
        Song::new("Bohemian Rhapsody", 5),
    ])
}

fn runs_for_seeds(range: std::ops::Range<u64>) -> Vec<Run> {
    let catalog = SongCatalog::load_from_static();
    range.map(|seed| generate_run(seed, catalog.songs())).collect()
}

#[test]
fn same_seed_and_catalog_build_identical_runs() {
    let catalog = SongCatalog::load_from_static();
    for seed in [0, 1, 12_345, u64::MAX] {
        let a = generate_run(seed, catalog.songs());
        let b = generate_run(seed, catalog.songs());
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
    let a = generate_run(1, catalog.songs());
    let b = generate_run(2, catalog.songs());
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn every_node_is_reachable_and_no_node_dead_ends() {
    for run in runs_for_seeds(0..150) {
        for act in &run.acts {
            let last = act.last_row();
            for (row, nodes) in act.rows.iter().enumerate() {
                for node in nodes {
                    if row > 0 {
                        assert!(
                            act.rows[row - 1].iter().any(|p| p.links_to(node.col)),
                            "seed {} act {} row {row} col {} unreachable",
                            run.seed,
                            act.index,
                            node.col
                        );
                    }
                    if row < last {
                        assert!(!node.edges.is_empty());
                        let next_width = act.rows[row + 1].len();
                        assert!(node.edges.iter().all(|&t| t < next_width));
                    } else {
                        assert!(node.edges.is_empty());
                    }
                }
            }
        }
    }
}

#[test]
fn shops_are_spaced_and_bosses_unique() {
    let config = RouteConfig::default();
    for run in runs_for_seeds(0..150) {
        assert_eq!(audit_run(&run, &config), Ok(()), "seed {}", run.seed);
        for act in &run.acts {
            let shops = act.shop_rows();
            assert_eq!(shops.len(), 2);
            assert!(!shops.contains(&0) && !shops.contains(&act.last_row()));
            assert!(shops[1] > shops[0] + 1);
            for &row in &shops {
                assert_eq!(act.rows[row].len(), 1);
                assert!(act.rows[row][0].challenge().is_none());
            }

            let boss_row = &act.rows[act.last_row()];
            assert_eq!(boss_row.len(), 1);
            assert_eq!(boss_row[0].kind(), NodeKind::Boss);

            for (row, nodes) in act.rows.iter().enumerate() {
                if row != act.last_row() && !shops.contains(&row) {
                    assert!((2..=3).contains(&nodes.len()));
                    assert!(nodes.iter().all(|n| n.kind() == NodeKind::Challenge));
                }
            }
        }
    }
}

#[test]
fn cursor_never_leaves_the_allowed_columns() {
    let mut session = RouteSession::new(2_024, SongCatalog::load_from_static());
    let moves: [isize; 9] = [1, 1, -1, 5, -9, 2, 0, -1, 3];
    for act in 0..3 {
        for _ in 0..session.act().row_count() {
            for step in moves {
                if step >= 0 {
                    for _ in 0..step {
                        session.move_right();
                    }
                } else {
                    for _ in 0..step.unsigned_abs() {
                        session.move_left();
                    }
                }
                let nav = session.navigator();
                assert!(nav.allowed().contains(&nav.cursor_col()));
            }
            session.commit();
            session.submit_rating("3");
        }
        assert_eq!(session.navigator().phase(), NavPhase::Complete, "act {act}");
        session.next_act();
    }
}

#[test]
fn commitment_propagates_edges_in_order() {
    for seed in 0..40 {
        let mut session = RouteSession::new(seed, SongCatalog::load_from_static());
        while session.navigator().phase() != NavPhase::Complete {
            session.move_right();
            let row = session.navigator().row();
            let col = session.navigator().cursor_col();
            let edges = session.act().node(row, col).unwrap().edges.to_vec();
            session.commit();
            session.submit_rating("2");
            if session.navigator().phase() == NavPhase::Complete {
                break;
            }
            assert_eq!(session.navigator().allowed(), edges.as_slice());
            assert_eq!(session.navigator().cursor_col(), edges[0]);
        }
    }
}

#[test]
fn ratings_clamp_into_range() {
    let mut session = RouteSession::new(8, two_song_catalog());
    let inputs = [("9", 6), ("", 0), ("-1", 0), ("3", 3)];
    for (row, (input, expected)) in inputs.into_iter().enumerate() {
        session.commit();
        session.submit_rating(input);
        assert_eq!(session.navigator().stars(row), Some(expected), "{input:?}");
    }
}

#[test]
fn end_to_end_walk_with_pinned_seed() {
    let mut session = RouteSession::new(12_345, two_song_catalog());
    assert_eq!(session.run().acts.len(), 3);

    let first = session.navigator().allowed()[0];
    assert_eq!(session.navigator().cursor_col(), first);
    session.commit();
    session.submit_rating("4");

    assert_eq!(session.navigator().stars(0), Some(4));
    let expected = session.act().node(0, first).unwrap().edges.to_vec();
    assert_eq!(session.navigator().allowed(), expected.as_slice());
}

#[test]
fn reroll_isolates_runs() {
    let mut session = RouteSession::new(500, two_song_catalog());
    for cmd in [
        NavCommand::Enter,
        NavCommand::Digit('5'),
        NavCommand::Enter,
        NavCommand::NextAct,
        NavCommand::Enter,
    ] {
        session.apply(cmd);
    }
    let old_seed = session.seed();
    session.reroll_from_clock();
    assert_ne!(session.seed(), old_seed);
    assert_eq!(session.current_act(), 0);
    assert_eq!(session.navigator().phase(), NavPhase::Browsing);
    for row in 0..session.act().row_count() {
        assert!(session.navigator().committed(row).is_none());
        assert!(session.navigator().stars(row).is_none());
    }
    session.next_act();
    assert!(session.navigator().committed(0).is_none());
}

#[test]
fn empty_catalog_degrades_without_failing() {
    let run = generate_run(77, &[]);
    assert_eq!(audit_run(&run, &RouteConfig::default()), Ok(()));
    for act in &run.acts {
        for node in act.rows.iter().flatten() {
            if let Some(challenge) = node.challenge() {
                assert!(challenge.songs.is_empty());
            }
        }
    }
}

/// Re-derive `connect` from raw `below` draws: one spanning draw per next
/// column, then per source a branch count and distinct targets.
fn replay_connect(prev_width: usize, next_width: usize, rng: &mut RouteRng) -> Vec<Vec<usize>> {
    let mut edges = vec![Vec::new(); prev_width];
    for target in 0..next_width {
        edges[rng.below(prev_width)].push(target);
    }
    let max_targets = if next_width > 1 { 2 } else { 1 };
    for source in &mut edges {
        let count = 1 + rng.below(max_targets);
        let mut picked = vec![false; next_width];
        let mut taken = 0;
        while taken < count {
            let target = rng.below(next_width);
            if !picked[target] {
                picked[target] = true;
                source.push(target);
                taken += 1;
            }
        }
    }
    edges
}

#[test]
fn connectivity_spans_before_branching_in_column_order() {
    let row = |width: usize| -> Vec<Node> {
        (0..width).map(|c| Node::new(c, NodeContent::Shop)).collect()
    };
    for seed in 0..64 {
        for (prev_width, next_width) in [(1, 3), (2, 3), (3, 2), (3, 3), (3, 1)] {
            let mut rng = RouteRng::from_user_seed(seed);
            let mut prev = row(prev_width);
            connect(&mut prev, &row(next_width), &mut rng);
            let wired: Vec<Vec<usize>> = prev.iter().map(|n| n.edges.to_vec()).collect();

            let mut replay = RouteRng::from_user_seed(seed);
            let expected = replay_connect(prev_width, next_width, &mut replay);
            assert_eq!(wired, expected, "seed {seed} {prev_width}->{next_width}");
            assert_eq!(rng.draws(), replay.draws());
        }
    }
}

#[test]
fn act_draws_pool_size_before_shop_rows() {
    let generator = RouteGenerator::default();
    let catalog = SongCatalog::load_from_static();
    for seed in 0..64 {
        let mut rng = RouteRng::from_user_seed(seed);
        let act = generator.generate_act(1, &mut rng, catalog.songs());

        let mut replay = RouteRng::from_user_seed(seed);
        let pool = filter_for_act(1, catalog.songs());
        let pool_size = choose_pool_size(1, pool.len(), &mut replay);
        let shops: Vec<usize> = generator.pick_shop_rows(&mut replay).into_iter().collect();

        assert_eq!(act.shop_rows(), shops, "seed {seed}");
        for node in &act.rows[0] {
            let challenge = node.challenge().unwrap();
            assert_eq!(challenge.songs.len(), pool_size.min(pool.len()), "seed {seed}");
        }
    }
}

#[test]
fn run_continues_one_stream_act_after_act() {
    let generator = RouteGenerator::default();
    let catalog = SongCatalog::load_from_static();
    for seed in [3, 12_345, u64::MAX] {
        let mut rng = RouteRng::from_user_seed(seed);
        let acts: Vec<Act> = (1..=3)
            .map(|index| generator.generate_act(index, &mut rng, catalog.songs()))
            .collect();
        assert_eq!(generate_run(seed, catalog.songs()).acts, acts);
    }
}
