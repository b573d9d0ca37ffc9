//! Per-act difficulty bands and setlist pool sizing.
use crate::constants::{
    ACT_ONE_MAX_DIFFICULTY, ACT_ONE_POOL_BOUNDS, ACT_TWO_MAX_DIFFICULTY, ACT_TWO_POOL_BOUNDS,
    DIFFICULTY_MAX, DIFFICULTY_MIN, LATE_ACT_MIN_DIFFICULTY, LATE_ACT_POOL_BOUNDS,
};
use crate::rng::RouteRng;
use crate::songs::Song;

/// Clamp a raw difficulty (or rating) into `[0, 6]`.
#[must_use]
pub fn clamp_difficulty(value: i32) -> u8 {
    let clamped = value.clamp(i32::from(DIFFICULTY_MIN), i32::from(DIFFICULTY_MAX));
    u8::try_from(clamped).unwrap_or(DIFFICULTY_MIN)
}

/// Parse a difficulty token, yielding 0 for anything that is not an integer.
#[must_use]
pub fn parse_difficulty(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Whether a song's clamped difficulty fits the band for `act_index` (1-based).
#[must_use]
pub fn within_act_band(act_index: usize, song: &Song) -> bool {
    let difficulty = clamp_difficulty(song.difficulty);
    match act_index {
        0 | 1 => difficulty <= ACT_ONE_MAX_DIFFICULTY,
        2 => difficulty <= ACT_TWO_MAX_DIFFICULTY,
        _ => difficulty >= LATE_ACT_MIN_DIFFICULTY,
    }
}

/// Songs eligible for the act's challenges.
///
/// Falls back to the whole catalog when the band filters everything out, so
/// a non-empty catalog never produces an empty pool.
#[must_use]
pub fn filter_for_act(act_index: usize, songs: &[Song]) -> Vec<Song> {
    let filtered: Vec<Song> = songs
        .iter()
        .filter(|song| within_act_band(act_index, song))
        .cloned()
        .collect();
    if filtered.is_empty() {
        log::debug!("act {act_index} difficulty band matched no songs; using full catalog");
        return songs.to_vec();
    }
    filtered
}

/// Inclusive setlist pool bounds for an act.
#[must_use]
pub const fn pool_bounds_for_act(act_index: usize) -> (usize, usize) {
    match act_index {
        0 | 1 => ACT_ONE_POOL_BOUNDS,
        2 => ACT_TWO_POOL_BOUNDS,
        _ => LATE_ACT_POOL_BOUNDS,
    }
}

/// Draw the setlist size for an act given how many songs are available.
///
/// The upper bound shrinks to `available`; when even the lower bound cannot
/// be met the whole available count is used without drawing.
pub fn choose_pool_size(act_index: usize, available: usize, rng: &mut RouteRng) -> usize {
    let (min_size, max_size) = pool_bounds_for_act(act_index);
    if available < min_size {
        return available;
    }
    rng.inclusive(min_size, max_size.min(available))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<Song> {
        (0..=6).map(|d| Song::new(format!("d{d}"), d)).collect()
    }

    fn titles(songs: &[Song]) -> Vec<&str> {
        songs.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn clamps_and_parses() {
        assert_eq!(clamp_difficulty(-4), 0);
        assert_eq!(clamp_difficulty(3), 3);
        assert_eq!(clamp_difficulty(42), 6);
        assert_eq!(parse_difficulty(" 5 "), 5);
        assert_eq!(parse_difficulty("-1"), -1);
        assert_eq!(parse_difficulty("five"), 0);
        assert_eq!(parse_difficulty(""), 0);
    }

    #[test]
    fn act_bands_filter_catalog() {
        let songs = ladder();
        assert_eq!(titles(&filter_for_act(1, &songs)), ["d0", "d1", "d2", "d3"]);
        assert_eq!(
            titles(&filter_for_act(2, &songs)),
            ["d0", "d1", "d2", "d3", "d4", "d5"]
        );
        assert_eq!(titles(&filter_for_act(3, &songs)), ["d3", "d4", "d5", "d6"]);
        assert_eq!(titles(&filter_for_act(7, &songs)), ["d3", "d4", "d5", "d6"]);
    }

    #[test]
    fn out_of_range_difficulty_is_clamped_before_banding() {
        let songs = vec![Song::new("over", 11), Song::new("under", -3)];
        assert_eq!(titles(&filter_for_act(1, &songs)), ["under"]);
        assert_eq!(titles(&filter_for_act(3, &songs)), ["over"]);
    }

    #[test]
    fn empty_band_falls_back_to_full_catalog() {
        let hard_only = vec![Song::new("shred", 6), Song::new("solo", 5)];
        assert_eq!(titles(&filter_for_act(1, &hard_only)), ["shred", "solo"]);
        assert!(filter_for_act(1, &[]).is_empty());
    }

    #[test]
    fn pool_size_respects_bounds_and_availability() {
        let mut rng = RouteRng::from_user_seed(3);
        for _ in 0..100 {
            let size = choose_pool_size(1, 40, &mut rng);
            assert!((9..=12).contains(&size));
            let size = choose_pool_size(2, 7, &mut rng);
            assert!((6..=7).contains(&size));
            let size = choose_pool_size(3, 40, &mut rng);
            assert!((3..=5).contains(&size));
        }
    }

    #[test]
    fn short_catalog_uses_everything_without_drawing() {
        let mut rng = RouteRng::from_user_seed(3);
        assert_eq!(choose_pool_size(1, 4, &mut rng), 4);
        assert_eq!(choose_pool_size(3, 0, &mut rng), 0);
        assert_eq!(choose_pool_size(2, 6, &mut rng), 6);
        assert_eq!(rng.draws(), 0);
    }
}
