//! Challenge construction for challenge and boss nodes.
use serde::{Deserialize, Serialize};

use crate::constants::{BOSS_NAME, BOSS_SONG_TITLE, CHALLENGE_NAME, CHALLENGE_PICK_COUNT};
use crate::rng::RouteRng;
use crate::songs::Song;

/// Descriptive content attached to a challenge or boss node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub name: String,
    pub summary: String,
    pub songs: Vec<Song>,
}

impl Challenge {
    /// Lead song of the setlist, if there is one.
    #[must_use]
    pub fn featured_song(&self) -> Option<&Song> {
        self.songs.first()
    }
}

/// Builds the content for challenge and boss nodes.
///
/// The generator treats results as opaque; implementations may draw from
/// `rng` but must do so deterministically.
pub trait ChallengeFactory {
    fn new_challenge(&self, pool: &[Song], rng: &mut RouteRng, pool_size: usize) -> Challenge;

    fn boss_challenge(&self, all_songs: &[Song]) -> Challenge;
}

/// Default factory: a random setlist the player picks songs from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetlistFactory;

impl ChallengeFactory for SetlistFactory {
    fn new_challenge(&self, pool: &[Song], rng: &mut RouteRng, pool_size: usize) -> Challenge {
        let songs = sample_songs(pool, pool_size, rng);
        Challenge {
            name: CHALLENGE_NAME.to_string(),
            summary: format!(
                "Pick any {CHALLENGE_PICK_COUNT} of these {} tracks.",
                songs.len()
            ),
            songs,
        }
    }

    fn boss_challenge(&self, all_songs: &[Song]) -> Challenge {
        let boss = all_songs
            .iter()
            .find(|song| song.title == BOSS_SONG_TITLE)
            .or_else(|| all_songs.first());
        match boss {
            Some(song) => Challenge {
                name: BOSS_NAME.to_string(),
                summary: format!("Final showdown: {}.", song.title),
                songs: vec![song.clone()],
            },
            None => Challenge {
                name: BOSS_NAME.to_string(),
                summary: String::from("Final showdown."),
                songs: Vec::new(),
            },
        }
    }
}

/// Pick `count` distinct songs in draw order; the whole pool when it is not larger.
fn sample_songs(pool: &[Song], count: usize, rng: &mut RouteRng) -> Vec<Song> {
    if pool.len() <= count {
        return pool.to_vec();
    }
    pick_distinct(pool.len(), count, rng)
        .into_iter()
        .map(|idx| pool[idx].clone())
        .collect()
}

/// Rejection-sample `count` distinct indices from `[0, size)`.
pub(crate) fn pick_distinct(size: usize, count: usize, rng: &mut RouteRng) -> Vec<usize> {
    let count = count.min(size);
    let mut seen = vec![false; size];
    let mut picks = Vec::with_capacity(count);
    while picks.len() < count {
        let idx = rng.below(size);
        if seen[idx] {
            continue;
        }
        seen[idx] = true;
        picks.push(idx);
    }
    picks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: i32) -> Vec<Song> {
        (0..n).map(|i| Song::new(format!("song-{i}"), i % 7)).collect()
    }

    #[test]
    fn challenge_samples_distinct_songs() {
        let songs = pool(20);
        let mut rng = RouteRng::from_user_seed(8);
        let challenge = SetlistFactory.new_challenge(&songs, &mut rng, 9);
        assert_eq!(challenge.songs.len(), 9);
        let mut titles: Vec<_> = challenge.songs.iter().map(|s| s.title.clone()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 9);
        assert_eq!(challenge.summary, "Pick any 3 of these 9 tracks.");
    }

    #[test]
    fn small_pool_is_taken_whole_without_drawing() {
        let songs = pool(4);
        let mut rng = RouteRng::from_user_seed(8);
        let challenge = SetlistFactory.new_challenge(&songs, &mut rng, 9);
        assert_eq!(challenge.songs, songs);
        assert_eq!(rng.draws(), 0);

        let empty = SetlistFactory.new_challenge(&[], &mut rng, 0);
        assert!(empty.songs.is_empty());
        assert!(empty.featured_song().is_none());
    }

    #[test]
    fn boss_prefers_the_finale_song() {
        let mut songs = pool(3);
        songs.push(Song::new("Bohemian Rhapsody", 5));
        let boss = SetlistFactory.boss_challenge(&songs);
        assert_eq!(boss.name, "Boss");
        assert_eq!(
            boss.featured_song().map(|s| s.title.as_str()),
            Some("Bohemian Rhapsody")
        );
        assert_eq!(boss.summary, "Final showdown: Bohemian Rhapsody.");

        let fallback = SetlistFactory.boss_challenge(&pool(2));
        assert_eq!(fallback.songs[0].title, "song-0");

        let empty = SetlistFactory.boss_challenge(&[]);
        assert!(empty.songs.is_empty());
        assert_eq!(empty.summary, "Final showdown.");
    }

    #[test]
    fn pick_distinct_caps_at_size() {
        let mut rng = RouteRng::from_user_seed(1);
        let picks = pick_distinct(2, 5, &mut rng);
        assert_eq!(picks.len(), 2);
        assert_ne!(picks[0], picks[1]);
    }
}
