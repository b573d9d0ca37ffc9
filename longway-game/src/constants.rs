//! Centralized tuning constants for route generation and navigation.
//!
//! These values define the shape of every generated run. `RouteConfig`
//! defaults to them; overriding them goes through validation first.

// Run shape ----------------------------------------------------------------
pub const TOTAL_ACTS: usize = 3;
pub const ROWS_PER_ACT: usize = 7;
pub const MIN_NODES_PER_ROW: usize = 2;
pub const MAX_NODES_PER_ROW: usize = 3;
pub const SHOP_ROWS_PER_ACT: usize = 2;
pub const SHOP_ROW_RETRY_BUDGET: u32 = 100;

// Difficulty bands ---------------------------------------------------------
pub const DIFFICULTY_MIN: u8 = 0;
pub const DIFFICULTY_MAX: u8 = 6;
pub(crate) const ACT_ONE_MAX_DIFFICULTY: u8 = 3;
pub(crate) const ACT_TWO_MAX_DIFFICULTY: u8 = 5;
pub(crate) const LATE_ACT_MIN_DIFFICULTY: u8 = 3;

// Setlist pool bounds (inclusive) ------------------------------------------
pub(crate) const ACT_ONE_POOL_BOUNDS: (usize, usize) = (9, 12);
pub(crate) const ACT_TWO_POOL_BOUNDS: (usize, usize) = (6, 9);
pub(crate) const LATE_ACT_POOL_BOUNDS: (usize, usize) = (3, 5);

// Ratings ------------------------------------------------------------------
pub const RATING_MIN: u8 = 0;
pub const RATING_MAX: u8 = 6;

// Challenges ---------------------------------------------------------------
pub const CHALLENGE_PICK_COUNT: usize = 3;
pub(crate) const CHALLENGE_NAME: &str = "Challenge";
pub(crate) const BOSS_NAME: &str = "Boss";
pub(crate) const BOSS_SONG_TITLE: &str = "Bohemian Rhapsody";

// Logging keys -------------------------------------------------------------
pub const LOG_ROUTE_COMMIT: &str = "log.route.commit";
pub const LOG_ROUTE_RATED: &str = "log.route.rated";
pub const LOG_ROUTE_ACT_COMPLETE: &str = "log.route.act-complete";
pub const LOG_ROUTE_ACT_SWITCH: &str = "log.route.act-switch";
pub const LOG_ROUTE_REROLL: &str = "log.route.reroll";

// Seed derivation ----------------------------------------------------------
pub(crate) const ROUTE_STREAM_TAG: &[u8] = b"route";
