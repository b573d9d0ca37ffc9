//! Long Way To The Top Route Engine
//!
//! Platform-agnostic core for the three-act rhythm roguelike route map.
//! This crate generates deterministic route graphs from a seed and a song
//! catalog, and tracks a player's path through them, without any rendering
//! or input-decoding dependencies.

pub mod audit;
pub mod challenge;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod difficulty;
pub mod generator;
pub mod graph;
pub mod navigation;
pub mod rng;
pub mod seed;
pub mod session;
pub mod songs;

// Re-export commonly used types
pub use audit::{InvariantViolation, audit_act, audit_run};
pub use challenge::{Challenge, ChallengeFactory, SetlistFactory};
pub use config::{RouteConfig, RouteConfigError};
pub use connectivity::connect;
pub use difficulty::{
    choose_pool_size, clamp_difficulty, filter_for_act, parse_difficulty, pool_bounds_for_act,
};
pub use generator::{RouteGenerator, generate_run};
pub use graph::{Act, Edges, Node, NodeContent, NodeKind, Row, Run};
pub use navigation::{NavPhase, NavigationState, PathNavigator, allowed_columns, parse_rating};
pub use rng::RouteRng;
pub use seed::{
    clock_seed, decode_to_seed, encode_friendly, generate_code_from_entropy, seed_label,
};
pub use session::{NavCommand, RouteSession};
pub use songs::{CatalogError, Song, SongCatalog};

/// Trait for abstracting song catalog loading.
/// Platform-specific implementations should provide this
pub trait SongLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the song catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<SongCatalog, Self::Error>;
}

/// Entry point for building runs and sessions from a catalog source
pub struct RouteEngine<L>
where
    L: SongLoader,
{
    loader: L,
}

impl<L> RouteEngine<L>
where
    L: SongLoader,
{
    /// Create a new engine with the provided catalog loader
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Generate a run for `seed` with the built-in configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the song catalog cannot be loaded.
    pub fn create_run(&self, seed: u64) -> Result<Run, L::Error> {
        let catalog = self.loader.load_catalog()?;
        Ok(generate_run(seed, catalog.songs()))
    }

    /// Construct a navigable session for `seed`
    ///
    /// # Errors
    ///
    /// Returns an error if the song catalog cannot be loaded.
    pub fn create_session(&self, seed: u64) -> Result<RouteSession, L::Error> {
        let catalog = self.loader.load_catalog()?;
        Ok(RouteSession::new(seed, catalog))
    }

    /// Construct a session using a JSON route configuration override
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog cannot be loaded.
    pub fn create_session_with_config(
        &self,
        seed: u64,
        config_json: &str,
    ) -> Result<RouteSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let config = RouteConfig::from_json(config_json)?;
        let generator = RouteGenerator::new(config)?;
        let catalog = self.loader.load_catalog().map_err(Into::into)?;
        Ok(RouteSession::with_generator(generator, seed, catalog))
    }
}
