//! CLI configuration read from the environment.
use std::env;
use std::path::{Path, PathBuf};

use arena_core::{ArenaConfig, Catalog};

/// Equipment file used when `ARENA_EQUIPMENT_PATH` is unset.
pub const DEFAULT_EQUIPMENT_PATH: &str = "data/equipment.json";

/// Terminal front end configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Explicit equipment file; `None` tries [`DEFAULT_EQUIPMENT_PATH`] and
    /// falls back to the bundled definitions.
    pub equipment_path: Option<PathBuf>,
    /// Arena tunables.
    pub arena: ArenaConfig,
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_EQUIPMENT_PATH` - Equipment definitions file (default: `data/equipment.json`)
    /// - `ARENA_SEED` - Battle seed (default: random)
    /// - `ARENA_STAMINA_PER_ROUND` - Stamina regained per round (default: 1.0)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.equipment_path = lookup("ARENA_EQUIPMENT_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        config.arena.seed = parse(&lookup, "ARENA_SEED");
        if let Some(regen) = parse::<f64>(&lookup, "ARENA_STAMINA_PER_ROUND") {
            if regen.is_finite() {
                config.arena.stamina_per_round = regen.max(0.0);
            }
        }

        config
    }

    /// Loads the equipment catalog this configuration points at.
    ///
    /// # Errors
    ///
    /// Any load error for an explicit path or an existing default file.
    pub fn load_catalog(&self) -> arena_core::Result<Catalog> {
        if let Some(path) = &self.equipment_path {
            return Catalog::from_path(path);
        }
        let default = Path::new(DEFAULT_EQUIPMENT_PATH);
        if default.exists() {
            Catalog::from_path(default)
        } else {
            tracing::info!(
                path = DEFAULT_EQUIPMENT_PATH,
                "equipment file not found, using bundled definitions"
            );
            Catalog::bundled()
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
