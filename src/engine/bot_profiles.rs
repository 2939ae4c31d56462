//! Named bot profiles: strategy choice plus pacing for the computer player.
//! Loaded from TOML at runtime for the interactive CLI and the arena.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// How a bot picks among legal moves. Both are uniform-random; they differ
/// only in what is sampled uniformly.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Random piece among those that can move, then random destination.
    #[default]
    ShuffleScan,
    /// Random move among every legal (from, to) pair.
    Uniform,
}

impl std::str::FromStr for StrategyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shuffle_scan" | "random" => Ok(StrategyType::ShuffleScan),
            "uniform" => Ok(StrategyType::Uniform),
            other => Err(format!("unknown strategy type '{}'", other)),
        }
    }
}

pub const DEFAULT_THINK_DELAY_MS: u64 = 1000;

/// A named bot profile.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfile {
    pub description: Option<String>,
    #[serde(default)]
    pub strategy_type: StrategyType,
    /// Pause before the computer moves, in the interactive CLI only.
    pub think_delay_ms: Option<u64>,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl BotProfile {
    pub fn effective_think_delay_ms(&self) -> u64 {
        self.think_delay_ms.unwrap_or(DEFAULT_THINK_DELAY_MS)
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, BotProfile>,
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,
}

impl BotProfilesFile {
    /// Look up `name`, or the default profile when `name` is None. Falls back
    /// to the built-in profile if neither is configured.
    pub fn resolve(&self, name: Option<&str>) -> Result<BotProfile, String> {
        match name.or(self.default_profile.as_deref()) {
            Some(n) => self.profiles.get(n).cloned().ok_or_else(|| {
                let mut available: Vec<&String> = self.profiles.keys().collect();
                available.sort();
                format!("profile '{}' not found (available: {:?})", n, available)
            }),
            None => Ok(BotProfile::default()),
        }
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<BotProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load profiles from well-known paths, returning a default if none found.
pub fn load_default_profiles() -> BotProfilesFile {
    let candidates = [
        "bot_profiles.toml",
        "../bot_profiles.toml",
        "/etc/draughts/bot_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded bot profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load bot profiles");
                }
            }
        }
    }
    tracing::info!("no bot_profiles.toml found, using built-in defaults");
    BotProfilesFile::default()
}
