use anyhow::{bail, Context, Result};
use std::env;

use crate::models::{GameRules, ScorelessLimit};

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub scoreless_limit: ScorelessLimit,
    /// Fixed shuffle for the tile bag, for reproducible games
    pub bag_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let turns = match lookup("SCORELESS_TURN_LIMIT") {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .context("SCORELESS_TURN_LIMIT must be a number")?,
            ),
            None => None,
        };

        let scoreless_limit = match lookup("SCORELESS_TURN_MODE").as_deref() {
            None | Some("per_player") => ScorelessLimit::PerPlayer {
                turns: turns.unwrap_or(2),
            },
            Some("total") => ScorelessLimit::Total {
                turns: turns.unwrap_or(6),
            },
            Some(other) => bail!(
                "SCORELESS_TURN_MODE must be 'per_player' or 'total', got '{}'",
                other
            ),
        };

        let bag_seed = match lookup("TILE_BAG_SEED") {
            Some(raw) => Some(raw.parse().context("TILE_BAG_SEED must be a number")?),
            None => None,
        };

        let game = GameConfig {
            dictionary_path: lookup("DICTIONARY_PATH")
                .unwrap_or_else(|| "./dictionary.txt".to_string()),
            scoreless_limit,
            bag_seed,
        };

        Ok(Config { game })
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            scoreless_limit: self.game.scoreless_limit,
        }
    }
}
