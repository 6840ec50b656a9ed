use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use scrabble_backend::{
    config::Config,
    game::{TileBag, TileSupply},
    models::{Game, PlacedTile, PlayerAction, Position, Rack, Tile},
    Dictionary,
};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A scripted game: who plays, optional fixed racks, and the turns in order.
/// Each turn is taken by whoever holds the turn at that point.
#[derive(Debug, Deserialize)]
struct Script {
    players: Vec<String>,
    #[serde(default)]
    racks: Vec<String>,
    turns: Vec<ScriptTurn>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ScriptTurn {
    Play { tiles: Vec<ScriptTile> },
    Exchange { letters: String },
    Pass,
}

#[derive(Debug, Deserialize)]
struct ScriptTile {
    at: String,
    letter: char,
    #[serde(default)]
    blank: bool,
}

impl ScriptTurn {
    fn into_action(self) -> Result<PlayerAction> {
        let action = match self {
            ScriptTurn::Play { tiles } => {
                let tiles = tiles
                    .into_iter()
                    .map(|t| {
                        let position: Position = t
                            .at
                            .parse()
                            .with_context(|| format!("bad position '{}'", t.at))?;
                        let tile = if t.blank {
                            Tile::blank_as(t.letter)
                        } else {
                            Tile::new(t.letter)
                        };
                        Ok(PlacedTile::new(position, tile))
                    })
                    .collect::<Result<Vec<_>>>()?;
                PlayerAction::Play { tiles }
            }
            ScriptTurn::Exchange { letters } => PlayerAction::Exchange {
                tiles: letters.chars().map(tile_for).collect(),
            },
            ScriptTurn::Pass => PlayerAction::Pass,
        };
        Ok(action)
    }
}

/// `_` stands for a blank
fn tile_for(letter: char) -> Tile {
    if letter == '_' {
        Tile::blank()
    } else {
        Tile::new(letter)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrabble_backend=debug,scrabble_replay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(script_path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: scrabble-replay <script.json>");
    };

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary
    let dictionary = match Dictionary::load(&config.game.dictionary_path).await {
        Ok(dict) => {
            tracing::info!("Dictionary loaded successfully");
            dict
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load dictionary: {}. Using empty dictionary, every play will be rejected.",
                e
            );
            Dictionary::empty()
        }
    };

    let raw = tokio::fs::read_to_string(&script_path)
        .await
        .with_context(|| format!("failed to read script {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&raw).context("malformed script")?;

    let mut bag = match config.game.bag_seed {
        Some(seed) => TileBag::seeded(seed),
        None => TileBag::standard(),
    };

    let mut game = Game::new(config.rules())?;
    for name in &script.players {
        game.add_player(name.as_str())?;
    }
    game.start(&mut bag)?;

    // Fixed racks go back through the bag so no tile is created or lost
    for (player, letters) in game.players.iter_mut().zip(&script.racks) {
        let wanted: Vec<Tile> = letters.chars().map(tile_for).collect();
        let dealt = std::mem::take(&mut player.rack);
        bag.return_tiles(dealt.tiles().to_vec());
        let mut picked = Vec::with_capacity(wanted.len());
        for tile in wanted {
            let Some(found) = bag.pick(&tile) else {
                bail!("bag has no '{}' left for {}", tile, player.name);
            };
            picked.push(found);
        }
        player.rack = Rack::from_tiles(picked)?;
    }

    for (number, turn) in script.turns.into_iter().enumerate() {
        let Some(player) = game.current_player() else {
            tracing::info!("Game over, ignoring remaining turns");
            break;
        };
        let player_id = player.player_id;
        let name = player.name.clone();

        match game.submit(player_id, turn.into_action()?, &dictionary, &mut bag) {
            Ok(outcome) => tracing::info!(
                "Turn {}: {} scored {} ({:?})",
                number + 1,
                name,
                outcome.record.score(),
                outcome.state
            ),
            Err(e) => tracing::warn!("Turn {}: {} rejected: {}", number + 1, name, e),
        }
    }

    println!("{}", game.board);
    if game.settle() {
        tracing::info!("Final rack adjustments applied");
    }
    for player in &game.players {
        println!("{:<12} {:>5}  rack: {}", player.name, player.score, rack_letters(&player.rack));
    }
    println!("tiles left in bag: {}", bag.remaining());

    Ok(())
}

fn rack_letters(rack: &Rack) -> String {
    rack.tiles().iter().map(Tile::display_char).collect()
}
