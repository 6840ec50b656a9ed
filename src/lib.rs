//! Rules engine for a 15x15 tile-placement word game.
//!
//! A proposed move flows through [`game::MoveValidator`],
//! [`game::WordExtractor`], a [`dictionary::WordLookup`] check and
//! [`game::Scorer`]; [`models::Game`] commits it and advances the turn.
//! Any failure leaves the board and racks untouched.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod models;
pub mod utils;

pub use dictionary::{Dictionary, WordLookup};
pub use error::{LayoutError, MoveError, RackError, SnapshotError, TurnError};
