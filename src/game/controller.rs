use chrono::Utc;
use uuid::Uuid;

use crate::{
    dictionary::WordLookup,
    error::{LayoutError, SnapshotError, TurnError},
    game::{
        bag::TileSupply,
        turn::{apply_move, validate_and_score_move},
    },
    models::{
        Board, Game, GameRules, GameState, Move, PlacedTile, Player, PlayerAction, RackAdjustment,
        Tile, TurnAction, TurnOutcome, TurnRecord, MAX_PLAYERS, MIN_PLAYERS, RACK_CAPACITY,
    },
};

impl Game {
    /// A fresh game waiting for players. Fails only if the board layout is
    /// broken, which must stop setup.
    pub fn new(rules: GameRules) -> Result<Self, LayoutError> {
        let board = Board::new();
        board.validate_layout()?;

        Ok(Self {
            game_id: Uuid::new_v4(),
            state: GameState::WaitingForPlayers,
            board,
            players: Vec::new(),
            current_turn: 0,
            history: Vec::new(),
            rules,
            scoreless_streak: 0,
            finished_by: None,
            settled: false,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        })
    }

    pub fn add_player(&mut self, name: impl Into<String>) -> Result<Uuid, TurnError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(TurnError::AlreadyStarted);
        }
        let player = Player::new(name);
        let player_id = player.player_id;
        self.players.push(player);
        Ok(player_id)
    }

    /// Deal a rack to every player and hand the first turn to the first
    /// player who joined.
    pub fn start(&mut self, supply: &mut impl TileSupply) -> Result<(), TurnError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(TurnError::AlreadyStarted);
        }
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(TurnError::InvalidPlayerCount { count });
        }

        for player in &mut self.players {
            let tiles = supply.draw(RACK_CAPACITY);
            player.rack.add(tiles)?;
        }

        self.state = GameState::InProgress;
        self.current_turn = 0;
        self.started_at = Some(Utc::now());
        tracing::info!("Game {} started with {} players", self.game_id, count);
        Ok(())
    }

    pub fn current_player(&self) -> Option<&Player> {
        match self.state {
            GameState::InProgress => self.players.get(self.current_turn),
            _ => None,
        }
    }

    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// The board is still empty, so the next play must cover the center
    pub fn is_first_move(&self) -> bool {
        self.board.is_empty()
    }

    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// Mark a player as (in)active. Inactive players are skipped in the
    /// rotation and do not count toward the scoreless-turn limit.
    pub fn set_player_active(&mut self, player_id: Uuid, active: bool) -> Result<(), TurnError> {
        let idx = self.player_index(player_id)?;
        self.players[idx].is_active = active;

        if !active && self.state == GameState::InProgress && idx == self.current_turn {
            self.advance_turn();
        }
        Ok(())
    }

    /// Run one turn for `player_id`. On error the game is left untouched and
    /// the same player keeps the turn.
    pub fn submit(
        &mut self,
        player_id: Uuid,
        action: PlayerAction,
        dictionary: &impl WordLookup,
        supply: &mut impl TileSupply,
    ) -> Result<TurnOutcome, TurnError> {
        if self.state != GameState::InProgress {
            return Err(TurnError::NotInProgress { state: self.state });
        }
        let idx = self.player_index(player_id)?;
        if idx != self.current_turn {
            return Err(TurnError::NotPlayersTurn);
        }

        let result = match action {
            PlayerAction::Play { tiles } => self.play(idx, &tiles, dictionary, supply),
            PlayerAction::Exchange { tiles } => self.exchange(idx, tiles, supply),
            PlayerAction::Pass => Ok(self.pass(idx)),
        };

        match result {
            Ok(action) => Ok(self.finish_turn(idx, action, &*supply)),
            Err(e) => {
                tracing::debug!("Rejected turn from {} in game {}: {}", player_id, self.game_id, e);
                Err(e)
            }
        }
    }

    fn play(
        &mut self,
        idx: usize,
        tiles: &[PlacedTile],
        dictionary: &impl WordLookup,
        supply: &mut impl TileSupply,
    ) -> Result<TurnAction, TurnError> {
        let player = &self.players[idx];
        let scored = validate_and_score_move(
            &self.board,
            &player.rack,
            tiles,
            self.is_first_move(),
            dictionary,
        )?;
        let snapshot = apply_move(&self.board, &player.rack, &scored, supply)?;

        self.board = snapshot.board;
        let player = &mut self.players[idx];
        player.rack = snapshot.rack;
        player.score += scored.total() as i32;
        self.scoreless_streak = 0;

        tracing::info!(
            "{} played {:?} for {} points",
            player.name,
            scored.word_list(),
            scored.total()
        );

        Ok(TurnAction::Play(Move {
            player_id: player.player_id,
            words: scored.word_list(),
            score: scored.total(),
            placements: scored.placements,
        }))
    }

    fn exchange(
        &mut self,
        idx: usize,
        tiles: Vec<Tile>,
        supply: &mut impl TileSupply,
    ) -> Result<TurnAction, TurnError> {
        if tiles.is_empty() {
            return Err(TurnError::EmptyExchange);
        }
        let remaining = supply.remaining();
        if remaining < RACK_CAPACITY {
            return Err(TurnError::ExchangeUnavailable { remaining });
        }

        let player = &mut self.players[idx];
        let mut rack = player.rack.clone();
        let returned = rack.remove(&tiles)?;
        let count = returned.len();

        supply.return_tiles(returned);
        let drawn = supply.draw(count);
        rack.add(drawn)?;

        player.rack = rack;
        self.scoreless_streak += 1;
        tracing::debug!("{} exchanged {} tiles", player.name, count);

        Ok(TurnAction::Exchange { count })
    }

    fn pass(&mut self, idx: usize) -> TurnAction {
        self.scoreless_streak += 1;
        tracing::debug!("{} passed", self.players[idx].name);
        TurnAction::Pass
    }

    /// Record the turn, check the end conditions and rotate
    fn finish_turn(
        &mut self,
        idx: usize,
        action: TurnAction,
        supply: &impl TileSupply,
    ) -> TurnOutcome {
        let player_id = self.players[idx].player_id;
        let emptied_rack = matches!(action, TurnAction::Play(_))
            && supply.remaining() == 0
            && self.players[idx].rack.is_empty();

        let record = TurnRecord {
            turn_number: self.history.len() as u32 + 1,
            player_id,
            action,
            played_at: Utc::now(),
        };
        self.history.push(record.clone());

        if emptied_rack {
            self.finished_by = Some(player_id);
            self.finish();
        } else if self
            .rules
            .scoreless_limit
            .is_reached(self.scoreless_streak, self.active_player_count())
        {
            self.finish();
        } else {
            self.advance_turn();
        }

        TurnOutcome {
            record,
            state: self.state,
            next_player: self.current_player().map(|p| p.player_id),
        }
    }

    fn finish(&mut self) {
        self.state = GameState::Finished;
        self.finished_at = Some(Utc::now());
        tracing::info!(
            "Game {} finished after {} turns",
            self.game_id,
            self.history.len()
        );
    }

    /// Move to the next active player, wrapping around
    fn advance_turn(&mut self) {
        let count = self.players.len();
        for offset in 1..=count {
            let next = (self.current_turn + offset) % count;
            if self.players[next].is_active {
                self.current_turn = next;
                return;
            }
        }
    }

    fn player_index(&self, player_id: Uuid) -> Result<usize, TurnError> {
        self.players
            .iter()
            .position(|p| p.player_id == player_id)
            .ok_or(TurnError::UnknownPlayer { player_id })
    }

    /// Rack-value corrections once the game is over.
    ///
    /// Every player with tiles left loses their rack value. If someone
    /// emptied their rack to end the game, they gain the sum of the others.
    pub fn final_adjustments(&self) -> Option<Vec<RackAdjustment>> {
        if self.state != GameState::Finished {
            return None;
        }

        let leftover: u32 = self
            .players
            .iter()
            .filter(|p| Some(p.player_id) != self.finished_by)
            .map(|p| p.rack.value())
            .sum();

        let adjustments = self
            .players
            .iter()
            .map(|p| {
                let rack_value = p.rack.value();
                let delta = if Some(p.player_id) == self.finished_by {
                    leftover as i32
                } else {
                    -(rack_value as i32)
                };
                RackAdjustment {
                    player_id: p.player_id,
                    rack_value,
                    delta,
                }
            })
            .collect();

        Some(adjustments)
    }

    /// Apply the final adjustments to player scores, at most once.
    /// Returns false if the game is not finished or already settled.
    pub fn settle(&mut self) -> bool {
        if self.settled {
            return false;
        }
        let Some(adjustments) = self.final_adjustments() else {
            return false;
        };

        for adjustment in adjustments {
            if let Some(player) = self
                .players
                .iter_mut()
                .find(|p| p.player_id == adjustment.player_id)
            {
                player.score += adjustment.delta;
            }
        }
        self.settled = true;
        true
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a game, refusing snapshots with a corrupt board layout or
    /// racks holding tiles no bag could have dealt
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let game: Game = serde_json::from_str(json)?;
        game.board.validate_layout()?;
        for player in &game.players {
            player
                .rack
                .validate()
                .map_err(|source| SnapshotError::Rack {
                    player_id: player.player_id,
                    source,
                })?;
        }
        Ok(game)
    }
}
