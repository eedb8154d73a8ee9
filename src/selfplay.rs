//! Self-play game generation.
//!
//! Seats a table of AI players on a map, lets them play a bounded number of
//! turns on their own, and records a summary of where each game ended up.
//! Games are independent, so a batch can run across a rayon thread pool.

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::board::WorldMap;
use crate::combat::{Battle, BattleOutcome};
use crate::config::GameConfig;
use crate::engine::Game;
use crate::error::GameError;
use crate::player::{Color, PlayerId};

/// Configuration for a batch of self-play games.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    /// Seats per game (3 to 6).
    pub players: usize,
    /// Completed turns after which a game is stopped.
    pub max_turns: u32,
    /// Worker threads; 1 plays games in order on the calling thread.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` uses `seed + i`.
    pub seed: u64,
    pub quiet: bool,
    /// Engine settings for every game. `seed`, `ai_auto_advance` and
    /// `max_turns` are overridden per game.
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            max_turns: 60,
            threads: 4,
            seed: 0,
            quiet: false,
            game: GameConfig::default(),
        }
    }
}

/// Where one player stood when the game stopped.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub countries: usize,
    pub armies: u32,
    pub cards: usize,
}

/// Summary of a finished self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: Option<u64>,
    pub turns: u32,
    /// The player holding every country, if anyone does.
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerSummary>,
}

/// Deterministic stand-in for dice: each battle costs the weaker side one
/// army, with ties going to the defender.
pub fn attrition(battle: Battle) -> BattleOutcome {
    if battle.attackers > battle.defenders {
        BattleOutcome {
            attacker_losses: 0,
            defender_losses: 1,
        }
    } else {
        BattleOutcome {
            attacker_losses: 1,
            defender_losses: 0,
        }
    }
}

/// Plays a single all-AI game to completion or the turn limit.
pub fn play_game(
    map: &WorldMap,
    config: &SelfPlayConfig,
    game_id: usize,
    seed: Option<u64>,
) -> Result<GameRecord, SelfPlayError> {
    let game_config = GameConfig {
        seed,
        ai_auto_advance: true,
        max_turns: Some(config.max_turns),
        ..config.game.clone()
    };
    let mut game = Game::new(map.clone(), game_config);
    game.set_combat_resolver(attrition);
    for seat in 0..config.players {
        game.create_ai_player(&format!("bot-{}", seat + 1));
    }
    if !game.start_game()? {
        return Err(SelfPlayError::Seats(config.players));
    }
    Ok(record(&game, game_id, seed))
}

fn record(game: &Game, game_id: usize, seed: Option<u64>) -> GameRecord {
    let map = game.map();
    let players: Vec<PlayerSummary> = game
        .players()
        .iter()
        .map(|p| PlayerSummary {
            id: p.id(),
            name: p.name().to_string(),
            color: p.color(),
            countries: map.count_owned_by(p.id()),
            armies: map.armies_of(p.id()),
            cards: p.hand().len(),
        })
        .collect();
    let winner = players
        .iter()
        .find(|p| p.countries == map.country_count())
        .map(|p| p.id);
    GameRecord {
        game_id,
        seed,
        turns: game.turns_completed(),
        winner,
        players,
    }
}

fn game_seed(config: &SelfPlayConfig, game_id: usize) -> Option<u64> {
    if config.seed != 0 {
        Some(config.seed.wrapping_add(game_id as u64))
    } else {
        None
    }
}

fn play_logged(
    map: &WorldMap,
    config: &SelfPlayConfig,
    game_id: usize,
) -> Result<GameRecord, SelfPlayError> {
    let start = Instant::now();
    let game = play_game(map, config, game_id, game_seed(config, game_id))?;
    if !config.quiet {
        info!(
            game = game_id + 1,
            of = config.num_games,
            turns = game.turns,
            winner = ?game.winner,
            secs = start.elapsed().as_secs_f64(),
            "game finished"
        );
    }
    Ok(game)
}

/// Errors from running a batch.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("can't seat {0} players")]
    Seats(usize),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Runs a batch of self-play games, returned in game-id order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(map: &WorldMap, config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        let games = pool.install(|| {
            (0..config.num_games)
                .into_par_iter()
                .map(|i| play_logged(map, config, i))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(games)
    } else {
        let games = (0..config.num_games)
            .map(|i| play_logged(map, config, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(games)
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::demo_map;

    fn small(num_games: usize, threads: usize) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games,
            players: 3,
            max_turns: 9,
            threads,
            seed: 42,
            quiet: true,
            game: GameConfig::default(),
        }
    }

    #[test]
    fn attrition_favours_the_bigger_side() {
        let out = attrition(Battle { attackers: 3, defenders: 2 });
        assert_eq!(out.defender_losses, 1);
        let out = attrition(Battle { attackers: 1, defenders: 1 });
        assert_eq!(out.attacker_losses, 1);
    }

    #[test]
    fn single_game_leaves_every_country_owned() {
        let map = demo_map().unwrap();
        let game = play_game(&map, &small(1, 1), 0, Some(42)).unwrap();
        assert_eq!(game.players.len(), 3);
        let countries: usize = game.players.iter().map(|p| p.countries).sum();
        assert_eq!(countries, map.country_count());
        assert!(game.turns <= 9);
    }

    #[test]
    fn engine_settings_reach_every_game() {
        let map = demo_map().unwrap();
        let config = SelfPlayConfig {
            game: GameConfig {
                max_ai_attacks: 0,
                seed: Some(1),
                max_turns: Some(1),
                ..GameConfig::default()
            },
            ..small(1, 1)
        };
        let game = play_game(&map, &config, 0, Some(3)).unwrap();
        // Without attacks nobody captures, so nobody earns a card.
        assert_eq!(game.turns, 9);
        assert_eq!(game.winner, None);
        assert!(game.players.iter().all(|p| p.cards == 0));
        assert_eq!(game.seed, Some(3));
    }

    #[test]
    fn seeded_games_repeat() {
        let map = demo_map().unwrap();
        let a = play_game(&map, &small(1, 1), 0, Some(7)).unwrap();
        let b = play_game(&map, &small(1, 1), 0, Some(7)).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn bad_seat_count_is_an_error() {
        let map = demo_map().unwrap();
        let config = SelfPlayConfig {
            players: 2,
            ..small(1, 1)
        };
        assert!(matches!(
            play_game(&map, &config, 0, Some(1)),
            Err(SelfPlayError::Game(GameError::TooFewPlayers(2)))
        ));
        let config = SelfPlayConfig {
            players: 7,
            ..small(1, 1)
        };
        assert!(matches!(
            play_game(&map, &config, 0, Some(1)),
            Err(SelfPlayError::Seats(7))
        ));
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let games = run_self_play(&demo_map().unwrap(), &small(3, 1)).unwrap();
        assert_eq!(games.len(), 3);
        assert_eq!(games[2].game_id, 2);
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let map = demo_map().unwrap();
        let seq = run_self_play(&map, &small(4, 1)).unwrap();
        let par = run_self_play(&map, &small(4, 2)).unwrap();
        assert_eq!(par.len(), 4);
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(
                serde_json::to_string(a).unwrap(),
                serde_json::to_string(b).unwrap()
            );
        }
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_self_play(&demo_map().unwrap(), &small(2, 1)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 2);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["players"].is_array());
            assert!(value["turns"].is_u64());
        }
    }
}
