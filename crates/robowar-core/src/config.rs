//! Game configuration loading.

use std::path::{Path, PathBuf};

use robowar_protocol::{Position, RobotKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{Board, GameRng, SpawnError, Simulation, DEFAULT_TURN_LIMIT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("board must be between 1x1 and {max}x{max}, got {width}x{height}", max = i32::MAX)]
    InvalidBoard { width: u32, height: u32 },
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// Game setup, usually read from a YAML file.
///
/// ```yaml
/// board: { width: 20, height: 20 }
/// turns: 100
/// seed: 7
/// robots:
///   - { type: RoboCop, name: Kidd, position: { x: 3, y: 6 } }
///   - { type: madbot, name: Jet }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,

    /// Number of turns before the game stops.
    #[serde(default = "default_turns")]
    pub turns: u32,

    /// Random seed. Callers pick one when absent.
    pub seed: Option<u64>,

    /// Robots in spawn order, which is also their turn order.
    pub robots: Vec<RobotEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_side")]
    pub width: u32,
    #[serde(default = "default_board_side")]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotEntry {
    /// Archetype name, matched case-insensitively.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Fixed starting cell; a random free cell when omitted.
    #[serde(default)]
    pub position: Option<Position>,
}

fn default_turns() -> u32 {
    DEFAULT_TURN_LIMIT
}

fn default_board_side() -> u32 {
    20
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_side(),
            height: default_board_side(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            turns: default_turns(),
            seed: None,
            robots: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board().map(|_| ())
    }

    pub fn board(&self) -> Result<Board, ConfigError> {
        let BoardConfig { width, height } = self.board;
        Board::try_new(width, height).ok_or(ConfigError::InvalidBoard { width, height })
    }
}

impl Simulation<GameRng> {
    /// Builds a game from `config`, seeding the random stream with `seed`.
    ///
    /// Fixed positions are reserved up front so randomly placed robots never
    /// take them. Entries with an unknown type are logged and skipped.
    pub fn from_config(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let board = config.board()?;
        let mut sim = Simulation::new(board, GameRng::seed_from_u64(seed))
            .with_turn_limit(config.turns);

        let reserved: Vec<Position> = config.robots.iter().filter_map(|r| r.position).collect();
        for entry in &config.robots {
            let kind: RobotKind = match entry.kind.parse() {
                Ok(kind) => kind,
                Err(err) => {
                    warn!(robot = %entry.name, %err, "skipping robot");
                    continue;
                }
            };
            match entry.position {
                Some(pos) => sim.spawn(entry.name.clone(), kind, pos)?,
                None => sim.spawn_random_avoiding(entry.name.clone(), kind, &reserved)?,
            };
        }

        info!(
            width = config.board.width,
            height = config.board.height,
            turns = config.turns,
            robots = sim.roster().len(),
            seed,
            "game configured"
        );
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
board:
  width: 8
  height: 6
turns: 40
seed: 99
robots:
  - type: RoboCop
    name: Kidd
    position: { x: 3, y: 5 }
  - type: madbot
    name: Jet
  - type: Dalek
    name: Who
  - type: TERMINATOR
    name: Alpha
    position: { x: 0, y: 0 }
"#;

    #[test]
    fn parses_sample_config() {
        let config = GameConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.board, BoardConfig { width: 8, height: 6 });
        assert_eq!(config.turns, 40);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.robots.len(), 4);
        assert_eq!(config.robots[0].position, Some(Position::new(3, 5)));
        assert_eq!(config.robots[1].position, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_yaml_str("robots: []").unwrap();
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.turns, DEFAULT_TURN_LIMIT);
        assert_eq!(config.seed, None);

        let config = GameConfig::from_yaml_str("board: { width: 7 }").unwrap();
        assert_eq!(config.board, BoardConfig { width: 7, height: 20 });
    }

    #[test]
    fn builds_simulation_and_skips_unknown_types() {
        let config = GameConfig::from_yaml_str(SAMPLE).unwrap();
        let sim = Simulation::from_config(&config, 99).unwrap();

        assert_eq!(sim.board().width(), 8);
        assert_eq!(sim.turn_limit(), Some(40));
        let names: Vec<&str> = sim
            .roster()
            .active_robots()
            .map(|(_, robot)| robot.name.as_str())
            .collect();
        assert_eq!(names, vec!["Kidd", "Jet", "Alpha"]);

        let (_, kidd) = sim.robot_by_name("Kidd").unwrap();
        assert_eq!(kidd.pos, Position::new(3, 5));
        let (_, jet) = sim.robot_by_name("Jet").unwrap();
        assert!(sim.board().in_bounds(jet.pos));
        assert_ne!(jet.pos, Position::new(3, 5));
        assert_ne!(jet.pos, Position::new(0, 0));
        assert_eq!(sim.robot_by_name("Alpha").unwrap().1.kind, RobotKind::Terminator);
    }

    #[test]
    fn rejects_bad_boards_and_placements() {
        let config = GameConfig::from_yaml_str("board: { width: 0, height: 4 }").unwrap();
        assert!(matches!(
            Simulation::from_config(&config, 1),
            Err(ConfigError::InvalidBoard { width: 0, height: 4 })
        ));

        let clash = r#"
board: { width: 4, height: 4 }
robots:
  - { type: MadBot, name: A, position: { x: 1, y: 1 } }
  - { type: MadBot, name: B, position: { x: 1, y: 1 } }
"#;
        let config = GameConfig::from_yaml_str(clash).unwrap();
        assert!(matches!(
            Simulation::from_config(&config, 1),
            Err(ConfigError::Spawn(SpawnError::Occupied { .. }))
        ));

        let crowded = r#"
board: { width: 1, height: 1 }
robots:
  - { type: MadBot, name: A }
  - { type: MadBot, name: B }
"#;
        let config = GameConfig::from_yaml_str(crowded).unwrap();
        assert!(matches!(
            Simulation::from_config(&config, 1),
            Err(ConfigError::Spawn(SpawnError::BoardFull(_)))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.robots[0].name, "Kidd");

        let missing = file.path().with_extension("absent");
        assert!(matches!(
            GameConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_yaml_str("board: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
