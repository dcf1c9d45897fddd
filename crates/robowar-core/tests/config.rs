use std::fs;

use robowar_core::protocol::{Position, RobotKind};
use robowar_core::{ConfigError, GameConfig, Outcome, Simulation, SpawnError};

#[test]
fn config_file_drives_a_whole_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.yaml");
    fs::write(
        &path,
        r#"
board: { width: 10, height: 8 }
turns: 25
seed: 17
robots:
  - { type: robocop, name: Murphy, position: { x: 1, y: 1 } }
  - { type: ULTIMATEROBOT, name: Omega }
  - { type: BlueThunder, name: Thunder, position: { x: 9, y: 7 } }
"#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    let seed = config.seed.unwrap();
    let mut sim = Simulation::from_config(&config, seed).unwrap();

    let (murphy, _) = sim.robot_by_name("Murphy").unwrap();
    let profile = sim.profile(murphy).unwrap();
    assert_eq!(profile.kind, RobotKind::RoboCop);
    assert_eq!(profile.pos, Position::new(1, 1));
    assert_eq!(profile.fire_range, 10);

    let (omega, _) = sim.robot_by_name("Omega").unwrap();
    let profile = sim.profile(omega).unwrap();
    assert_eq!(profile.fire_range, -1);
    assert!(profile.can_trample);

    let outcome = sim.run().unwrap();
    match outcome {
        Outcome::TurnLimit => assert_eq!(sim.turn(), 26),
        Outcome::Winner { name } => assert!(sim.robot_by_name(&name).is_some()),
        Outcome::Extinct => panic!("a killer always survives its last kill"),
    }

    let snapshot = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(snapshot["width"], 10);
    assert_eq!(snapshot["height"], 8);
}

#[test]
fn fixed_position_off_the_board_is_rejected() {
    let config = GameConfig::from_yaml_str(
        "board: { width: 3, height: 3 }\nrobots:\n  - { type: MadBot, name: Lost, position: { x: 3, y: 0 } }\n",
    )
    .unwrap();

    let err = Simulation::from_config(&config, 0).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Spawn(SpawnError::OutOfBounds { .. })
    ));
    assert!(err.to_string().contains("Lost"));
}

#[test]
fn duplicate_names_are_rejected() {
    let config = GameConfig::from_yaml_str(
        "robots:\n  - { type: MadBot, name: Twin }\n  - { type: RoboTank, name: Twin }\n",
    )
    .unwrap();

    assert!(matches!(
        Simulation::from_config(&config, 0),
        Err(ConfigError::Spawn(SpawnError::DuplicateName(name))) if name == "Twin"
    ));
}
