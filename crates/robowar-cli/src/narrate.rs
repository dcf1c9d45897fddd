use robowar_protocol::Event;

/// One human-readable line per event. Turn markers have no line of their
/// own; the runner prints a header instead.
pub fn line(event: &Event) -> Option<String> {
    let text = match event {
        Event::TurnStarted { .. } | Event::TurnEnded { .. } => return None,
        Event::EnemySpotted { robot, enemy, at } => {
            format!("{robot} spotted {enemy} at {}, {}", at.x, at.y)
        }
        Event::Move { robot, to } => format!("{robot} moved to {}, {}", to.x, to.y),
        Event::Trample { robot, victim } => format!("{robot} trampled {victim}"),
        Event::Fire { robot, at } => format!("{robot} fires at {}, {}", at.x, at.y),
        Event::FireHit { robot, victim } => format!("{robot} shot {victim}"),
        Event::Evolve { robot, into, .. } => format!("{robot} evolved into a {into}"),
        Event::Revive { robot, at, lives } => {
            format!("{robot} revived at {}, {} with {lives} lives left", at.x, at.y)
        }
        Event::Destroyed { robot } => format!("{robot} was destroyed"),
    };
    Some(text)
}
