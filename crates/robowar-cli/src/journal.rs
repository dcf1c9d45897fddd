//! JSONL event journal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use robowar_protocol::Event;

pub struct Journal {
    out: BufWriter<File>,
}

impl Journal {
    /// Creates (or truncates) the journal file.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    pub fn record(&mut self, events: &[Event]) -> Result<()> {
        for event in events {
            let line = serde_json::to_string(event)?;
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use robowar_protocol::Position;

    use super::*;

    #[test]
    fn writes_one_event_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/events.jsonl");

        let mut journal = Journal::create(&path).unwrap();
        journal
            .record(&[
                Event::TurnStarted { turn: 1 },
                Event::Move {
                    robot: "Jet".to_string(),
                    to: Position::new(1, 2),
                },
            ])
            .unwrap();
        journal.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(
            parsed,
            Event::Move {
                robot: "Jet".to_string(),
                to: Position::new(1, 2),
            }
        );
    }
}
