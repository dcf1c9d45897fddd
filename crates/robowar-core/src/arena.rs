use std::collections::HashMap;

use robowar_protocol::RobotId;

use crate::{Robot, SpawnError};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    robot: Option<Robot>,
}

/// Owns every robot still in the game, alive or awaiting revival.
///
/// Handles are generational: destroying a robot bumps its slot's generation,
/// so a stale `RobotId` resolves to nothing even after the slot is reused.
/// Names are unique and indexed; a robot keeps its name for its whole life.
#[derive(Clone, Debug, Default)]
pub struct RobotArena {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    by_name: HashMap<String, RobotId>,
}

impl RobotArena {
    /// Takes ownership of `robot`, rejecting a name already in the game.
    pub fn insert(&mut self, robot: Robot) -> Result<RobotId, SpawnError> {
        if self.by_name.contains_key(&robot.name) {
            return Err(SpawnError::DuplicateName(robot.name));
        }
        let name = robot.name.clone();

        let id = match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.robot = Some(robot);
                RobotId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    robot: Some(robot),
                });
                RobotId::new(index, 0)
            }
        };
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?
            .robot
            .as_ref()
    }

    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?
            .robot
            .as_mut()
    }

    /// Destroys a robot. Its name becomes free and its handle goes stale.
    pub fn remove(&mut self, id: RobotId) -> Option<Robot> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let robot = slot.robot.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        self.by_name.remove(&robot.name);
        Some(robot)
    }

    pub fn id_of(&self, name: &str) -> Option<RobotId> {
        self.by_name.get(name).copied()
    }

    /// Robots still in the game.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }
}
