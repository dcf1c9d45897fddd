use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generational handle to a robot stored in the simulation arena.
///
/// A handle stays valid until the robot is destroyed; after that the slot
/// generation moves on and the stale handle resolves to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId {
    pub index: u32,
    pub generation: u32,
}

impl RobotId {
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            index: (raw >> 32) as u32,
            generation: raw as u32,
        }
    }

    #[inline]
    pub const fn to_raw(self) -> u64 {
        ((self.index as u64) << 32) | (self.generation as u64)
    }
}

impl Serialize for RobotId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.to_raw())
    }
}

impl<'de> Deserialize<'de> for RobotId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_packing_keeps_index_and_generation() {
        let id = RobotId::new(7, 3);
        assert_eq!(RobotId::from_raw(id.to_raw()), id);
        assert_eq!(serde_json::to_string(&id).unwrap(), ((7_u64 << 32) | 3).to_string());
    }
}
