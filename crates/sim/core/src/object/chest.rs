//! Loot chests.

/// Chests are inert in the simulation; the host opens them through
/// [`ChestState::open`] and hands the drops to its inventory layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChestState {
    /// Item config ids granted on opening.
    pub drops: Vec<u32>,
    pub opened: bool,
}

impl ChestState {
    /// Opens the chest and yields its drops. A second open yields nothing.
    pub fn open(&mut self) -> Vec<u32> {
        if self.opened {
            return Vec::new();
        }
        self.opened = true;
        self.drops.clone()
    }
}
