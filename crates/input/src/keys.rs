use std::collections::BTreeSet;

/// The four directional keys the camera reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [
        MoveKey::Forward,
        MoveKey::Backward,
        MoveKey::Left,
        MoveKey::Right,
    ];
}

/// Set of movement keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(BTreeSet<MoveKey>);

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.0.remove(&key);
    }

    pub fn contains(&self, key: MoveKey) -> bool {
        self.0.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MoveKey> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MoveKey> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = MoveKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
