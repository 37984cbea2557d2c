/// Stable identifier for a particle. Survives respawn-in-place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// Identifier for an explosion effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplosionId(pub u32);

/// Index into the ordered icon set (0 = first icon in the manifest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IconKind(pub u8);

/// The icon kinds available to a simulation, and which of them may cut links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    count: u8,
    cutting: Option<IconKind>,
}

impl IconSet {
    /// An icon set with `count` kinds (at least one). `cutting` is ignored if out of range.
    pub fn new(count: u8, cutting: Option<IconKind>) -> Self {
        let count = count.max(1);
        Self {
            count,
            cutting: cutting.filter(|k| k.0 < count),
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// The kind that initiates cuts, if any.
    pub fn cutting(&self) -> Option<IconKind> {
        self.cutting
    }

    pub fn is_cutting(&self, kind: IconKind) -> bool {
        self.cutting == Some(kind)
    }

    /// Kind for slot `i` when distributing round-robin.
    pub fn round_robin(&self, i: usize) -> IconKind {
        IconKind((i % self.count as usize) as u8)
    }
}

impl Default for IconSet {
    /// The four built-in icons; the second (scissors) cuts.
    fn default() -> Self {
        Self::new(4, Some(IconKind(1)))
    }
}
