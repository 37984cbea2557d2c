use crate::api::types::ParticleId;

/// Pending post-explosion respawns, keyed by particle id.
///
/// Entries are plain data, so tearing the simulation down discards them with
/// nothing left to fire against freed state.
#[derive(Debug, Default)]
pub struct RespawnSchedule {
    /// (id, due time in ms), at most one entry per id.
    pending: Vec<(ParticleId, f64)>,
}

impl RespawnSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) a respawn for `id` at `due_ms`.
    pub fn schedule(&mut self, id: ParticleId, due_ms: f64) {
        self.cancel(id);
        self.pending.push((id, due_ms));
    }

    /// Drop the pending respawn for `id`. Returns whether one existed.
    pub fn cancel(&mut self, id: ParticleId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.len() != before
    }

    /// Remove and return every id due at `now_ms`, in due order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ParticleId> {
        let mut due: Vec<(ParticleId, f64)> = Vec::new();
        self.pending.retain(|&(id, at)| {
            if at <= now_ms {
                due.push((id, at));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub fn is_pending(&self, id: ParticleId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
