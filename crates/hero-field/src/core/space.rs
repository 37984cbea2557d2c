use glam::Vec2;

/// Where the pointer is parked while it is not over the surface.
pub const POINTER_SENTINEL: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Surface geometry and pointer state.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSpace {
    pub width: f32,
    pub height: f32,
    /// Inset of the placement safe zone.
    pub border_padding: f32,
    /// Pointer position in surface pixels, or [`POINTER_SENTINEL`].
    pub pointer: Vec2,
    pub pointer_inside: bool,
}

impl SimulationSpace {
    pub fn new(width: f32, height: f32, border_padding: f32) -> Self {
        Self {
            width,
            height,
            border_padding,
            pointer: POINTER_SENTINEL,
            pointer_inside: false,
        }
    }

    /// Safe-zone corners (min, max) for placement.
    pub fn safe_zone(&self) -> (Vec2, Vec2) {
        let pad = self.border_padding;
        (Vec2::splat(pad), Vec2::new(self.width - pad, self.height - pad))
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.pointer_inside = true;
    }

    pub fn pointer_entered(&mut self) {
        self.pointer_inside = true;
    }

    pub fn pointer_left(&mut self) {
        self.pointer = POINTER_SENTINEL;
        self.pointer_inside = false;
    }

    /// Pointer position while it is over the surface.
    pub fn active_pointer(&self) -> Option<Vec2> {
        self.pointer_inside.then_some(self.pointer)
    }

    pub fn same_size(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }
}
