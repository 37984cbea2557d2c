use serde::{Deserialize, Serialize};
use crate::api::error::ConfigError;
use crate::renderer::frame::Color;

/// Every tunable of the simulation, each with a documented default.
/// Deserialized from a flat JSON object; omitted keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// DOM id given to the created canvas (default: "editor-background").
    pub selector: String,
    /// CSS selector of the host container (default: ".hero").
    pub host_selector: String,
    /// Number of particles placed on populate (default: 15).
    pub max_particles: usize,
    /// Palette: primary, accent, line/icon tint (default: teal, mint, white).
    pub colors: Vec<String>,
    /// Smallest particle diameter (default: 15).
    pub min_size: f32,
    /// Largest particle diameter (default: 30).
    pub max_size: f32,
    /// Re-populate when the surface size changes (default: true).
    pub responsive: bool,
    /// Draw dashed links between nearby particles (default: true).
    pub connect_particles: bool,
    /// Maximum link length; also the cutting scan radius (default: 180).
    pub connection_distance: f32,
    /// Gap added to particle sizes for spacing and repulsion (default: 50).
    pub min_distance_between_particles: f32,
    /// Base inter-particle repulsion strength (default: 0.07).
    pub repulsion_strength: f32,
    /// Inset of the placement safe zone; edge band is 1.5x this (default: 80).
    pub border_padding: f32,
    /// Dash length of links (default: 5).
    pub dash_length: f32,
    /// Gap between dashes (default: 3).
    pub dash_gap: f32,
    /// Link stroke width (default: 1.5).
    pub line_width: f32,
    /// Link opacity at zero distance (default: 0.8).
    pub line_opacity: f32,
    /// Pointer repulsion radius (default: 100).
    pub mouse_repulsion_radius: f32,
    /// Pointer repulsion strength (default: 0.4).
    pub mouse_repulsion_strength: f32,
    /// Extra spacing and repulsion between same-icon particles (default: 3.5).
    pub same_icon_repulsion_multiplier: f32,
    /// Accumulated frames of pursuit before an explosion (default: 60).
    pub pursuit_time_threshold: f32,
    /// Pointer distance that counts as pursuit (default: 70).
    pub pursuit_distance_threshold: f32,
    /// Explosion lifetime in frames (default: 30).
    pub explosion_duration: f32,
    /// Sparks per explosion (default: 10).
    pub explosion_particles: usize,
    /// Edge band push strength (default: 0.05).
    pub corner_avoidance_strength: f32,
    /// Slowest cruising speed (default: 0.02).
    pub min_base_speed: f32,
    /// Fastest cruising speed (default: 0.12).
    pub max_base_speed: f32,
    /// Odds a particle gets an extreme (slow or fast) cruising speed (default: 0.5).
    pub speed_variation_probability: f32,
    /// Hard speed cap after forces (default: 2.5).
    pub max_speed: f32,
    /// Soft floor for nonzero speeds (default: 0.01).
    pub min_speed: f32,
    /// Per-frame velocity damping factor (default: 0.96).
    pub drag: f32,
    /// Largest frame delta in nominal frames (default: 3).
    pub max_delta_frames: f32,
    /// Delay between explosion and respawn (default: 800 ms).
    pub respawn_delay_ms: f64,
    /// Per-frame odds an idle cutter tries to cut (default: 0.01).
    pub cut_chance: f32,
    /// Per-neighbor odds of being chosen as the cut target (default: 0.2).
    pub cut_target_chance: f32,
    /// Cut progress per frame (default: 0.01).
    pub cut_speed: f32,
    /// Frames before a cutter may cut again (default: 100).
    pub cut_cooldown: f32,
    /// Icon opacity (default: 0.7).
    pub particle_alpha: f32,
    /// RNG seed; the host picks one when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            selector: "editor-background".to_string(),
            host_selector: ".hero".to_string(),
            max_particles: 15,
            colors: vec![
                "#1E9B8A".to_string(),
                "#2AE6B2".to_string(),
                "#FFFFFF".to_string(),
            ],
            min_size: 15.0,
            max_size: 30.0,
            responsive: true,
            connect_particles: true,
            connection_distance: 180.0,
            min_distance_between_particles: 50.0,
            repulsion_strength: 0.07,
            border_padding: 80.0,
            dash_length: 5.0,
            dash_gap: 3.0,
            line_width: 1.5,
            line_opacity: 0.8,
            mouse_repulsion_radius: 100.0,
            mouse_repulsion_strength: 0.4,
            same_icon_repulsion_multiplier: 3.5,
            pursuit_time_threshold: 60.0,
            pursuit_distance_threshold: 70.0,
            explosion_duration: 30.0,
            explosion_particles: 10,
            corner_avoidance_strength: 0.05,
            min_base_speed: 0.02,
            max_base_speed: 0.12,
            speed_variation_probability: 0.5,
            max_speed: 2.5,
            min_speed: 0.01,
            drag: 0.96,
            max_delta_frames: 3.0,
            respawn_delay_ms: 800.0,
            cut_chance: 0.01,
            cut_target_chance: 0.2,
            cut_speed: 0.01,
            cut_cooldown: 100.0,
            particle_alpha: 0.7,
            seed: None,
        }
    }
}

/// Resolved palette colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Placeholder squares for missing icons.
    pub primary: Color,
    /// Cut markers and explosion sparks.
    pub accent: Color,
    /// Links and icon tint.
    pub line: Color,
}

impl FieldConfig {
    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Check invariants, normalizing what can be normalized.
    /// Swapped size or speed ranges are reordered; unusable values are errors.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.min_size > self.max_size {
            std::mem::swap(&mut self.min_size, &mut self.max_size);
        }
        if self.min_base_speed > self.max_base_speed {
            std::mem::swap(&mut self.min_base_speed, &mut self.max_base_speed);
        }
        let positive = [
            ("minSize", self.min_size),
            ("connectionDistance", self.connection_distance),
            ("mouseRepulsionRadius", self.mouse_repulsion_radius),
            ("sameIconRepulsionMultiplier", self.same_icon_repulsion_multiplier),
            ("explosionDuration", self.explosion_duration),
            ("maxSpeed", self.max_speed),
            ("maxDeltaFrames", self.max_delta_frames),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be > 0 (got {})", name, value)));
            }
        }
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(ConfigError::Invalid(format!("drag must be in [0, 1] (got {})", self.drag)));
        }
        if !(0.0..=self.max_speed).contains(&self.min_speed) {
            return Err(ConfigError::Invalid(format!(
                "minSpeed must be in [0, maxSpeed] (got {} with maxSpeed {})",
                self.min_speed, self.max_speed
            )));
        }
        if self.border_padding < 0.0 {
            return Err(ConfigError::Invalid("borderPadding must be >= 0".to_string()));
        }
        for color in &self.colors {
            if Color::from_hex(color).is_none() {
                return Err(ConfigError::Invalid(format!("unrecognized color '{}'", color)));
            }
        }
        Ok(self)
    }

    /// Palette slots, falling back to the defaults for missing entries.
    pub fn palette(&self) -> Palette {
        let pick = |i: usize, fallback: Color| {
            self.colors
                .get(i)
                .and_then(|c| Color::from_hex(c))
                .unwrap_or(fallback)
        };
        Palette {
            primary: pick(0, Color::rgb(0x1E, 0x9B, 0x8A)),
            accent: pick(1, Color::rgb(0x2A, 0xE6, 0xB2)),
            line: pick(2, Color::WHITE),
        }
    }
}
