use serde::{Deserialize, Serialize};
use crate::api::error::ManifestError;
use crate::api::types::{IconKind, IconSet};

const PENCIL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M12 19l7-7 3 3-7 7-3-3z"/><path d="M18 13l-1.5-7.5L2 2l3.5 14.5L13 18l5-5z"/><path d="M2 2l7.586 7.586"/><circle cx="11" cy="11" r="2"/></svg>"#;
const SCISSORS_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="6" cy="6" r="3"/><circle cx="6" cy="18" r="3"/><line x1="20" y1="4" x2="8.12" y2="15.88"/><line x1="14.47" y1="14.48" x2="20" y2="20"/><line x1="8.12" y1="8.12" x2="12" y2="12"/></svg>"#;
const TIMELINE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M3 6h18M3 12h18M3 18h18"/><circle cx="16" cy="6" r="2" fill="currentColor"/><circle cx="8" cy="12" r="2" fill="currentColor"/><circle cx="12" cy="18" r="2" fill="currentColor"/></svg>"#;
const CAMERA_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M15 10l4.553-2.276A1 1 0 0121 8.618v6.764a1 1 0 01-1.447.894L15 14v-4z"/><rect x="3" y="6" width="12" height="12" rx="2" ry="2"/></svg>"#;

/// Ordered icon set. The position of an icon is its [`IconKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconManifest {
    pub icons: Vec<IconDescriptor>,
}

/// One icon: SVG markup drawn with `currentColor`, tinted at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconDescriptor {
    /// Human-readable name (e.g., "scissors").
    pub name: String,
    /// SVG source.
    pub svg: String,
    /// Whether particles with this icon cut links (first flagged icon wins).
    #[serde(default)]
    pub cutting: bool,
}

impl IconManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: IconManifest = serde_json::from_str(json)?;
        manifest.icon_set()?;
        Ok(manifest)
    }

    /// The four built-in line icons: pencil, scissors, timeline, camera.
    pub fn builtin() -> Self {
        let icon = |name: &str, svg: &str, cutting: bool| IconDescriptor {
            name: name.to_string(),
            svg: svg.to_string(),
            cutting,
        };
        Self {
            icons: vec![
                icon("pencil", PENCIL_SVG, false),
                icon("scissors", SCISSORS_SVG, true),
                icon("timeline", TIMELINE_SVG, false),
                icon("camera", CAMERA_SVG, false),
            ],
        }
    }

    /// Icon kinds available to the simulation.
    pub fn icon_set(&self) -> Result<IconSet, ManifestError> {
        let count = self.icons.len();
        if count == 0 {
            return Err(ManifestError::Empty);
        }
        if count > u8::MAX as usize {
            return Err(ManifestError::TooMany(count));
        }
        let cutting = self
            .icons
            .iter()
            .position(|icon| icon.cutting)
            .map(|i| IconKind(i as u8));
        Ok(IconSet::new(count as u8, cutting))
    }

    /// SVG markup for `kind` with `currentColor` replaced by `color`.
    pub fn tinted_svg(&self, kind: IconKind, color: &str) -> Option<String> {
        self.icons
            .get(kind.0 as usize)
            .map(|icon| icon.svg.replace("currentColor", color))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl Default for IconManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_default_icon_set() {
        let manifest = IconManifest::builtin();
        assert_eq!(manifest.icon_set().unwrap(), IconSet::default());
    }

    #[test]
    fn parse_manifest_with_cutting_flag() {
        let json = r#"{
            "icons": [
                { "name": "dot", "svg": "<svg/>" },
                { "name": "blade", "svg": "<svg/>", "cutting": true }
            ]
        }"#;
        let manifest = IconManifest::from_json(json).unwrap();
        let set = manifest.icon_set().unwrap();
        assert_eq!(set.count(), 2);
        assert_eq!(set.cutting(), Some(IconKind(1)));
    }

    #[test]
    fn empty_manifest_rejected() {
        let err = IconManifest::from_json(r#"{ "icons": [] }"#).unwrap_err();
        assert!(matches!(err, ManifestError::Empty));
    }

    #[test]
    fn tint_replaces_current_color() {
        let manifest = IconManifest::builtin();
        let svg = manifest.tinted_svg(IconKind(2), "#FFFFFF").unwrap();
        assert!(!svg.contains("currentColor"));
        assert!(svg.contains("fill=\"#FFFFFF\""));
        assert!(manifest.tinted_svg(IconKind(9), "#FFFFFF").is_none());
    }
}
