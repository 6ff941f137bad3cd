// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer settings
//!
//! Persisted by the UI layer as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stb_lite_model::ElementKind;

use crate::{Result, ViewerError};

/// RGBA colour with components in `[0, 1]`
pub type Color = [f32; 4];

fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Display style of one element kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub color: Color,
    pub visible: bool,
}

impl CategoryStyle {
    fn shown(color: Color) -> Self {
        Self {
            color,
            visible: true,
        }
    }
}

/// Per-kind colours and visibility
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySettings {
    /// Colour of the selected element
    pub selection_color: Color,
    pub categories: BTreeMap<ElementKind, CategoryStyle>,
}

impl Default for CategorySettings {
    fn default() -> Self {
        let categories = [
            (ElementKind::Node, rgb(0, 0, 255)),
            (ElementKind::Column, rgb(255, 255, 0)),
            (ElementKind::Post, rgb(0, 128, 0)),
            (ElementKind::Girder, rgb(128, 0, 128)),
            (ElementKind::Beam, rgb(255, 192, 203)),
            (ElementKind::Brace, rgb(221, 160, 221)),
            (ElementKind::Slab, rgb(128, 128, 128)),
            (ElementKind::Wall, rgb(188, 143, 143)),
            (ElementKind::Parapet, rgb(25, 25, 112)),
            (ElementKind::FoundationColumn, rgb(173, 216, 230)),
            (ElementKind::Footing, rgb(250, 128, 114)),
            (ElementKind::StripFooting, rgb(0, 255, 255)),
            (ElementKind::Pile, rgb(238, 130, 238)),
        ]
        .into_iter()
        .map(|(kind, color)| (kind, CategoryStyle::shown(color)))
        .collect();

        Self {
            selection_color: rgb(255, 0, 0),
            categories,
        }
    }
}

impl CategorySettings {
    /// Style of a kind; kinds missing from the map are shown in white
    pub fn style(&self, kind: ElementKind) -> CategoryStyle {
        self.categories
            .get(&kind)
            .copied()
            .unwrap_or_else(|| CategoryStyle::shown([1.0; 4]))
    }

    /// Show or hide a kind
    pub fn set_visible(&mut self, kind: ElementKind, visible: bool) {
        let mut style = self.style(kind);
        style.visible = visible;
        self.categories.insert(kind, style);
    }
}

/// Pointer picking parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    pub enabled: bool,
    /// Hit distance for segments and points, in screen pixels
    pub pick_threshold: f32,
    /// Depth values at or below this are not a visible surface
    pub near_depth: f32,
    /// Depth values at or above this are not a visible surface
    pub far_depth: f32,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            pick_threshold: 10.0,
            near_depth: 0.00001,
            far_depth: 0.99999,
        }
    }
}

/// All persisted viewer settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub categories: CategorySettings,
    pub picking: PickingSettings,
}

impl ViewerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ViewerError::settings(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ViewerError::settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let settings = CategorySettings::default();
        assert_eq!(settings.selection_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(settings.style(ElementKind::Node).color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(settings.categories.len(), ElementKind::ALL.len());
        assert!(ElementKind::ALL
            .iter()
            .all(|kind| settings.style(*kind).visible));
    }

    #[test]
    fn test_json_round_trip_keeps_hidden_kind() {
        let mut settings = ViewerSettings::default();
        settings.categories.set_visible(ElementKind::Slab, false);
        settings.picking.pick_threshold = 6.0;

        let json = settings.to_json().unwrap();
        assert!(json.contains("\"Slab\""));
        let restored = ViewerSettings::from_json(&json).unwrap();
        assert_eq!(restored, settings);
        assert!(!restored.categories.style(ElementKind::Slab).visible);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = ViewerSettings::from_json(r#"{"picking":{"enabled":false}}"#).unwrap();
        assert!(!settings.picking.enabled);
        assert_eq!(settings.picking.pick_threshold, 10.0);
        assert_eq!(settings.categories, CategorySettings::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = ViewerSettings::from_json("{").unwrap_err();
        assert!(matches!(err, ViewerError::Settings(_)));
    }
}
