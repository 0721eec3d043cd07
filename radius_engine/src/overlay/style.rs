//! Visual styles for overlay elements.

use serde::{Deserialize, Serialize};

/// Fill and outline of the radius circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub outline_color: String,
}

/// Fill and halo of a single prediction marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub fill_color: String,
    pub halo_color: String,
    /// Suitable points get a wider halo so they stand out.
    pub halo_width: u8,
}

/// Colours the marker style is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPalette {
    pub suitable: String,
    pub unsuitable: String,
    pub halo: String,
}

impl MarkerPalette {
    pub fn style_for(&self, suitable: bool) -> MarkerStyle {
        if suitable {
            MarkerStyle {
                fill_color: self.suitable.clone(),
                halo_color: self.halo.clone(),
                halo_width: 3,
            }
        } else {
            MarkerStyle {
                fill_color: self.unsuitable.clone(),
                halo_color: self.halo.clone(),
                halo_width: 2,
            }
        }
    }
}

/// Popup content attached to a marker or anchored on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PopupContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Plain-text rendering, one line per row.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> MarkerPalette {
        MarkerPalette {
            suitable: "#22c55e".to_string(),
            unsuitable: "#ef4444".to_string(),
            halo: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_style_depends_only_on_suitability() {
        let palette = palette();
        assert_eq!(palette.style_for(true), palette.style_for(true));
        assert_eq!(palette.style_for(true).fill_color, "#22c55e");
        assert_eq!(palette.style_for(false).fill_color, "#ef4444");
        assert_ne!(palette.style_for(true).halo_width, palette.style_for(false).halo_width);
    }

    #[test]
    fn test_popup_text() {
        let popup = PopupContent::new("Market").line("Suitable").line("Confidence: 91%");
        assert_eq!(popup.text(), "Market\nSuitable\nConfidence: 91%");
    }
}
