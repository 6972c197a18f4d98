use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: genre → Color32
// ---------------------------------------------------------------------------

/// Maps genre labels to distinct colours, stable across filter changes.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build the mapping from every genre in the dataset.
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Gradient: numeric value → Color32
// ---------------------------------------------------------------------------

/// Continuous cyan → magenta scale over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub min: f64,
    pub max: f64,
}

impl Gradient {
    const START_HUE: f32 = 180.0;
    const END_HUE: f32 = 300.0;
    pub const MISSING: Color32 = Color32::GRAY;

    /// Span the observed values; `None` when there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc: Option<Gradient>, v| {
            Some(match acc {
                None => Gradient { min: v, max: v },
                Some(g) => Gradient {
                    min: g.min.min(v),
                    max: g.max.max(v),
                },
            })
        })
    }

    /// Position of `value` on the scale, clamped to `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: Option<f64>) -> Color32 {
        match value {
            Some(v) => {
                let t = self.fraction(v);
                hsl_to_color32(
                    Self::START_HUE + t * (Self::END_HUE - Self::START_HUE),
                    1.0,
                    0.5,
                )
            }
            None => Self::MISSING,
        }
    }

    /// `steps` evenly spaced (label, colour) pairs for a legend.
    pub fn legend_entries(&self, steps: usize) -> Vec<(String, Color32)> {
        if steps < 2 {
            return vec![(format!("{:.1}", self.min), self.color_for(Some(self.min)))];
        }
        (0..steps)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (steps - 1) as f64;
                (format!("{v:.1}"), self.color_for(Some(v)))
            })
            .collect()
    }
}
