use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Species → Color32
// ---------------------------------------------------------------------------

/// Maps each species to a distinct colour.
#[derive(Debug, Clone, Default)]
pub struct SpeciesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SpeciesColors {
    /// Assign colours in sorted species order so the mapping is stable
    /// across reloads of the same data.
    pub fn new(species: &BTreeSet<String>) -> Self {
        let mapping = species
            .iter()
            .cloned()
            .zip(generate_palette(species.len()))
            .collect();
        SpeciesColors { mapping }
    }

    pub fn color_for(&self, species: &str) -> Color32 {
        self.mapping.get(species).copied().unwrap_or(Color32::GRAY)
    }

    /// Legend entries (species → colour) in display order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, Color32)> + '_ {
        self.mapping.iter().map(|(s, c)| (s.as_str(), *c))
    }
}
