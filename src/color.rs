use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Traverse order palette
// ---------------------------------------------------------------------------

/// Hue at the first point of the traverse (blue).
const START_HUE: f32 = 220.0;
/// Hue at the last point of the traverse (red).
const END_HUE: f32 = 0.0;

/// One colour per point, ramping from blue to red in file order so the
/// direction of the traverse reads off the plot.
pub fn sequence_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![hsl_to_color32(START_HUE)],
        _ => (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                hsl_to_color32(START_HUE + (END_HUE - START_HUE) * t)
            })
            .collect(),
    }
}

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_length() {
        assert!(sequence_palette(0).is_empty());
        assert_eq!(sequence_palette(1).len(), 1);
        assert_eq!(sequence_palette(7).len(), 7);
    }

    #[test]
    fn test_palette_runs_blue_to_red() {
        let colors = sequence_palette(5);
        let first = colors[0];
        let last = colors[4];
        assert!(first.b() > first.r(), "first = {first:?}");
        assert!(last.r() > last.b(), "last = {last:?}");
    }
}
