use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::geometry::lookup_pair;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Traverse plot (central panel)
// ---------------------------------------------------------------------------

/// Render the labelled scatter plot of the loaded traverse.
pub fn traverse_plot(ui: &mut Ui, state: &ViewerState) {
    let dataset = match &state.dataset {
        Some(ds) if !ds.is_empty() => ds,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No data to visualize.  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Traverse Visualization");
    });

    // The picked pair is drawn as a leg between the two markers.
    let leg = match (state.from_id, state.to_id) {
        (Some(from), Some(to)) => lookup_pair(dataset, from, to).ok(),
        _ => None,
    };

    Plot::new("traverse_plot")
        .x_axis_label("Easting")
        .y_axis_label("Northing")
        .data_aspect(1.0)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some((a, b)) = leg {
                let points: PlotPoints =
                    vec![[a.easting, a.northing], [b.easting, b.northing]].into();
                plot_ui.line(
                    Line::new(points)
                        .name(format!("{} → {}", a.id, b.id))
                        .color(Color32::YELLOW)
                        .width(2.0),
                );
            }

            for (point, color) in dataset.iter().zip(&state.colors) {
                plot_ui.points(
                    Points::new(vec![[point.easting, point.northing]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0)
                        .color(*color),
                );

                if state.show_labels {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(point.easting, point.northing),
                            RichText::new(format!("{}\n", point.id)).size(13.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}
