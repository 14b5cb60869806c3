use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::load_file;
use crate::geometry::{format_bearing, AngleStyle};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – extents, pair picker, point list
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Traverse");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No traverse loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let ids: Vec<i64> = dataset.iter().map(|p| p.id).collect();
    let points = dataset.points().to_vec();

    if let Some(ext) = &state.extents {
        egui::Grid::new("extents_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                ui.label("Points");
                ui.label(ext.count.to_string());
                ui.end_row();
                ui.label("Easting");
                ui.label(format!("{:.3} – {:.3}", ext.min_easting, ext.max_easting));
                ui.end_row();
                ui.label("Northing");
                ui.label(format!("{:.3} – {:.3}", ext.min_northing, ext.max_northing));
                ui.end_row();
            });
    }
    ui.separator();

    // ---- Distance / bearing picker ----
    ui.strong("Distance & bearing");
    let from_text = state.from_id.map(|id| id.to_string()).unwrap_or_default();
    egui::ComboBox::from_label("From")
        .selected_text(from_text)
        .show_ui(ui, |ui: &mut Ui| {
            for &id in &ids {
                if ui
                    .selectable_label(state.from_id == Some(id), id.to_string())
                    .clicked()
                {
                    state.select_from(id);
                }
            }
        });
    let to_text = state.to_id.map(|id| id.to_string()).unwrap_or_default();
    egui::ComboBox::from_label("To")
        .selected_text(to_text)
        .show_ui(ui, |ui: &mut Ui| {
            for &id in &ids {
                if ui
                    .selectable_label(state.to_id == Some(id), id.to_string())
                    .clicked()
                {
                    state.select_to(id);
                }
            }
        });

    match &state.measurement {
        Some(Ok(m)) => {
            ui.label(format!("Distance: {:.3}", m.distance));
            ui.label(format!(
                "Bearing: {}",
                format_bearing(m.bearing, state.angle_style)
            ));
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        None => {
            ui.label("Pick two points.");
        }
    }
    ui.separator();

    // ---- Point list ----
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("point_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Point");
                    ui.strong("Easting");
                    ui.strong("Northing");
                    ui.end_row();

                    for (point, color) in points.iter().zip(&state.colors) {
                        ui.label(RichText::new(point.id.to_string()).color(*color));
                        ui.label(format!("{:.3}", point.easting));
                        ui.label(format!("{:.3}", point.northing));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(source)) = (&state.dataset, &state.source) {
            ui.label(format!("{} points from {}", ds.len(), source.display()));
        }

        ui.separator();

        if ui.selectable_label(state.show_labels, "Labels").clicked() {
            state.show_labels = !state.show_labels;
        }

        let dms = state.angle_style == AngleStyle::Dms;
        if ui.selectable_label(dms, "DMS").clicked() {
            state.angle_style = if dms {
                AngleStyle::Decimal
            } else {
                AngleStyle::Dms
            };
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Open traverse data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(loaded) => {
                let skipped = loaded.warnings.len();
                state.set_dataset(loaded.points, path);
                if skipped > 0 {
                    state.status_message = Some(format!("{skipped} malformed rows skipped"));
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
