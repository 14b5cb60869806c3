use std::path::Path;

use anyhow::{anyhow, Result};
use eframe::egui;

use crate::data::model::TraverseSet;
use crate::session::Visualizer;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TraverseViewerApp {
    pub state: ViewerState,
}

impl TraverseViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for TraverseViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: extents, pair picker, points ----
        egui::SidePanel::left("traverse_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::traverse_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(state: ViewerState) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Traverse Panda – Traverse Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(TraverseViewerApp::new(state)))),
    )
}

// ---------------------------------------------------------------------------
// Window-backed visualizer for the command line
// ---------------------------------------------------------------------------

/// Shows the traverse in the viewer window.
pub struct WindowVisualizer;

impl Visualizer for WindowVisualizer {
    fn show(&mut self, points: &TraverseSet, source: &Path) -> Result<()> {
        if points.is_empty() {
            println!("No data to visualize.");
            return Ok(());
        }

        let mut state = ViewerState::default();
        state.set_dataset(points.clone(), source.to_path_buf());
        run_viewer(state).map_err(|e| anyhow!("viewer window failed: {e}"))
    }
}
