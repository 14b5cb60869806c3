use std::path::PathBuf;

use eframe::egui::Color32;

use crate::color::sequence_palette;
use crate::data::extents::{extents, Extents};
use crate::data::model::TraverseSet;
use crate::geometry::{measure_pair, AngleStyle, Measurement, SurveyError};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    /// Loaded traverse (None until a file is loaded).
    pub dataset: Option<TraverseSet>,

    /// File the traverse came from.
    pub source: Option<PathBuf>,

    /// Extents of the loaded traverse (cached).
    pub extents: Option<Extents>,

    /// One colour per point, in file order.
    pub colors: Vec<Color32>,

    /// Point numbers picked for distance / bearing.
    pub from_id: Option<i64>,
    pub to_id: Option<i64>,

    /// Result for the picked pair.
    pub measurement: Option<Result<Measurement, SurveyError>>,

    /// Draw point numbers next to the markers.
    pub show_labels: bool,

    pub angle_style: AngleStyle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            extents: None,
            colors: Vec::new(),
            from_id: None,
            to_id: None,
            measurement: None,
            show_labels: true,
            angle_style: AngleStyle::Decimal,
            status_message: None,
        }
    }
}

impl ViewerState {
    /// Ingest a newly loaded traverse and reset the pair selection.
    pub fn set_dataset(&mut self, dataset: TraverseSet, source: PathBuf) {
        self.extents = extents(dataset.points());
        self.colors = sequence_palette(dataset.len());
        self.from_id = None;
        self.to_id = None;
        self.measurement = None;

        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status_message = None;
    }

    pub fn select_from(&mut self, id: i64) {
        self.from_id = Some(id);
        self.remeasure();
    }

    pub fn select_to(&mut self, id: i64) {
        self.to_id = Some(id);
        self.remeasure();
    }

    /// Recompute `measurement` after the pair selection changed.
    fn remeasure(&mut self) {
        self.measurement = match (&self.dataset, self.from_id, self.to_id) {
            (Some(ds), Some(from), Some(to)) => Some(measure_pair(ds, from, to)),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;

    fn loaded_state() -> ViewerState {
        let mut state = ViewerState::default();
        state.set_dataset(
            TraverseSet::from_points(vec![
                Point::new(1, 0.0, 0.0),
                Point::new(2, 10.0, 0.0),
                Point::new(3, 10.0, 10.0),
            ]),
            PathBuf::from("traverse_data.csv"),
        );
        state
    }

    #[test]
    fn test_set_dataset_caches_extents_and_colors() {
        let state = loaded_state();
        assert_eq!(state.colors.len(), 3);
        assert_eq!(state.extents.unwrap().max_northing, 10.0);
        assert!(state.measurement.is_none());
    }

    #[test]
    fn test_pair_selection_measures() {
        let mut state = loaded_state();
        state.select_from(1);
        assert!(state.measurement.is_none());

        state.select_to(2);
        let m = state.measurement.clone().unwrap().unwrap();
        assert_eq!(m.distance, 10.0);
        assert_eq!(m.bearing, Some(90.0));
    }

    #[test]
    fn test_new_dataset_clears_selection() {
        let mut state = loaded_state();
        state.select_from(1);
        state.select_to(3);
        state.set_dataset(TraverseSet::default(), PathBuf::from("other.csv"));

        assert_eq!(state.from_id, None);
        assert!(state.measurement.is_none());
        assert!(state.extents.is_none());
    }
}
