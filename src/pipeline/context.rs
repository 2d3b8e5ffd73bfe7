use crate::error::UpdateError;
use crate::palette::HexColor;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// State threaded through one update run.
///
/// The wall clock is read once by the caller and injected here, so the
/// seasonal selection rule never consults ambient time.
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Local>,
    pub selected_image: Option<PathBuf>,
    pub palette: Vec<HexColor>,
    pub swatch_files: Vec<PathBuf>,
}

impl RunContext {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            selected_image: None,
            palette: Vec::new(),
            swatch_files: Vec::new(),
        }
    }

    /// The source image chosen by the selection step.
    pub fn selected_image(&self) -> Result<&Path, UpdateError> {
        self.selected_image
            .as_deref()
            .ok_or_else(|| UpdateError::Pipeline("No image has been selected".to_string()))
    }
}
