use crate::config::Configuration;
use crate::error::{SelectionError, UpdateError};
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use async_trait::async_trait;
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Month in which the seasonal image becomes eligible.
const SEASONAL_MONTH: u32 = 12;

/// Picks a random eligible image from the source folder.
///
/// The seasonal image is excluded outside its month; the month comes from
/// the run context, not the ambient clock.
pub struct SelectImage {
    image_dir: PathBuf,
    seasonal_image: String,
    rng: StdRng,
}

impl SelectImage {
    pub fn new(image_dir: PathBuf, seasonal_image: String) -> Self {
        Self {
            image_dir,
            seasonal_image,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(
            configuration.image_dir.clone(),
            configuration.seasonal_image.clone(),
        )
    }

    // Replaces the selection RNG with a fixed seed, this makes picks reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Lists eligible file names, sorted so a fixed seed yields a stable pick.
    fn candidates(&self, month: u32) -> Result<Vec<String>, SelectionError> {
        if !self.image_dir.is_dir() {
            return Err(SelectionError::FolderNotFound(self.image_dir.clone()));
        }

        let entries = fs::read_dir(&self.image_dir)
            .map_err(|e| SelectionError::ReadFolder(e, self.image_dir.clone()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| SelectionError::ReadFolder(e, self.image_dir.clone()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !has_image_extension(&name) {
                continue;
            }
            if name.eq_ignore_ascii_case(&self.seasonal_image) && month != SEASONAL_MONTH {
                continue;
            }
            names.push(name);
        }

        if names.is_empty() {
            return Err(SelectionError::NoCandidates(self.image_dir.clone()));
        }

        names.sort();
        Ok(names)
    }
}

fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl PipelineStep for SelectImage {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        let candidates = self.candidates(context.started_at.month())?;
        tracing::info!("Found {} available images", candidates.len());

        let chosen = candidates
            .choose(&mut self.rng)
            .ok_or_else(|| SelectionError::NoCandidates(self.image_dir.clone()))?;
        tracing::info!("Selected image: {}", chosen);

        context.selected_image = Some(self.image_dir.join(chosen));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SelectImage"
    }
}
