use crate::config::Configuration;
use crate::error::{SwatchError, UpdateError};
use crate::palette::HexColor;
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use async_trait::async_trait;
use image::RgbImage;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Writes one solid-color swatch image per palette color.
pub struct RenderSwatches {
    swatch_dir: PathBuf,
    width: u32,
    height: u32,
    prune_stale: bool,
}

impl RenderSwatches {
    pub fn new(swatch_dir: PathBuf, width: u32, height: u32, prune_stale: bool) -> Self {
        Self {
            swatch_dir,
            width,
            height,
            prune_stale,
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(
            configuration.swatch_dir.clone(),
            configuration.swatch_width,
            configuration.swatch_height,
            configuration.prune_stale_swatches,
        )
    }

    fn render(&self, color: &HexColor) -> Result<PathBuf, SwatchError> {
        fs::create_dir_all(&self.swatch_dir)
            .map_err(|e| SwatchError::CreateFolder(e, self.swatch_dir.clone()))?;

        let path = self.swatch_dir.join(format!("{}.png", color.hex_digits()));
        let swatch = RgbImage::from_pixel(self.width, self.height, color.rgb());
        swatch
            .save(&path)
            .map_err(|e| SwatchError::Write(e, path.clone()))?;
        Ok(path)
    }

    /// Deletes swatch-shaped files that no current palette color references.
    fn prune(&self, palette: &[HexColor]) -> Result<usize, SwatchError> {
        let keep: HashSet<String> = palette
            .iter()
            .map(|color| format!("{}.png", color.hex_digits()))
            .collect();

        let entries = fs::read_dir(&self.swatch_dir)
            .map_err(|e| SwatchError::Prune(e, self.swatch_dir.clone()))?;

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| SwatchError::Prune(e, self.swatch_dir.clone()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if keep.contains(&name) || !is_swatch_name(&name) {
                continue;
            }
            fs::remove_file(entry.path()).map_err(|e| SwatchError::Prune(e, entry.path()))?;
            removed += 1;
        }
        Ok(removed)
    }
}

/// Swatch files are named by exactly six lowercase hex digits.
fn is_swatch_name(name: &str) -> bool {
    name.strip_suffix(".png")
        .and_then(|stem| {
            stem.parse::<HexColor>()
                .ok()
                .map(|color| color.hex_digits() == stem)
        })
        .unwrap_or(false)
}

#[async_trait]
impl PipelineStep for RenderSwatches {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        if context.palette.is_empty() {
            return Err(UpdateError::Pipeline(
                "No palette has been extracted".to_string(),
            ));
        }

        for color in &context.palette {
            let path = self.render(color)?;
            context.swatch_files.push(path);
        }

        if self.prune_stale {
            let removed = self.prune(&context.palette)?;
            if removed > 0 {
                tracing::info!("Pruned {} stale swatches", removed);
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "RenderSwatches"
    }
}
