use crate::config::Configuration;
use crate::error::UpdateError;
use crate::palette::PaletteExtractor;
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use async_trait::async_trait;

/// Extracts the dominant-color palette from the selected source image.
pub struct ExtractPalette {
    extractor: PaletteExtractor,
}

impl ExtractPalette {
    pub fn new(extractor: PaletteExtractor) -> Self {
        Self { extractor }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(PaletteExtractor::new(
            configuration.palette_size,
            configuration.kmeans_seed,
            configuration.kmeans_trials,
        ))
    }
}

#[async_trait]
impl PipelineStep for ExtractPalette {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        let source = context.selected_image()?.to_path_buf();
        let palette = self.extractor.extract_from_path(&source)?;

        let listed: Vec<String> = palette.iter().map(ToString::to_string).collect();
        tracing::info!("Extracted colors: {}", listed.join(", "));

        context.palette = palette;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ExtractPalette"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[tokio::test]
    async fn palette_lands_in_the_context() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.png");
        RgbImage::from_pixel(32, 32, Rgb([200, 40, 10]))
            .save(&source)
            .unwrap();

        let mut context =
            RunContext::new(Local.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        context.selected_image = Some(source);

        let mut step = ExtractPalette::new(PaletteExtractor::new(3, 42, 10));
        step.process(&mut context).await.unwrap();

        assert_eq!(context.palette.len(), 3);
    }

    #[tokio::test]
    async fn missing_selection_fails_the_step() {
        let mut context =
            RunContext::new(Local.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        let mut step = ExtractPalette::new(PaletteExtractor::default());
        assert!(step.process(&mut context).await.is_err());
    }
}
