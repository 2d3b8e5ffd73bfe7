use crate::config::Configuration;
use crate::error::{MaterializeError, UpdateError};
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use async_trait::async_trait;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions that are copied through byte-for-byte without re-encoding.
const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Produces the fixed-path JPEG output from the selected source image.
pub struct MaterializeImage {
    output_image: PathBuf,
}

impl MaterializeImage {
    pub fn new(output_image: PathBuf) -> Self {
        Self { output_image }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(configuration.output_image.clone())
    }

    fn materialize(&self, source: &Path) -> Result<(), MaterializeError> {
        if is_jpeg(source) {
            fs::copy(source, &self.output_image)
                .map_err(|e| MaterializeError::Copy(e, source.to_path_buf()))?;
            return Ok(());
        }

        // Forcing RGB drops alpha and palette modes before JPEG encoding.
        let image = image::open(source)
            .map_err(|e| MaterializeError::Decode(e, source.to_path_buf()))?;
        image
            .to_rgb8()
            .save_with_format(&self.output_image, ImageFormat::Jpeg)
            .map_err(|e| MaterializeError::Encode(e, self.output_image.clone()))?;
        Ok(())
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JPEG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl PipelineStep for MaterializeImage {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        let source = context.selected_image()?.to_path_buf();
        self.materialize(&source)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MaterializeImage"
    }
}
