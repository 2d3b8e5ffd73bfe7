use crate::config::Configuration;
use crate::document::Document;
use crate::error::UpdateError;
use crate::palette::HexColor;
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use async_trait::async_trait;
use std::path::PathBuf;

/// Opening marker of the swatch block.
const SWATCH_BLOCK_OPEN: &str = "<p align=\"center\">";
/// Closing marker of the swatch block.
const SWATCH_BLOCK_CLOSE: &str = "</p>";

/// Rewrites the image line and the swatch block of the profile document.
pub struct UpdateDocument {
    document_path: PathBuf,
    output_image: PathBuf,
    image_alt: String,
    image_width: u32,
    swatch_base_url: String,
    swatch_width: u32,
    swatch_height: u32,
}

impl UpdateDocument {
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self {
            document_path: configuration.document_path.clone(),
            output_image: configuration.output_image.clone(),
            image_alt: configuration.image_alt.clone(),
            image_width: configuration.image_width,
            swatch_base_url: configuration.swatch_base_url.clone(),
            swatch_width: configuration.swatch_width,
            swatch_height: configuration.swatch_height,
        }
    }

    /// The output file name as it appears in the document.
    fn output_name(&self) -> String {
        self.output_image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_image.to_string_lossy().into_owned())
    }

    /// The substring that locates the image line.
    fn image_marker(&self) -> String {
        format!("<img src=\"{}\"", self.output_name())
    }

    fn image_line(&self) -> String {
        format!(
            "<img src=\"{}\" alt=\"{}\" width=\"{}\" />",
            self.output_name(),
            self.image_alt,
            self.image_width
        )
    }

    /// One `<img>` reference per color, concatenated without separators.
    fn swatch_line(&self, palette: &[HexColor]) -> String {
        palette
            .iter()
            .map(|color| {
                format!(
                    "<img alt=\"{}\" src=\"{}/{}.png\" width=\"{}\" height=\"{}\" />",
                    color,
                    self.swatch_base_url,
                    color.hex_digits(),
                    self.swatch_width,
                    self.swatch_height
                )
            })
            .collect()
    }

    fn swatch_block(&self, palette: &[HexColor]) -> Vec<String> {
        vec![
            SWATCH_BLOCK_OPEN.to_string(),
            self.swatch_line(palette),
            SWATCH_BLOCK_CLOSE.to_string(),
        ]
    }
}

#[async_trait]
impl PipelineStep for UpdateDocument {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        if context.palette.is_empty() {
            return Err(UpdateError::Pipeline(
                "No palette has been extracted".to_string(),
            ));
        }

        let mut document = Document::load(&self.document_path)?;
        document.replace_line_containing(&self.image_marker(), &self.image_line())?;
        document.replace_block(
            SWATCH_BLOCK_OPEN,
            SWATCH_BLOCK_CLOSE,
            self.swatch_block(&context.palette),
        )?;
        document.save()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "UpdateDocument"
    }
}
