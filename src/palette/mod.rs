mod color;
mod kmeans;

pub use color::{HexColor, ParseHexColorError};
pub use kmeans::KmeansParams;

use crate::error::PaletteError;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

/// Edge length of the downsampled image fed to the clustering pass.
const SAMPLE_SIZE: u32 = 150;

/// Extracts a small set of representative colors from an image.
pub struct PaletteExtractor {
    sample_size: u32,
    params: KmeansParams,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            params: KmeansParams::default(),
        }
    }
}

impl PaletteExtractor {
    pub fn new(palette_size: usize, seed: u64, trials: u32) -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            params: KmeansParams {
                clusters: palette_size,
                trials,
                seed,
                ..KmeansParams::default()
            },
        }
    }

    pub fn extract_from_path(&self, path: &Path) -> Result<Vec<HexColor>, PaletteError> {
        let image =
            image::open(path).map_err(|e| PaletteError::Decode(e, path.to_path_buf()))?;
        self.extract(&image)
    }

    /// Clusters the downsampled RGB pixels and returns the cluster centers
    /// in the order the clustering yields them.
    pub fn extract(&self, image: &DynamicImage) -> Result<Vec<HexColor>, PaletteError> {
        let sample = image
            .resize_exact(self.sample_size, self.sample_size, FilterType::Triangle)
            .to_rgb8();
        let pixels: Vec<[u8; 3]> = sample.pixels().map(|pixel| pixel.0).collect();
        if pixels.is_empty() {
            return Err(PaletteError::EmptyImage);
        }

        let centroids = kmeans::run(&pixels, &self.params);
        Ok(centroids.into_iter().map(HexColor::from_channels).collect())
    }
}
