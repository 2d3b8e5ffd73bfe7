use crate::error::UpdateError;
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration with overridable defaults.
///
/// Values are resolved in order: built-in defaults, an optional
/// `profile-updater.toml` next to the working directory, then
/// `PROFILE_UPDATER_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub image_dir: PathBuf,
    pub output_image: PathBuf,
    pub document_path: PathBuf,
    pub swatch_dir: PathBuf,
    pub swatch_base_url: String,
    pub palette_size: usize,
    pub swatch_width: u32,
    pub swatch_height: u32,
    pub image_alt: String,
    pub image_width: u32,
    pub seasonal_image: String,
    pub kmeans_seed: u64,
    pub kmeans_trials: u32,
    pub prune_stale_swatches: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("Waifu"),
            output_image: PathBuf::from("cropped.jpg"),
            document_path: PathBuf::from("README.md"),
            swatch_dir: PathBuf::from("img"),
            swatch_base_url:
                "https://raw.githubusercontent.com/TryKatChup/TryKatChup/main/img".to_string(),
            palette_size: 5,
            swatch_width: 25,
            swatch_height: 20,
            image_alt: "Unfortunately I didn't find the author of the pic, \
                        feel to open a pull request if found"
                .to_string(),
            image_width: 320,
            seasonal_image: "padoru.png".to_string(),
            kmeans_seed: 42,
            kmeans_trials: 10,
            prune_stale_swatches: true,
        }
    }
}

impl Configuration {
    /// Loads the layered configuration from file and environment sources.
    pub fn load() -> Result<Self, UpdateError> {
        let sources = config::Config::builder()
            .add_source(config::File::with_name("profile-updater").required(false))
            .add_source(config::Environment::with_prefix("PROFILE_UPDATER").try_parsing(true))
            .build()
            .map_err(|e| UpdateError::Configuration(e.to_string()))?;
        sources
            .try_deserialize()
            .map_err(|e| UpdateError::Configuration(e.to_string()))
    }

    // Sets the source image folder, this will override the default configuration.
    pub fn with_image_dir(mut self, image_dir: PathBuf) -> Self {
        self.image_dir = image_dir;
        self
    }

    // Sets the output image path, this will override the default configuration.
    pub fn with_output_image(mut self, output_image: PathBuf) -> Self {
        self.output_image = output_image;
        self
    }

    // Sets the document path, this will override the default configuration.
    pub fn with_document_path(mut self, document_path: PathBuf) -> Self {
        self.document_path = document_path;
        self
    }

    // Sets the swatch output folder, this will override the default configuration.
    pub fn with_swatch_dir(mut self, swatch_dir: PathBuf) -> Self {
        self.swatch_dir = swatch_dir;
        self
    }

    // Sets the number of palette colors, this will override the default configuration.
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    // Enables or disables stale swatch pruning, this will override the default configuration.
    pub fn with_prune_stale_swatches(mut self, prune_stale_swatches: bool) -> Self {
        self.prune_stale_swatches = prune_stale_swatches;
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.palette_size == 0 {
            return Err("Palette size must be greater than 0".to_string());
        }

        if self.swatch_width == 0 || self.swatch_height == 0 {
            return Err("Swatch dimensions must be greater than 0".to_string());
        }

        if self.kmeans_trials == 0 {
            return Err("At least one clustering trial must be run".to_string());
        }

        if self.image_dir.as_os_str().is_empty()
            || self.swatch_dir.as_os_str().is_empty()
            || self.document_path.as_os_str().is_empty()
        {
            return Err("Paths must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn zero_palette_size_is_rejected() {
        let configuration = Configuration::default().with_palette_size(0);
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn builder_overrides_apply() {
        let configuration = Configuration::default()
            .with_image_dir(PathBuf::from("pictures"))
            .with_palette_size(8)
            .with_prune_stale_swatches(false);
        assert_eq!(configuration.image_dir, PathBuf::from("pictures"));
        assert_eq!(configuration.palette_size, 8);
        assert!(!configuration.prune_stale_swatches);
    }
}
