pub mod config;
pub mod document;
pub mod error;
pub mod palette;
pub mod pipeline;

pub use config::Configuration;
pub use error::{
    DocumentError, MaterializeError, PaletteError, SelectionError, SwatchError, UpdateError,
};
pub use pipeline::{RunContext, UpdatePipeline};
