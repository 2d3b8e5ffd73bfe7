use std::path::PathBuf;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Selection Error: {0}")]
    Selection(#[from] SelectionError),
    #[error("Materialize Error: {0}")]
    Materialize(#[from] MaterializeError),
    #[error("Palette Error: {0}")]
    Palette(#[from] PaletteError),
    #[error("Swatch Error: {0}")]
    Swatch(#[from] SwatchError),
    #[error("Document Error: {0}")]
    Document(#[from] DocumentError),
    #[error("Configuration Error: {0}")]
    Configuration(String),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
}

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Image folder not found at {}", .0.display())]
    FolderNotFound(PathBuf),
    #[error("Failed to read image folder {}: {}", .1.display(), .0)]
    ReadFolder(std::io::Error, PathBuf),
    #[error("No eligible images found in {}", .0.display())]
    NoCandidates(PathBuf),
}

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Failed to decode {}: {}", .1.display(), .0)]
    Decode(image::ImageError, PathBuf),
    #[error("Failed to copy {}: {}", .1.display(), .0)]
    Copy(std::io::Error, PathBuf),
    #[error("Failed to encode output image {}: {}", .1.display(), .0)]
    Encode(image::ImageError, PathBuf),
}

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to decode {}: {}", .1.display(), .0)]
    Decode(image::ImageError, PathBuf),
    #[error("The image has no pixels to cluster")]
    EmptyImage,
}

#[derive(Error, Debug)]
pub enum SwatchError {
    #[error("Failed to create swatch folder {}: {}", .1.display(), .0)]
    CreateFolder(std::io::Error, PathBuf),
    #[error("Failed to write swatch {}: {}", .1.display(), .0)]
    Write(image::ImageError, PathBuf),
    #[error("Failed to prune swatch {}: {}", .1.display(), .0)]
    Prune(std::io::Error, PathBuf),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Document not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read document {}: {}", .1.display(), .0)]
    Read(std::io::Error, PathBuf),
    #[error("Failed to write document {}: {}", .1.display(), .0)]
    Write(std::io::Error, PathBuf),
    #[error("No line containing {0:?} found in the document")]
    MarkerNotFound(String),
    #[error("Block opened at line {0} is never closed")]
    UnclosedBlock(usize),
}
