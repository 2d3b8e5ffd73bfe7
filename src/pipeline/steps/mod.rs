pub mod extract_palette;
pub mod materialize_image;
pub mod render_swatches;
pub mod select_image;
pub mod update_document;

pub use extract_palette::ExtractPalette;
pub use materialize_image::MaterializeImage;
pub use render_swatches::RenderSwatches;
pub use select_image::SelectImage;
pub use update_document::UpdateDocument;
