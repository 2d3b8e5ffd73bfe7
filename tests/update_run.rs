use chrono::{Local, TimeZone};
use image::{Rgb, RgbImage};
use profilebot_rust::config::Configuration;
use profilebot_rust::error::{SelectionError, UpdateError};
use profilebot_rust::pipeline::{RunContext, UpdatePipeline};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const README: &str = "# Profile\n\
    some text\n\
    <img src=\"cropped.jpg\" alt=\"old alt\" width=\"100\" />\n\
    more text\n\
    <p align=\"center\">\n\
    old swatch line\n\
    </p>\n\
    footer";

const JPEG_MAGIC: [u8; 2] = [0xFF, 0xD8];

fn write_image(path: &Path, color: [u8; 3]) {
    RgbImage::from_pixel(32, 32, Rgb(color)).save(path).unwrap();
}

// A color-rich source so a five-cluster palette has five distinct centers.
fn write_gradient(path: &Path, tint: u8) {
    let mut image = RgbImage::new(32, 32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 8) as u8, (y * 8) as u8, tint.wrapping_add((x + y) as u8 * 4)]);
    }
    image.save(path).unwrap();
}

fn workspace(source_names: &[&str]) -> (TempDir, Configuration) {
    let root = tempdir().unwrap();
    let image_dir = root.path().join("Waifu");
    fs::create_dir_all(&image_dir).unwrap();
    for name in source_names {
        match *name {
            "a.png" => write_gradient(&image_dir.join(name), 0),
            "b.jpg" => write_gradient(&image_dir.join(name), 128),
            _ => write_image(&image_dir.join(name), [240, 240, 240]),
        }
    }
    fs::write(root.path().join("README.md"), README).unwrap();

    let configuration = Configuration::default()
        .with_image_dir(image_dir)
        .with_output_image(root.path().join("cropped.jpg"))
        .with_document_path(root.path().join("README.md"))
        .with_swatch_dir(root.path().join("img"));
    (root, configuration)
}

fn context_for_month(month: u32) -> RunContext {
    RunContext::new(Local.with_ymd_and_hms(2025, month, 1, 9, 0, 0).unwrap())
}

fn swatch_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn june_run_updates_everything_and_skips_the_seasonal_image() {
    let (root, configuration) = workspace(&["a.png", "b.jpg", "padoru.png"]);

    for _ in 0..10 {
        let mut context = context_for_month(6);
        let mut pipeline = UpdatePipeline::from_configuration(&configuration);
        pipeline.process(&mut context).await.unwrap();

        let selected = context.selected_image.unwrap();
        let selected_name = selected.file_name().unwrap().to_string_lossy().into_owned();
        assert_ne!(selected_name, "padoru.png");

        // The output is always a decodable JPEG at the fixed path.
        let output = fs::read(root.path().join("cropped.jpg")).unwrap();
        assert_eq!(output[..2], JPEG_MAGIC);
        image::open(root.path().join("cropped.jpg")).unwrap();

        // Exactly five swatches survive each run (stale ones are pruned).
        let swatches = swatch_files(&root.path().join("img"));
        assert_eq!(swatches.len(), 5);

        let readme = fs::read_to_string(root.path().join("README.md")).unwrap();
        let lines: Vec<&str> = readme.split('\n').collect();
        assert_eq!(
            lines[2],
            "<img src=\"cropped.jpg\" alt=\"Unfortunately I didn't find the author of the \
             pic, feel to open a pull request if found\" width=\"320\" />"
        );
        assert_eq!(lines[4], "<p align=\"center\">");
        assert_eq!(lines[5].matches("<img alt=").count(), 5);
        assert_eq!(lines[6], "</p>");
        assert_eq!(lines[0], "# Profile");
        assert_eq!(lines[7], "footer");

        // Swatch references appear in palette order.
        let mut cursor = 0;
        for color in &context.palette {
            let reference = format!("src=\"{}/{}.png\"", configuration.swatch_base_url, color.hex_digits());
            let position = lines[5][cursor..]
                .find(&reference)
                .expect("swatch reference out of order or missing");
            cursor += position + reference.len();
        }
    }
}

#[tokio::test]
async fn december_makes_the_seasonal_image_eligible() {
    let (_root, configuration) = workspace(&["padoru.png"]);

    let mut context = context_for_month(12);
    let mut pipeline = UpdatePipeline::from_configuration(&configuration);
    pipeline.process(&mut context).await.unwrap();

    let selected = context.selected_image.unwrap();
    assert_eq!(selected.file_name().unwrap(), "padoru.png");
}

#[tokio::test]
async fn the_seasonal_image_alone_is_no_candidate_outside_december() {
    let (_root, configuration) = workspace(&["padoru.png"]);

    let mut context = context_for_month(6);
    let mut pipeline = UpdatePipeline::from_configuration(&configuration);
    let result = pipeline.process(&mut context).await;

    assert!(matches!(
        result,
        Err(UpdateError::Selection(SelectionError::NoCandidates(_)))
    ));
}

#[tokio::test]
async fn gif_sources_still_yield_a_jpeg_output() {
    let (root, configuration) = workspace(&[]);
    write_image(
        &root.path().join("Waifu").join("only.gif"),
        [90, 160, 200],
    );

    let mut context = context_for_month(6);
    let mut pipeline = UpdatePipeline::from_configuration(&configuration);
    pipeline.process(&mut context).await.unwrap();

    let output = fs::read(root.path().join("cropped.jpg")).unwrap();
    assert_eq!(output[..2], JPEG_MAGIC);
    image::open(root.path().join("cropped.jpg")).unwrap();
}
