use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

fn load_for_dssim(config: &dssim::Dssim, path: &Path) -> dssim::DssimImage<f32> {
    let image = image::open(path)
        .unwrap_or_else(|err| panic!("could not open {}: {err}", path.display()))
        .to_rgb8();
    let pixels: Vec<rgb::RGB<u8>> = image
        .pixels()
        .map(|p| rgb::RGB::from([p[0], p[1], p[2]]))
        .collect();
    config
        .create_image_rgb(&pixels, image.width() as usize, image.height() as usize)
        .unwrap_or_else(|| panic!("failed to create dssim image from {}", path.display()))
}

fn compute_visual_diff(wondermagick_path: &Path, imagemagick_path: &Path) -> f64 {
    let config = dssim::Dssim::new();
    let wm_dssim = load_for_dssim(&config, wondermagick_path);
    let magick_dssim = load_for_dssim(&config, imagemagick_path);
    let (dssim_score, _) = config.compare(&wm_dssim, &magick_dssim);
    dssim_score.into()
}

const DSSIM_TOLERANCE: f64 = 0.05;

/// Runs `wm_arguments` through `wm-mirrorize` and `magick_arguments` through imagemagick's
/// `convert`, then checks that the outputs have the same size and look alike.
/// Both argument lists exclude the output filename.
pub fn run_commands_and_compare(
    directory: &TempDir,
    wm_arguments: &[String],
    magick_arguments: &[String],
) -> (PathBuf, PathBuf) {
    use image::GenericImageView as _;

    let wondermagick_output_path = directory.path().join("wondermagick_output.png");
    let imagemagick_output_path = directory.path().join("imagemagick_output.png");

    let plan = {
        let mut arguments = vec![OsString::from("target/release/wm-mirrorize")];
        arguments.extend(wm_arguments.iter().map(OsString::from));
        arguments.push(wondermagick_output_path.as_os_str().to_os_string());
        mirrorize::args::parse_args(arguments).expect("must have succeeded")
    };
    plan.execute().expect("must have succeeded");

    let magick_status = std::process::Command::new("convert")
        .args(magick_arguments)
        .arg(&imagemagick_output_path)
        .status()
        .expect("must have succeeded");

    if !magick_status.success() {
        panic!("imagemagick command failed");
    }

    let wondermagick_dimensions = image::open(&wondermagick_output_path)
        .expect("could not open the WonderMagick output file")
        .dimensions();
    let imagemagick_dimensions = image::open(&imagemagick_output_path)
        .expect("could not open the ImageMagick output file")
        .dimensions();
    assert_eq!(
        imagemagick_dimensions, wondermagick_dimensions,
        "arguments: {magick_arguments:?}"
    );

    let dssim_score = compute_visual_diff(&wondermagick_output_path, &imagemagick_output_path);
    if dssim_score > DSSIM_TOLERANCE {
        panic!("High DSSIM score {dssim_score} for arguments: {magick_arguments:?}");
    }

    (wondermagick_output_path, imagemagick_output_path)
}
