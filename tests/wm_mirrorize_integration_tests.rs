use std::path::{Path, PathBuf};
use std::process::Command;
use std::{fs, io::Cursor};

use image::{GenericImageView, Rgb, RgbImage};

fn setup<'a>() -> (&'a str, &'a str) {
    let binary = env!("CARGO_BIN_EXE_wm-mirrorize");
    let tmp_dir = env!("CARGO_TARGET_TMPDIR");
    (binary, tmp_dir)
}

/// Left half black, right half white.
fn sample_image(tmp_dir: &str, name: &str) -> PathBuf {
    let path = Path::new(tmp_dir).join(name);
    let buf = RgbImage::from_fn(40, 20, |x, _| {
        if x < 20 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    buf.save(&path).expect("could not write the sample image");
    path
}

#[test]
fn test_mirrorize_east_succeeds() {
    let (binary, tmp_dir) = setup();
    let input = sample_image(tmp_dir, "cli-east-input.png");
    let output_path = format!("{}/cli-east.png", tmp_dir);
    let _ = fs::remove_file(&output_path);

    let result = Command::new(binary)
        .arg(&input)
        .args(["-mirrorize", "east", output_path.as_str()])
        .output()
        .expect("wm-mirrorize did not run");

    assert!(result.status.success(), "{:?}", result);
    let output = image::open(&output_path).expect("could not open the output");
    assert_eq!(output.dimensions(), (40, 20));
    assert_eq!(output.get_pixel(2, 10).0[0], 255);
    assert_eq!(output.get_pixel(37, 10).0[0], 255);
}

#[test]
fn test_spelled_out_directives_succeed() {
    let (binary, tmp_dir) = setup();
    let input = sample_image(tmp_dir, "cli-spelled-input.png");
    let output_path = format!("{}/cli-spelled.png", tmp_dir);
    let _ = fs::remove_file(&output_path);

    let result = Command::new(binary)
        .arg(&input)
        .args([
            "-gravity", "NorthWest", "-crop", "50%x100%+0+0", "+repage", "(", "+clone", "-flop",
            ")", "+append", output_path.as_str(),
        ])
        .output()
        .expect("wm-mirrorize did not run");

    assert!(result.status.success(), "{:?}", result);
    let output = image::open(&output_path).expect("could not open the output");
    assert_eq!(output.dimensions(), (40, 20));
    assert_eq!(output.get_pixel(37, 10).0[0], 0);
}

#[test]
fn test_write_to_stdout() {
    let (binary, tmp_dir) = setup();
    let input = sample_image(tmp_dir, "cli-stdout-input.png");

    let result = Command::new(binary)
        .arg(&input)
        .args(["-mirrorize", "north", "png:-"])
        .output()
        .expect("wm-mirrorize did not run");

    assert!(result.status.success(), "{:?}", result);
    let output = image::ImageReader::new(Cursor::new(result.stdout))
        .with_guessed_format()
        .unwrap()
        .decode()
        .expect("stdout is not an image");
    assert_eq!(output.dimensions(), (40, 20));
}

#[test]
fn test_unknown_direction_fails() {
    let (binary, tmp_dir) = setup();
    let input = sample_image(tmp_dir, "cli-unknown-input.png");
    let output_path = format!("{}/cli-unknown.png", tmp_dir);

    let result = Command::new(binary)
        .arg(&input)
        .args(["-mirrorize", "sideways", output_path.as_str()])
        .output()
        .expect("wm-mirrorize did not run");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("unrecognized direction `sideways'"), "{stderr}");
}

#[test]
fn test_unbalanced_parenthesis_fails() {
    let (binary, tmp_dir) = setup();
    let input = sample_image(tmp_dir, "cli-paren-input.png");
    let output_path = format!("{}/cli-paren.png", tmp_dir);

    let result = Command::new(binary)
        .arg(&input)
        .args(["(", "+clone", output_path.as_str()])
        .output()
        .expect("wm-mirrorize did not run");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("unbalanced parenthesis"));
}

#[test]
fn test_help_lists_mirrorize() {
    let (binary, _) = setup();
    let result = Command::new(binary)
        .arg("-help")
        .output()
        .expect("wm-mirrorize did not run");

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("-mirrorize"));
    assert!(stdout.contains("+repage"));
}
