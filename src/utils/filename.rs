use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// `out.png` becomes `out-3.png`, the way imagemagick names the frames of a multi-image write.
/// Without an extension the suffix goes at the end.
pub fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let suffix = format!("-{index}");
    let (Some(stem), Some(extension)) = (path.file_stem(), path.extension()) else {
        let mut name = path.as_os_str().to_owned();
        name.push(&suffix);
        return PathBuf::from(name);
    };

    let mut file_name = OsString::from(stem);
    file_name.push(&suffix);
    file_name.push(".");
    file_name.push(extension);
    path.with_file_name(file_name)
}
