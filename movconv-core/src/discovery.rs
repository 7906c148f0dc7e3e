//! File discovery module for finding `.mov` files to convert.
//!
//! Only the top level of the input directory is searched. Matching on the
//! extension is case-insensitive, and results keep the order the operating
//! system yields them in.

use crate::config::INPUT_EXTENSION;
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Returns true when `path` carries a `.mov` extension (any case).
#[must_use]
pub fn has_mov_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
}

/// Finds `.mov` files directly inside `input_dir`.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The discovered files, in enumeration order
/// * `Err(CoreError::InputDirNotFound)` - If `input_dir` does not exist
/// * `Err(CoreError::NotADirectory)` - If `input_dir` is not a directory
/// * `Err(CoreError::NoFilesFound)` - If the directory holds no `.mov` files
///
/// # Examples
///
/// ```rust,no_run
/// use movconv_core::find_mov_files;
/// use std::path::Path;
///
/// match find_mov_files(Path::new("/path/to/videos")) {
///     Ok(files) => println!("Found {} .mov files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_mov_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(CoreError::InputDirNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(CoreError::NotADirectory(input_dir.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(input_dir)?;
    let files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.is_file() && has_mov_extension(&path)).then_some(path)
        })
        .collect();

    log::debug!(
        "Discovered {} .mov file(s) in {}",
        files.len(),
        input_dir.display()
    );

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
