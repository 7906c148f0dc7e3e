//! Numbered directory browser used by `browse input|output`.
//!
//! Lines are pulled through a closure so the picker can share the surface's
//! single stdin reader and can be driven from tests.

use movconv_core::terminal;

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

fn list_subdirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect(),
        Err(e) => {
            terminal::print_warning(&format!("Cannot list {}: {}", dir.display(), e));
            Vec::new()
        }
    };
    dirs.sort();
    dirs
}

fn print_listing(current: &Path, dirs: &[PathBuf]) {
    terminal::print_subsection(&current.display().to_string());
    for (i, dir) in dirs.iter().enumerate() {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        info!("  {:>3}  {}/", i + 1, name);
    }
    info!("  Enter a number to open, '..' to go up, '.' to choose this directory,");
    info!("  a path to jump to it, or an empty line to cancel.");
}

/// Lets the user walk the filesystem starting at `start`.
///
/// Returns `None` when the user cancels or input runs out.
pub fn pick_directory<F>(start: &Path, mut next_line: F) -> Option<PathBuf>
where
    F: FnMut() -> Option<String>,
{
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    };

    loop {
        let dirs = list_subdirs(&current);
        print_listing(&current, &dirs);

        let line = next_line()?;
        let choice = line.trim();

        match choice {
            "" => return None,
            "." => return Some(current),
            ".." => {
                if let Some(parent) = current.parent() {
                    current = parent.to_path_buf();
                }
            }
            _ => {
                if let Ok(n) = choice.parse::<usize>() {
                    match n.checked_sub(1).and_then(|i| dirs.get(i)) {
                        Some(dir) => current = dir.clone(),
                        None => terminal::print_warning(&format!("No entry numbered {n}")),
                    }
                } else {
                    let typed = PathBuf::from(choice);
                    let target = if typed.is_absolute() {
                        typed
                    } else {
                        current.join(typed)
                    };
                    if target.is_dir() {
                        current = target;
                    } else {
                        terminal::print_warning(&format!("Not a directory: {}", target.display()));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lines(input: &[&str]) -> impl FnMut() -> Option<String> {
        let mut queue: Vec<String> = input.iter().rev().map(|s| s.to_string()).collect();
        move || queue.pop()
    }

    #[test]
    fn dot_selects_start() {
        let root = tempdir().unwrap();
        let picked = pick_directory(root.path(), lines(&["."]));
        assert_eq!(picked, Some(root.path().to_path_buf()));
    }

    #[test]
    fn number_descends_in_sorted_order() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("b")).unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::write(root.path().join("file.mov"), b"").unwrap();

        let picked = pick_directory(root.path(), lines(&["2", "."]));
        assert_eq!(picked, Some(root.path().join("b")));
    }

    #[test]
    fn dotdot_goes_up() {
        let root = tempdir().unwrap();
        let child = root.path().join("child");
        fs::create_dir(&child).unwrap();

        let picked = pick_directory(&child, lines(&["..", "."]));
        assert_eq!(picked, Some(root.path().to_path_buf()));
    }

    #[test]
    fn typed_relative_path_is_followed() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("x/y")).unwrap();

        let picked = pick_directory(root.path(), lines(&["x/y", "."]));
        assert_eq!(picked, Some(root.path().join("x/y")));
    }

    #[test]
    fn bad_choices_keep_current_directory() {
        let root = tempdir().unwrap();
        let picked = pick_directory(root.path(), lines(&["7", "missing", "."]));
        assert_eq!(picked, Some(root.path().to_path_buf()));
    }

    #[test]
    fn empty_line_or_eof_cancels() {
        let root = tempdir().unwrap();
        assert_eq!(pick_directory(root.path(), lines(&[""])), None);
        assert_eq!(pick_directory(root.path(), lines(&[])), None);
    }
}
