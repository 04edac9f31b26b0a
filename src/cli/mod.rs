pub mod fix;
pub mod output;

use crate::reader::DocumentFormat;
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Expand directories into the supported documents below them.
///
/// Plain file arguments are passed through untouched so that an unsupported
/// or missing file is still reported by the checker.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut builder = WalkBuilder::new(path);
        builder.sort_by_file_name(|a, b| a.cmp(b));

        for entry in builder.build() {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && DocumentFormat::from_path(entry.path()).is_some() {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => log::warn!("Skipping unreadable entry: {}", e),
            }
        }
    }

    files
}
