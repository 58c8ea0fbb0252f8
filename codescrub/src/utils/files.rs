// codescrub/src/utils/files.rs
//! Input discovery for batch sanitization.
//!
//! Each argument is treated as a file, a directory (walked only with
//! `--recursive`) or a glob pattern. Problems with individual arguments are
//! collected as warnings rather than aborting the run.

use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions (lowercase, without the dot) picked up when walking directories.
pub const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "jsx", "tsx", "html", "htm", "css", "scss", "sass", "php", "rb", "go", "java", "c",
    "cpp", "h", "hpp", "cs", "swift", "kt", "rs", "vue", "svelte", "json", "xml", "yaml", "yml", "toml",
    "ini", "cfg", "conf", "env", "sh", "bat", "ps1", "sql", "r", "m", "scala", "clj", "hs", "elm", "dart",
    "lua", "pl", "pm", "tcl",
];

/// The files to process plus any warnings raised while resolving arguments.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl Discovery {
    fn push(&mut self, seen: &mut HashSet<PathBuf>, path: PathBuf) {
        if seen.insert(path.clone()) {
            self.files.push(path);
        }
    }
}

/// True for files with a known code extension, or with no extension at all.
pub fn is_code_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => CODE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => true,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Resolves command-line arguments into a de-duplicated list of files, in
/// order of first appearance.
pub fn discover_files(args: &[String], recursive: bool) -> Discovery {
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    for arg in args {
        let path = Path::new(arg);
        if path.is_file() {
            discovery.push(&mut seen, path.to_path_buf());
        } else if path.is_dir() {
            if !recursive {
                discovery
                    .warnings
                    .push(format!("{} is a directory. Use --recursive to process directories.", arg));
                continue;
            }
            for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_entry(|e| !is_hidden(e)) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_code_file(entry.path()) => {
                        discovery.push(&mut seen, entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => discovery.warnings.push(format!("Could not read {}: {}", arg, e)),
                }
            }
        } else {
            match glob::glob(arg) {
                Ok(paths) => {
                    let before = discovery.files.len();
                    let mut matched_any = false;
                    for entry in paths {
                        match entry {
                            Ok(p) if p.is_file() => {
                                matched_any = true;
                                discovery.push(&mut seen, p);
                            }
                            Ok(_) => {}
                            Err(e) => discovery.warnings.push(format!("Could not read {}: {}", e.path().display(), e.error())),
                        }
                    }
                    if !matched_any {
                        discovery.warnings.push(format!("No files found matching pattern: {}", arg));
                    }
                    debug!("Pattern '{}' added {} file(s).", arg, discovery.files.len() - before);
                }
                Err(e) => discovery.warnings.push(format!("Invalid pattern '{}': {}", arg, e)),
            }
        }
    }
    discovery
}
