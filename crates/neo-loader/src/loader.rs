//! Data file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{DataFiles, NeoError, NeoResult};

/// File name of the NEO catalogue inside a data directory.
pub const NEO_FILE_NAME: &str = "neos.csv";
/// File name of the close-approach data inside a data directory.
pub const CAD_FILE_NAME: &str = "cad.json";

/// Locates the NEO catalogue and close-approach files in a data directory.
///
/// Exact names (`neos.csv`, `cad.json`) are preferred. Otherwise the first
/// `.csv` file whose name starts with `neo` and the first `.json` file whose
/// name starts with `cad` are used, in file-name order.
pub fn discover_data_files<P: AsRef<Path>>(path: P) -> NeoResult<DataFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(NeoError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let neos_file = find_file(&entries, NEO_FILE_NAME, "neo", "csv").ok_or_else(|| {
        NeoError::FileNotFound {
            path: path.join(NEO_FILE_NAME).display().to_string(),
        }
    })?;
    let approaches_file = find_file(&entries, CAD_FILE_NAME, "cad", "json").ok_or_else(|| {
        NeoError::FileNotFound {
            path: path.join(CAD_FILE_NAME).display().to_string(),
        }
    })?;

    Ok(DataFiles {
        neos_file,
        approaches_file,
    })
}

fn find_file(entries: &[PathBuf], exact: &str, prefix: &str, extension: &str) -> Option<PathBuf> {
    let file_name = |p: &PathBuf| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    };

    entries
        .iter()
        .find(|p| file_name(*p) == exact)
        .or_else(|| {
            entries.iter().find(|p| {
                let name = file_name(*p);
                name.starts_with(prefix) && name.ends_with(&format!(".{extension}"))
            })
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neo-loader-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_file_prefers_exact_name() {
        let entries = vec![
            PathBuf::from("data/cad-2020.json"),
            PathBuf::from("data/cad.json"),
            PathBuf::from("data/neos_2020.csv"),
        ];
        assert_eq!(
            find_file(&entries, CAD_FILE_NAME, "cad", "json"),
            Some(PathBuf::from("data/cad.json"))
        );
        assert_eq!(
            find_file(&entries, NEO_FILE_NAME, "neo", "csv"),
            Some(PathBuf::from("data/neos_2020.csv"))
        );
        assert_eq!(find_file(&entries, "x.txt", "x", "txt"), None);
    }

    #[test]
    fn test_discover_data_files() {
        let dir = scratch_dir("discover");
        fs::write(dir.join("neos.csv"), "pdes,name,diameter,pha\n").unwrap();
        fs::write(dir.join("cad.json"), "{\"data\": []}").unwrap();

        let files = discover_data_files(&dir).unwrap();
        assert_eq!(files.neos_file, dir.join("neos.csv"));
        assert_eq!(files.approaches_file, dir.join("cad.json"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_discover_missing() {
        let dir = scratch_dir("missing");
        fs::write(dir.join("neos.csv"), "pdes,name,diameter,pha\n").unwrap();
        assert!(matches!(
            discover_data_files(&dir),
            Err(NeoError::FileNotFound { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            discover_data_files("/nonexistent/neo-data"),
            Err(NeoError::DirectoryNotFound { .. })
        ));
    }
}
