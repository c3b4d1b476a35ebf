use std::path::{Path, PathBuf};

/// Resolves a path of the configuration file. Absolute paths are kept as they
/// are, relative ones are relative to the directory of the configuration.
pub fn relative_to(root: Option<&Path>, path: &str) -> PathBuf {
    let p = Path::new(path);
    match root {
        Some(r) if p.is_relative() => r.join(p),
        _ => p.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_relative_to_config() {
        let root = Path::new("configs/2026");
        assert_eq!(relative_to(Some(root), "surveys"), PathBuf::from("configs/2026/surveys"));
        assert_eq!(relative_to(Some(root), "/data/surveys"), PathBuf::from("/data/surveys"));
        assert_eq!(relative_to(None, "surveys"), PathBuf::from("surveys"));
    }
}
