use std::fs;
use std::path::{Path, PathBuf};

use pencil_core::underwriting::DealParameters;

/// Read a deal file. `.yaml` / `.yml` are parsed as YAML, anything else as JSON.
pub fn read_deal(path: &str) -> Result<DealParameters, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let parsed = if is_yaml(&canonical) {
        DealParameters::from_yaml_str(&contents)
    } else {
        DealParameters::from_json_str(&contents)
    };
    let params =
        parsed.map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(params)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
