//! Environment file loading
//!
//! Reads `KEY=value` pairs from a dotenv-style file without touching the
//! process environment.

use std::collections::HashMap;
use std::path::Path;

use super::{Error, Result};

/// Load all variables from an environment file
///
/// A missing file is an error: the guide cannot run without credentials.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(Error::EnvFileMissing(path.display().to_string()));
    }

    let parse_err = |e: dotenvy::Error| Error::EnvFileParse {
        path: path.display().to_string(),
        error: e.to_string(),
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(parse_err)? {
        let (key, value) = item.map_err(parse_err)?;
        vars.insert(key, value);
    }

    tracing::debug!(path = %path.display(), count = vars.len(), "loaded environment file");
    Ok(vars)
}
