use crate::models::{CommuteProfile, NetworkData};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading input files
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct ProfileFile {
    users: Vec<CommuteProfile>,
}

/// Load a network description from a JSON file
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<NetworkData, LoaderError> {
    let data: NetworkData = read_json(path.as_ref())?;
    tracing::info!(
        "Loaded network from {}: {} stations, {} connections",
        path.as_ref().display(),
        data.stations.len(),
        data.connections.len()
    );
    Ok(data)
}

/// Load commuter profiles from a JSON file of the form `{"users": [..]}`
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<CommuteProfile>, LoaderError> {
    let file: ProfileFile = read_json(path.as_ref())?;
    tracing::info!("Loaded {} profiles from {}", file.users.len(), path.as_ref().display());
    Ok(file.users)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LoaderError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoaderError::Parse {
        path: display,
        source,
    })
}
