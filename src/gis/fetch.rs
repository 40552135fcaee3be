//! Download-and-cache for the remote shapefile bundles.
//!
//! An archive is fetched only when one of its expected shapefiles is absent
//! from the cache directory. There is no retry: a failed download aborts the
//! run before any output is written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{DataConfig, LayerSource};

/// Archive fetch errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid zip archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive from {url} did not contain {expected}")]
    MissingAfterExtract { url: String, expected: PathBuf },

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> FetchError + '_ {
    move |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Make sure both GIS layers are present in the cache directory.
pub async fn ensure_layers(data: &DataConfig) -> Result<(), FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(data.download_timeout_secs))
        .build()?;

    ensure_archive(&client, &data.aquifers, &data.data_dir).await?;
    ensure_archive(&client, &data.flowlines, &data.data_dir).await?;
    Ok(())
}

/// Fetch and unpack one archive unless its shapefiles are already cached.
///
/// Returns the extraction directory.
pub async fn ensure_archive(
    client: &reqwest::Client,
    source: &LayerSource,
    data_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let target_dir = data_dir.join(&source.archive_dir);
    let expected = source.shapefile_paths(data_dir);

    if expected.iter().all(|p| p.exists()) {
        tracing::debug!(dir = %target_dir.display(), "GIS archive already cached");
        return Ok(target_dir);
    }

    tokio::fs::create_dir_all(&target_dir)
        .await
        .map_err(io_err(&target_dir))?;

    tracing::info!(url = %source.url, "Downloading GIS archive");
    let resp = client.get(&source.url).send().await?;
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            url: source.url.clone(),
            status: resp.status(),
        });
    }
    let bytes = resp.bytes().await?;

    let zip_path = data_dir.join(format!("{}.zip", source.archive_dir));
    tokio::fs::write(&zip_path, &bytes)
        .await
        .map_err(io_err(&zip_path))?;
    tracing::info!(
        file = %zip_path.display(),
        bytes = bytes.len(),
        "Archive downloaded, extracting"
    );

    let extract_from = zip_path.clone();
    let extract_to = target_dir.clone();
    tokio::task::spawn_blocking(move || extract_archive(&extract_from, &extract_to)).await??;

    if let Some(missing) = expected.into_iter().find(|p| !p.exists()) {
        return Err(FetchError::MissingAfterExtract {
            url: source.url.clone(),
            expected: missing,
        });
    }

    Ok(target_dir)
}

/// Unpack every entry of a zip archive into `dest`.
pub(crate) fn extract_archive(zip_path: &Path, dest: &Path) -> Result<(), FetchError> {
    let file = std::fs::File::open(zip_path).map_err(io_err(zip_path))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| FetchError::Zip {
        path: zip_path.to_path_buf(),
        source,
    })?;
    let entries = archive.len();
    archive.extract(dest).map_err(|source| FetchError::Zip {
        path: zip_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(entries, dest = %dest.display(), "Archive extracted");
    Ok(())
}
