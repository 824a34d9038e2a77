//! Write agreement artifacts to disk.
//!
//! "Downloading" an agreement means writing its bytes to
//! `<out_dir>/service_agreement.pdf`. An existing file is replaced.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::pipeline::QuoteRecord;
use crate::domain::AgreementDocument;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("output directory does not exist: {}", .path.display())]
    MissingDir { path: PathBuf },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode quote JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Path the agreement is saved to inside `out_dir`.
pub fn agreement_path(out_dir: &Path) -> PathBuf {
    out_dir.join(AgreementDocument::FILE_NAME)
}

/// Save the agreement PDF into `out_dir` and return the written path.
pub fn write_agreement(
    out_dir: &Path,
    document: &AgreementDocument,
) -> Result<PathBuf, ExportError> {
    if !out_dir.is_dir() {
        return Err(ExportError::MissingDir {
            path: out_dir.to_path_buf(),
        });
    }

    let path = agreement_path(out_dir);
    let write_err = |source| ExportError::Write {
        path: path.clone(),
        source,
    };
    let mut file = File::create(&path).map_err(write_err)?;
    file.write_all(document.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    tracing::info!(
        path = %path.display(),
        bytes = document.byte_len(),
        mime = AgreementDocument::MIME_TYPE,
        "saved agreement"
    );
    Ok(path)
}

/// Write a pretty-printed JSON quote record.
pub fn write_quote_json(path: &Path, record: &QuoteRecord<'_>) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, record)?;
    tracing::info!(path = %path.display(), "wrote quote record");
    Ok(())
}
