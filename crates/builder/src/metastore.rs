//! Metastore payload encoding.
//!
//! The metastore file is opaque: its bytes are gzipped and base64-encoded
//! into a single text node, never inspected.

use std::io::Write;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

use hopxml_shared::{HopXmlError, Result};

/// Read the metastore file and produce its gzip + base64 payload.
pub(crate) fn encode_metastore(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| HopXmlError::io(path, e))?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&content)
        .map_err(|e| HopXmlError::io(path, e))?;
    let compressed = encoder.finish().map_err(|e| HopXmlError::io(path, e))?;

    let payload = STANDARD.encode(compressed);

    debug!(
        path = %path.display(),
        raw_bytes = content.len(),
        payload_chars = payload.len(),
        "encoded metastore payload"
    );

    Ok(payload)
}
