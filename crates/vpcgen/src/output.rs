//! Writes the generated configuration file.

use std::fs;
use std::path::Path;

use tracing::info;
use vpcgen_common::{VpcgenError, VpcgenResult};

/// Writes `text` to `path`, replacing any previous content.
///
/// The write is a plain truncate-and-write: a daemon reloading at the same
/// moment can observe a partial file. The parent directory must exist.
pub fn write_config(path: &Path, text: &str) -> VpcgenResult<()> {
    fs::write(path, text).map_err(|e| VpcgenError::write(path, e))?;
    info!(path = %path.display(), bytes = text.len(), "Wrote BGP configuration");
    Ok(())
}
