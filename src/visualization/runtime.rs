use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{BusyplotError, Result};

pub const PLOTLY_VERSION: &str = "2.35.2";

/// File name of the runtime when copied next to the report
pub const PLOTLY_FILE_NAME: &str = "plotly.min.js";

/// Where the page loads the charting runtime from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAsset {
    /// Reference the public CDN build
    Cdn,
    /// Copy a local build next to the output and load it relatively
    Local { source: PathBuf },
}

impl RuntimeAsset {
    pub fn cdn_url() -> String {
        format!("https://cdn.plot.ly/plotly-{}.min.js", PLOTLY_VERSION)
    }

    pub fn src(&self) -> String {
        match self {
            RuntimeAsset::Cdn => Self::cdn_url(),
            RuntimeAsset::Local { .. } => PLOTLY_FILE_NAME.to_string(),
        }
    }

    pub fn script_tag(&self) -> String {
        format!("<script src=\"{}\" charset=\"utf-8\"></script>", self.src())
    }

    /// Put the runtime in place for a report written to `outdir`.
    /// Returns the copied file, if any.
    pub fn install(&self, outdir: &Path) -> Result<Option<PathBuf>> {
        match self {
            RuntimeAsset::Cdn => {
                debug!(url = %Self::cdn_url(), "using CDN runtime");
                Ok(None)
            }
            RuntimeAsset::Local { source } => {
                if !source.is_file() {
                    return Err(BusyplotError::RuntimeAssetMissing(source.clone()));
                }
                let target = outdir.join(PLOTLY_FILE_NAME);
                let bytes = fs::copy(source, &target)?;
                info!(source = %source.display(), target = %target.display(), bytes, "copied charting runtime");
                Ok(Some(target))
            }
        }
    }
}
