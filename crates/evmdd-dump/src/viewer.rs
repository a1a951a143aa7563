//! Launches a local Graphviz viewer on a rendered EVMDD.
//!
//! Grounded in the reference `EvmddVisualizer.visualize`: write the DOT text
//! to a temporary file, then hand it to `xdot` on Linux, or convert it to
//! SVG with `dot` and open it on macOS. `oxidd-dump`'s `visualize` plays the
//! same "hand the rendered diagram to an external viewer" role, but posts to
//! an HTTP visualization server instead of a local process; there is no such
//! server in this domain, so this crate shells out directly instead.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use evmdd_core::{Edge, Manager};

use crate::dot::to_dot;

/// What can go wrong launching a viewer.
#[derive(Debug)]
pub enum ViewError {
    /// Writing the `.dot` file failed.
    Io(io::Error),
    /// The expected viewer executable was not found on `PATH`.
    ViewerNotFound(&'static str),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::Io(e) => write!(f, "failed to write DOT file: {e}"),
            ViewError::ViewerNotFound(tool) => {
                write!(f, "could not launch `{tool}`; is Graphviz installed?")
            }
        }
    }
}

impl std::error::Error for ViewError {}

impl From<io::Error> for ViewError {
    fn from(e: io::Error) -> Self {
        ViewError::Io(e)
    }
}

/// Render `edge` to a `.dot` file under `file_prefix` (or a timestamp-free
/// temp path if `None`) and open it with the platform's Graphviz viewer.
///
/// On Linux this shells out to `xdot`; elsewhere it converts the `.dot` file
/// to SVG with `dot -Tsvg` and leaves both files on disk for the caller (or
/// their OS) to open — neither file is deleted afterward.
pub fn visualize(manager: &Manager, edge: Edge, file_prefix: Option<&Path>) -> Result<(), ViewError> {
    let prefix: PathBuf = match file_prefix {
        Some(p) => p.to_path_buf(),
        None => std::env::temp_dir().join(format!("evmdd-gvz-{}", std::process::id())),
    };
    let dot_path = prefix.with_extension("dot");

    let dot_text = to_dot(manager, edge);
    std::fs::write(&dot_path, dot_text)?;

    if cfg!(target_os = "macos") {
        let status = Command::new("dot")
            .arg("-Tsvg")
            .arg("-O")
            .arg(&dot_path)
            .status();
        if status.is_err() {
            return Err(ViewError::ViewerNotFound("dot"));
        }
        let svg_path = dot_path.with_extension("dot.svg");
        let status = Command::new("open")
            .arg("-a")
            .arg("safari")
            .arg(format!("file://{}", svg_path.display()))
            .status();
        if status.is_err() {
            log::warn!("could not open Safari on the rendered SVG at {svg_path:?}");
        }
    } else {
        let status = Command::new("xdot").arg(&dot_path).status();
        if status.is_err() {
            log::error!("skipped EVMDD visualization: error calling xdot");
            return Err(ViewError::ViewerNotFound("xdot"));
        }
    }

    Ok(())
}
