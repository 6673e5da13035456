use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating, enabling, or disabling the PXE service.
#[derive(Debug, Error)]
pub enum PxeError {
    /// Text that is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address '{0}'")]
    Format(String),

    #[error("interface {name}: {reason}")]
    Interface { name: String, reason: String },

    /// Subnet range rejected before any daemon state was touched.
    #[error("invalid subnet: {0}")]
    Validation(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `launchctl` ran and exited non-zero.
    #[error("launchctl {command} failed with exit code {code}: {}", .stderr.trim())]
    Control {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("no launchd service labelled {0}")]
    ServiceNotFound(String),

    /// The active bootpd configuration was written by someone else.
    #[error("bootpd was configured by some other process (active configuration is {found}, expected {expected})")]
    Ownership { expected: String, found: String },

    /// Requested boot file is not served by tftpd.
    #[error("{file} not found in {}", .root.display())]
    Pxe { file: String, root: PathBuf },

    #[error("failed to parse {}: {source}", .path.display())]
    PlistParse {
        path: PathBuf,
        #[source]
        source: plist_core::ParseError,
    },

    #[error("failed to serialize plist: {0}")]
    PlistWrite(#[from] plist_core::WriteError),

    /// Plist was well-formed but did not have the expected shape.
    #[error("unexpected bootpd configuration layout: {0}")]
    Schema(String),

    #[error("another pxe-ctl invocation holds the lock {}", .0.display())]
    Busy(PathBuf),

    #[error("settings: {0}")]
    Config(String),
}

impl PxeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PxeError>;
