//! yt core: identifier normalization, download configuration and the
//! orchestration lifecycle. Pure data, no IO beyond reading the working
//! directory.
mod config;
mod identifier;
mod phase;

pub use config::{DownloadConfig, MediaKind};
pub use identifier::{is_url, normalize_identifier, Identifier, IdentifierError, Normalized};
pub use phase::{Phase, PhaseError};
