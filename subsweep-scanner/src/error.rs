use thiserror::Error;

/// The only fatal error in the scanner. Per-candidate failures are
/// [`crate::probe::ProbeOutcome`] variants, not errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read wordlist {path}: {source}")]
    Wordlist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
