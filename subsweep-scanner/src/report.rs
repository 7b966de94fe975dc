use serde::{Deserialize, Serialize};
use std::time::Duration;

/// End-of-run summary. Produced once, after the final batch (or the
/// batch in flight when the run was interrupted) has settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique live subdomain URLs, sorted.
    pub subdomains: Vec<String>,
    /// Unique outbound URLs extracted from live pages, sorted. Empty
    /// when extraction was disabled.
    pub urls: Vec<String>,
    /// Number of probes actually dispatched; equals the wordlist
    /// length unless the run was interrupted.
    pub candidates_probed: usize,
    /// Wall-clock time from first dispatch to last settle.
    pub elapsed: Duration,
    pub interrupted: bool,
}
