pub mod accumulator;
pub mod enumerator;
pub mod error;
pub mod extract;
pub mod probe;
pub mod report;
pub mod wordlist;

pub use accumulator::DiscoverySet;
pub use enumerator::{DiscoveryCallback, Enumerator, ProgressCallback};
pub use error::{Result, ScanError};
pub use extract::LinkExtractor;
pub use probe::{ProbeOutcome, Prober};
pub use report::ScanReport;
pub use wordlist::load_wordlist;
