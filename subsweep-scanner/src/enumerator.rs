use crate::accumulator::DiscoverySet;
use crate::extract::LinkExtractor;
use crate::probe::{DEFAULT_TIMEOUT_SECS, ProbeOutcome, Prober};
use crate::report::ScanReport;
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Fired once per newly discovered subdomain or outbound URL.
pub type DiscoveryCallback = Arc<dyn Fn(&str) + Send + Sync>;
/// Fired once per settled probe, with the candidate label.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// The probing engine. Partitions the candidate list into fixed-size
/// batches, probes each batch concurrently, and only advances once the
/// whole batch has settled. The batch size is the run's only
/// concurrency cap.
pub struct Enumerator {
    domain: String,
    prober: Prober,
    extractor: Option<Arc<LinkExtractor>>,
    batch_size: usize,
    subdomains: DiscoverySet,
    urls: DiscoverySet,
    cancelled: Arc<AtomicBool>,
    subdomain_callback: Option<DiscoveryCallback>,
    url_callback: Option<DiscoveryCallback>,
    progress_callback: Option<ProgressCallback>,
}

impl Enumerator {
    pub fn new(domain: &str) -> Self {
        Self::with_timeout(domain, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(domain: &str, timeout_secs: u64) -> Self {
        Self {
            domain: domain.to_string(),
            prober: Prober::with_timeout(domain, timeout_secs),
            extractor: None,
            batch_size: DEFAULT_BATCH_SIZE,
            subdomains: DiscoverySet::new(),
            urls: DiscoverySet::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
            subdomain_callback: None,
            url_callback: None,
            progress_callback: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_prober(mut self, prober: Prober) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        // chunks() panics on zero
        self.batch_size = batch_size.max(1);
        self
    }

    /// Enables outbound-link extraction on live pages. With
    /// `restrict_to_other_domains`, links resolving back to the
    /// scanned domain are skipped.
    pub fn with_url_extraction(mut self, restrict_to_other_domains: bool) -> Self {
        self.extractor = Some(Arc::new(LinkExtractor::new(
            &self.domain,
            restrict_to_other_domains,
        )));
        self
    }

    pub fn with_subdomain_callback(mut self, callback: DiscoveryCallback) -> Self {
        self.subdomain_callback = Some(callback);
        self
    }

    pub fn with_url_callback(mut self, callback: DiscoveryCallback) -> Self {
        self.url_callback = Some(callback);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Flag that stops further batch dispatch once set. Probes already
    /// in flight still settle, and [`Enumerator::run`] returns the
    /// partial report through the normal path, so interruption behaves
    /// like a graceful early completion.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Probes every candidate in `batch_size` groups, waiting for a
    /// whole group to settle before dispatching the next.
    pub async fn run(&self, candidates: &[String]) -> ScanReport {
        let started = Instant::now();
        let mut dispatched = 0usize;

        info!(
            "enumerating {} candidates against {} (batch size {})",
            candidates.len(),
            self.domain,
            self.batch_size
        );

        for batch in candidates.chunks(self.batch_size) {
            if self.cancelled.load(Ordering::Relaxed) {
                info!("cancellation requested, stopping after {} probes", dispatched);
                break;
            }

            let mut handles = Vec::with_capacity(batch.len());
            for label in batch {
                let label = label.clone();
                let prober = self.prober.clone();
                let extractor = self.extractor.clone();
                let subdomains = self.subdomains.clone();
                let urls = self.urls.clone();
                let on_subdomain = self.subdomain_callback.clone();
                let on_url = self.url_callback.clone();
                let on_progress = self.progress_callback.clone();

                handles.push(tokio::spawn(async move {
                    match prober.probe(&label).await {
                        ProbeOutcome::Live { url, body } => {
                            if subdomains.insert(&url).await
                                && let Some(callback) = &on_subdomain
                            {
                                callback(&url);
                            }
                            if let Some(extractor) = &extractor {
                                for link in extractor.extract(&body) {
                                    if urls.insert(&link).await
                                        && let Some(callback) = &on_url
                                    {
                                        callback(&link);
                                    }
                                }
                            }
                        }
                        // Negative results by design, not errors.
                        ProbeOutcome::Unreachable | ProbeOutcome::InvalidHost => {}
                    }
                    if let Some(callback) = &on_progress {
                        callback(&label);
                    }
                }));
            }
            dispatched += batch.len();

            // Full-batch barrier: the next batch must not start until
            // every probe in this one has settled. A panicked task
            // counts as settled.
            for result in join_all(handles).await {
                if let Err(e) = result {
                    warn!("probe task failed: {}", e);
                }
            }
            debug!("batch settled, {}/{} candidates probed", dispatched, candidates.len());
        }

        ScanReport {
            subdomains: self.subdomains.snapshot().await,
            urls: self.urls.snapshot().await,
            candidates_probed: dispatched,
            elapsed: started.elapsed(),
            interrupted: self.cancelled.load(Ordering::Relaxed),
        }
    }
}
