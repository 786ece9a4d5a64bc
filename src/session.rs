use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::analyzer::Analyzer;
use crate::error::{PromptLensError, Result};
use crate::intent::Intent;
use crate::records::{AnalysisRecord, OptimizationRecord};
use crate::synthesizer::OptimizeOptions;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct DebouncedAnalysis {
    pub generation: u64,
    pub text: String,
    pub record: AnalysisRecord,
}

/// Runs analysis only after input has been quiet for the settle delay.
///
/// Each `schedule` supersedes the previous request. Results that arrive for
/// a superseded generation are dropped on receipt.
pub struct AnalysisDebouncer {
    analyzer: Analyzer,
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<DebouncedAnalysis>,
    rx: mpsc::UnboundedReceiver<DebouncedAnalysis>,
}

impl AnalysisDebouncer {
    pub fn new(analyzer: Analyzer, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            analyzer,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
            rx,
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, text: String, intent: Intent) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let analyzer = self.analyzer.clone();
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let record = analyzer.analyze(&text, intent);
            let _ = tx.send(DebouncedAnalysis {
                generation,
                text,
                record,
            });
        }));

        generation
    }

    /// Drops any pending request without scheduling a new one.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn accept(&self, result: DebouncedAnalysis) -> Option<DebouncedAnalysis> {
        if result.generation == self.current_generation() {
            Some(result)
        } else {
            debug!(generation = result.generation, "discarding stale analysis");
            None
        }
    }

    /// Non-blocking: the newest current result that has arrived, if any.
    pub fn try_latest(&mut self) -> Option<DebouncedAnalysis> {
        let mut latest = None;
        while let Ok(result) = self.rx.try_recv() {
            if let Some(result) = self.accept(result) {
                latest = Some(result);
            }
        }
        latest
    }

    /// Waits for the next result that is still current.
    pub async fn next(&mut self) -> Option<DebouncedAnalysis> {
        loop {
            let result = self.rx.recv().await?;
            if let Some(result) = self.accept(result) {
                return Some(result);
            }
        }
    }
}

impl Drop for AnalysisDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Allows at most one optimize call in flight per session.
#[derive(Clone, Default)]
pub struct OptimizeGate {
    in_flight: Arc<AtomicBool>,
}

pub struct OptimizePermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for OptimizePermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

impl OptimizeGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn try_acquire(&self) -> Option<OptimizePermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| OptimizePermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Optimizes under the gate. `latency` simulates a remote round trip and
    /// never influences the result.
    pub async fn run(
        &self,
        analyzer: &Analyzer,
        text: &str,
        options: &OptimizeOptions,
        latency: Duration,
    ) -> Result<OptimizationRecord> {
        let _permit = self.try_acquire().ok_or(PromptLensError::OptimizeInProgress)?;
        if text.trim().is_empty() {
            return Err(PromptLensError::InvalidInput);
        }
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        analyzer.optimize(text, options)
    }
}
