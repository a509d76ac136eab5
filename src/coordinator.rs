//! Coalescing re-highlight coordinator
//!
//! Text-change events arrive at keystroke rate; a highlight pass is a regex
//! sweep over the whole buffer and is not guaranteed to keep up. The
//! coordinator serializes passes on a worker thread and coalesces the
//! backlog to a single pending slot: while a pass is in flight, newer
//! submissions overwrite each other and only the latest survives.
//!
//! State machine (guarded by one mutex):
//!
//! ```text
//! Idle + submit(t)        → Processing(t), job sent to worker
//! Processing + submit(t') → pending = t' (overwriting any older pending)
//! Processing finished     → publish result; drain pending or go Idle
//! ```
//!
//! An in-flight pass is never cancelled; its result is published once and
//! then superseded. Each publish is therefore "latest fully computed as of
//! its submission time". The drain runs as an iterative loop on the worker,
//! never recursion, so sustained rapid input cannot grow the stack.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::attributed::AttributedText;
use crate::highlight::{highlight, HighlightRule};
use crate::processor::{run_post_transforms, run_pre_transforms, TextProcessor};
use crate::style::BaseStyle;

/// Callback receiving each published attributed result.
///
/// Invoked on the coordinator's worker thread; hosts marshal to their UI
/// thread themselves.
pub type StyledTextCallback = Arc<dyn Fn(&AttributedText) + Send + Sync>;

/// One unit of work for the worker thread
#[derive(Debug, Clone)]
struct Job {
    text: String,
    /// Skip processors and rules, publishing the bare text
    skip_transforms: bool,
}

/// Idle/Processing flag plus the single-slot pending cell
#[derive(Default)]
struct ScheduleState {
    processing: bool,
    pending: Option<Job>,
}

/// Rules, processors, and base style consulted by each pass
///
/// Mutations take effect on the next pass, never the one in flight.
#[derive(Clone)]
struct PipelineConfig {
    rules: Vec<HighlightRule>,
    processors: Vec<Arc<dyn TextProcessor>>,
    base: BaseStyle,
}

struct Shared {
    schedule: Mutex<ScheduleState>,
    idle: Condvar,
    config: Mutex<PipelineConfig>,
    subscribers: Mutex<Vec<StyledTextCallback>>,
    latest: Mutex<Option<AttributedText>>,
}

/// Serializes highlight passes and coalesces superseded submissions
pub struct HighlightCoordinator {
    shared: Arc<Shared>,
    job_tx: Option<mpsc::Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

/// Recover the guard from a poisoned lock; scheduling state stays valid
/// even if a subscriber callback panicked while holding it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HighlightCoordinator {
    pub fn new(rules: Vec<HighlightRule>) -> Self {
        Self::with_base_style(rules, BaseStyle::default())
    }

    pub fn with_base_style(rules: Vec<HighlightRule>, base: BaseStyle) -> Self {
        let shared = Arc::new(Shared {
            schedule: Mutex::new(ScheduleState::default()),
            idle: Condvar::new(),
            config: Mutex::new(PipelineConfig {
                rules,
                processors: Vec::new(),
                base,
            }),
            subscribers: Mutex::new(Vec::new()),
            latest: Mutex::new(None),
        });

        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || worker_loop(worker_shared, job_rx));

        Self {
            shared,
            job_tx: Some(job_tx),
            worker: Some(worker),
        }
    }

    /// Submit new raw text for highlighting.
    ///
    /// Returns immediately. If a pass is in flight the text lands in the
    /// pending slot, overwriting any previously pending submission.
    pub fn submit(&self, text: impl Into<String>) {
        self.submit_job(Job {
            text: text.into(),
            skip_transforms: false,
        });
    }

    /// Submit text to publish as-is, bypassing processors and rules
    pub fn submit_raw(&self, text: impl Into<String>) {
        self.submit_job(Job {
            text: text.into(),
            skip_transforms: true,
        });
    }

    fn submit_job(&self, job: Job) {
        let mut schedule = lock(&self.shared.schedule);
        if schedule.processing {
            tracing::trace!(
                len = job.text.len(),
                superseding = schedule.pending.is_some(),
                "pass in flight, recording pending text"
            );
            schedule.pending = Some(job);
            return;
        }
        schedule.processing = true;
        drop(schedule);

        if let Some(tx) = &self.job_tx {
            // Send cannot fail while the worker is alive; the worker is
            // only joined in Drop, after the sender is gone.
            let _ = tx.send(job);
        }
    }

    /// Register a callback for every published result.
    ///
    /// The list is snapshotted per publish, so a callback may itself
    /// register further subscribers; they start receiving results from
    /// the next publish.
    pub fn on_styled_text<F>(&self, callback: F)
    where
        F: Fn(&AttributedText) + Send + Sync + 'static,
    {
        lock(&self.shared.subscribers).push(Arc::new(callback));
    }

    /// Most recently published result, if any pass has completed
    pub fn latest_styled(&self) -> Option<AttributedText> {
        lock(&self.shared.latest).clone()
    }

    /// Replace the rule list; consulted by the next pass
    pub fn set_rules(&self, rules: Vec<HighlightRule>) {
        lock(&self.shared.config).rules = rules;
    }

    /// Replace the base style; consulted by the next pass
    pub fn set_base_style(&self, base: BaseStyle) {
        lock(&self.shared.config).base = base;
    }

    pub fn insert_processor_at_front(&self, processor: Arc<dyn TextProcessor>) {
        lock(&self.shared.config).processors.insert(0, processor);
    }

    pub fn append_processor(&self, processor: Arc<dyn TextProcessor>) {
        lock(&self.shared.config).processors.push(processor);
    }

    pub fn remove_all_processors(&self) {
        lock(&self.shared.config).processors.clear();
    }

    /// Run the full pipeline synchronously on the calling thread.
    ///
    /// Does not touch the schedule, publish, or update `latest_styled`;
    /// useful when a host needs an immediate styled snapshot.
    pub fn run_pipeline_now(&self, text: impl Into<String>) -> AttributedText {
        let config = lock(&self.shared.config).clone();
        run_pipeline(&config, text.into())
    }

    /// Block until no pass is in flight and the pending slot is empty.
    ///
    /// Returns `false` if the timeout elapsed first.
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let schedule = lock(&self.shared.schedule);
        let result = self.shared.idle.wait_timeout_while(schedule, timeout, |s| {
            s.processing || s.pending.is_some()
        });
        match result {
            Ok((_, timeout_result)) => !timeout_result.timed_out(),
            Err(poisoned) => !poisoned.into_inner().1.timed_out(),
        }
    }
}

impl Drop for HighlightCoordinator {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop after it drains
        self.job_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: Arc<Shared>, job_rx: mpsc::Receiver<Job>) {
    while let Ok(mut job) = job_rx.recv() {
        // Iterative drain: finish the current pass, publish, then take
        // whatever superseded it. Bounded to one pending item regardless
        // of submission rate.
        loop {
            let styled = if job.skip_transforms {
                AttributedText::new(job.text)
            } else {
                let config = lock(&shared.config).clone();
                run_pipeline(&config, job.text)
            };

            publish(&shared, styled);

            let mut schedule = lock(&shared.schedule);
            match schedule.pending.take() {
                Some(next) => {
                    tracing::debug!(len = next.text.len(), "draining pending text");
                    job = next;
                }
                None => {
                    schedule.processing = false;
                    drop(schedule);
                    shared.idle.notify_all();
                    break;
                }
            }
        }
    }
}

fn run_pipeline(config: &PipelineConfig, text: String) -> AttributedText {
    let pre = run_pre_transforms(&config.processors, text);
    let styled = highlight(&pre, &config.rules, &config.base);
    run_post_transforms(&config.processors, styled)
}

fn publish(shared: &Shared, styled: AttributedText) {
    tracing::debug!(
        len = styled.len(),
        spans = styled.spans().len(),
        "publishing highlighted text"
    );
    *lock(&shared.latest) = Some(styled.clone());
    // Snapshot outside the lock so a callback can register subscribers
    // without deadlocking
    let subscribers: Vec<StyledTextCallback> = lock(&shared.subscribers).clone();
    for subscriber in &subscribers {
        subscriber(&styled);
    }
}
