//! Job lifecycle.
//!
//! The job state machine:
//!
//! ```text
//!   Job::new() ──→ Initializing ──submit()──→ Running ──→ Done
//!                                                │
//!                                                └──→ Error(reason)
//! ```
//!
//! **Invariants:**
//! - Transitions are monotonic; a job never moves backward.
//! - Terminal states (`Done`, `Error`) are written exactly once, by the
//!   worker, and never change afterwards. A worker that panics is reported
//!   as `Error` by the task supervising it.
//! - Shots run one after another inside the worker; bit string order is
//!   shot order is sub-seed order.
//! - A timed-out caller only stops waiting. The worker keeps running.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, instrument};

use quic_wire::WireString;

use crate::error::{HalError, HalResult};
use crate::result::{Counts, ExecutionResult, outcome_to_bitstring};
use crate::transport::ExecutionTransport;

/// Job seeds and per-shot seeds are drawn uniformly from `[0, SEED_BOUND)`.
pub const SEED_BOUND: u64 = 65535;

/// Shortest interval [`Job::result`] sleeps between status checks.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Created but not yet submitted.
    Initializing,
    /// The worker is executing shots.
    Running,
    /// Every shot completed.
    Done,
    /// A shot failed; no further shots were run.
    Error(String),
}

impl JobStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error(_))
    }

    /// Check if the job is still pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Initializing | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Done)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Initializing => write!(f, "Initializing"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Done => write!(f, "Done"),
            JobStatus::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Everything a job needs to run.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// The job identifier.
    pub id: JobId,
    /// Backend the job belongs to.
    pub backend_name: String,
    /// Encoded circuit.
    pub wire: WireString,
    /// Number of shots.
    pub shots: u32,
    /// Seed the per-shot seeds are derived from.
    pub seed: u64,
}

/// How [`Job::result`] waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalOptions {
    /// Give up after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Interval between status checks.
    pub poll_interval: Duration,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl RetrievalOptions {
    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// A serializable snapshot of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// The job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Backend the job belongs to.
    pub backend: String,
    /// Encoded circuit.
    pub wire: WireString,
    /// Number of shots requested.
    pub shots: u32,
    /// Width of the encoded circuit.
    pub num_qubits: u32,
    /// Job seed.
    pub seed: u64,
    /// Time the job was created.
    pub created_at: DateTime<Utc>,
    /// Time the job started running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time the job finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Outcomes recorded by a worker that ran every shot.
#[derive(Debug)]
struct ShotRecord {
    counts: Counts,
    memory: Vec<String>,
    execution_time_ms: u64,
}

#[derive(Debug)]
struct JobInner {
    spec: JobSpec,
    num_qubits: u32,
    created_at: DateTime<Utc>,
    started_at: OnceLock<DateTime<Utc>>,
    finished_at: OnceLock<DateTime<Utc>>,
    status: watch::Sender<JobStatus>,
    record: OnceLock<ShotRecord>,
}

impl JobInner {
    /// Move to a terminal state unless one was already reached.
    fn finish(&self, terminal: JobStatus) {
        let _ = self.finished_at.set(Utc::now());
        self.status.send_if_modified(|status| {
            if status.is_terminal() {
                return false;
            }
            *status = terminal;
            true
        });
    }
}

/// Handle to a job. Cheap to clone; all clones observe the same job.
#[derive(Debug, Clone)]
pub struct Job {
    inner: Arc<JobInner>,
}

impl Job {
    /// Create a job in the `Initializing` state.
    ///
    /// The qubit count handed to the endpoint is the wire string's layer
    /// width.
    pub fn new(spec: JobSpec) -> Self {
        let num_qubits = spec.wire.num_qubits();
        let (status, _) = watch::channel(JobStatus::Initializing);
        Self {
            inner: Arc::new(JobInner {
                spec,
                num_qubits,
                created_at: Utc::now(),
                started_at: OnceLock::new(),
                finished_at: OnceLock::new(),
                status,
                record: OnceLock::new(),
            }),
        }
    }

    /// The job identifier.
    pub fn id(&self) -> &JobId {
        &self.inner.spec.id
    }

    /// Backend the job belongs to.
    pub fn backend_name(&self) -> &str {
        &self.inner.spec.backend_name
    }

    /// Encoded circuit.
    pub fn wire(&self) -> &WireString {
        &self.inner.spec.wire
    }

    /// Number of shots.
    pub fn shots(&self) -> u32 {
        self.inner.spec.shots
    }

    /// Qubits allocated per shot.
    pub fn num_qubits(&self) -> u32 {
        self.inner.num_qubits
    }

    /// Job seed.
    pub fn seed(&self) -> u64 {
        self.inner.spec.seed
    }

    /// Current status. Never blocks.
    pub fn status(&self) -> JobStatus {
        self.inner.status.borrow().clone()
    }

    /// A receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<JobStatus> {
        self.inner.status.subscribe()
    }

    /// Snapshot of the job's metadata.
    pub fn info(&self) -> JobInfo {
        JobInfo {
            id: self.id().clone(),
            status: self.status(),
            backend: self.backend_name().to_string(),
            wire: self.wire().clone(),
            shots: self.shots(),
            num_qubits: self.num_qubits(),
            seed: self.seed(),
            created_at: self.inner.created_at,
            started_at: self.inner.started_at.get().copied(),
            finished_at: self.inner.finished_at.get().copied(),
        }
    }

    /// Move to `Running` and spawn the worker on the current Tokio runtime.
    ///
    /// Fails with [`HalError::AlreadySubmitted`] unless the job is still
    /// `Initializing`, and with [`HalError::Configuration`] outside a
    /// runtime.
    #[instrument(skip_all, fields(job_id = %self.id()))]
    pub fn submit(&self, transport: Arc<dyn ExecutionTransport>) -> HalResult<()> {
        let runtime = Handle::try_current()
            .map_err(|e| HalError::Configuration(format!("jobs need a Tokio runtime: {e}")))?;
        let started = self.inner.status.send_if_modified(|status| {
            if *status != JobStatus::Initializing {
                return false;
            }
            *status = JobStatus::Running;
            true
        });
        if !started {
            return Err(HalError::AlreadySubmitted(self.id().to_string()));
        }

        let _ = self.inner.started_at.set(Utc::now());
        info!(
            shots = self.shots(),
            num_qubits = self.num_qubits(),
            seed = self.seed(),
            "Job running"
        );
        let worker = runtime.spawn(run_worker(Arc::clone(&self.inner), transport));
        let job = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            if let (Err(e), Some(inner)) = (worker.await, job.upgrade()) {
                error!(job_id = %inner.spec.id, error = %e, "Worker aborted");
                inner.finish(JobStatus::Error(format!("worker aborted: {e}")));
            }
        });
        Ok(())
    }

    /// A handle that does not keep the job alive.
    pub(crate) fn downgrade(&self) -> WeakJob {
        WeakJob(Arc::downgrade(&self.inner))
    }

    /// Poll the status every `poll_interval` until the job is terminal or
    /// the timeout elapses.
    ///
    /// The status is checked before the deadline, so a zero timeout returns
    /// the result of an already finished job and [`HalError::Timeout`]
    /// otherwise.
    pub async fn result(&self, options: RetrievalOptions) -> HalResult<ExecutionResult> {
        let deadline = options.timeout.map(|t| Instant::now() + t);
        let poll_interval = options.poll_interval.max(MIN_POLL_INTERVAL);

        loop {
            let status = self.status();
            if status.is_terminal() {
                return self.outcome(status);
            }

            let mut nap = poll_interval;
            if let Some(deadline) = deadline {
                let now = Instant::now();
                if now >= deadline {
                    return Err(HalError::Timeout(self.id().to_string()));
                }
                nap = nap.min(deadline - now);
            }
            sleep(nap).await;
        }
    }

    /// Wait on the completion signal instead of polling.
    pub async fn wait(&self, timeout: Option<Duration>) -> HalResult<ExecutionResult> {
        let mut receiver = self.subscribe();
        let terminal = async {
            receiver
                .wait_for(JobStatus::is_terminal)
                .await
                .map(|status| status.clone())
        };

        let status = match timeout {
            Some(timeout) => tokio::time::timeout(timeout, terminal)
                .await
                .map_err(|_| HalError::Timeout(self.id().to_string()))?,
            None => terminal.await,
        }
        .map_err(|e| HalError::ExecutionFailed {
            job_id: self.id().to_string(),
            reason: e.to_string(),
        })?;

        self.outcome(status)
    }

    fn outcome(&self, status: JobStatus) -> HalResult<ExecutionResult> {
        let failed = |reason: String| HalError::ExecutionFailed {
            job_id: self.id().to_string(),
            reason,
        };

        match status {
            JobStatus::Error(reason) => Err(failed(reason)),
            JobStatus::Done => {
                let record = self
                    .inner
                    .record
                    .get()
                    .ok_or_else(|| failed("finished without recording outcomes".into()))?;
                Ok(ExecutionResult {
                    job_id: self.id().clone(),
                    backend_name: self.backend_name().to_string(),
                    shots: self.shots(),
                    success: true,
                    counts: record.counts.clone(),
                    memory: record.memory.clone(),
                    seed: self.seed(),
                    execution_time_ms: Some(record.execution_time_ms),
                })
            }
            JobStatus::Initializing | JobStatus::Running => {
                Err(HalError::Timeout(self.id().to_string()))
            }
        }
    }
}

/// Non-owning job handle. The job lives while a caller or its worker holds
/// a [`Job`].
#[derive(Debug, Clone)]
pub(crate) struct WeakJob(Weak<JobInner>);

impl WeakJob {
    pub(crate) fn upgrade(&self) -> Option<Job> {
        self.0.upgrade().map(|inner| Job { inner })
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.0.strong_count() == 0
    }
}

/// Run every shot in order, then publish the terminal state.
#[instrument(skip_all, fields(job_id = %inner.spec.id))]
async fn run_worker(inner: Arc<JobInner>, transport: Arc<dyn ExecutionTransport>) {
    let started = Instant::now();
    let shots = inner.spec.shots;
    let num_qubits = inner.num_qubits;
    let script = inner.spec.wire.as_str();

    let mut rng = StdRng::seed_from_u64(inner.spec.seed);
    let mut counts = Counts::new();
    let mut memory = Vec::with_capacity(shots as usize);

    for shot in 0..shots {
        let sub_seed = rng.gen_range(0..SEED_BOUND);
        match transport.run_script(num_qubits, script, sub_seed).await {
            Ok(raw) => {
                let bitstring = outcome_to_bitstring(raw, num_qubits);
                debug!(shot, sub_seed, raw, outcome = %bitstring, "Shot completed");
                counts.insert(bitstring.as_str(), 1);
                memory.push(bitstring);
            }
            Err(e) => {
                error!(shot, sub_seed, error = %e, "Shot failed, stopping job");
                inner.finish(JobStatus::Error(e.to_string()));
                return;
            }
        }
    }

    let execution_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let _ = inner.record.set(ShotRecord {
        counts,
        memory,
        execution_time_ms,
    });
    info!(shots, duration_ms = execution_time_ms, "Job done");
    inner.finish(JobStatus::Done);
}
