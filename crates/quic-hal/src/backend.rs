//! The QuiC backend.
//!
//! A backend binds one endpoint transport to the capability set the endpoint
//! reported, and turns circuits into submitted jobs:
//!
//! ```text
//!   circuit ──→ synthesize ──→ validate ──→ encode ──→ Job::submit
//!              (Synthesizer)  (CapabilitySet) (wire)    (transport)
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{info, instrument};

use quic_compile::{BasisTranslator, CapabilitySet, Synthesizer, synthesize_for_target};
use quic_ir::Circuit;
use quic_wire::WireString;

use crate::config::BackendConfig;
use crate::error::{HalError, HalResult};
use crate::job::{Job, JobId, JobInfo, JobSpec, JobStatus, SEED_BOUND, WeakJob};
use crate::result::ExecutionResult;
use crate::transport::{EndpointInfo, ExecutionTransport};

/// Per-submission options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Number of shots. `None` uses the configured default.
    pub shots: Option<u32>,
    /// Measure every qubit at the end of the circuit.
    pub add_measurements: bool,
}

impl RunOptions {
    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Append a measurement of every qubit.
    pub fn with_measurements(mut self) -> Self {
        self.add_measurements = true;
        self
    }
}

struct BackendState {
    rng: StdRng,
    submitted: u64,
    /// Jobs still held by a caller or a running worker.
    jobs: FxHashMap<JobId, WeakJob>,
}

/// A connected QuiC endpoint.
pub struct QuicBackend {
    name: String,
    target: CapabilitySet,
    transport: Arc<dyn ExecutionTransport>,
    synthesizer: Arc<dyn Synthesizer>,
    config: BackendConfig,
    state: Mutex<BackendState>,
}

impl fmt::Debug for QuicBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuicBackend")
            .field("name", &self.name)
            .field("num_qubits", &self.target.num_qubits())
            .field("kinds", &self.target.kinds())
            .field("synthesizer", &self.synthesizer.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QuicBackend {
    /// Ask the endpoint to describe itself and build the backend from the
    /// answer.
    #[instrument(skip_all)]
    pub async fn connect(
        transport: Arc<dyn ExecutionTransport>,
        config: BackendConfig,
    ) -> HalResult<Self> {
        let info = transport.describe().await?;
        info!(
            endpoint = %info.name,
            num_qubits = info.num_qubits,
            gates = ?info.gate_names,
            "Connected to endpoint"
        );
        Self::new(info, transport, config)
    }

    /// Build a backend from an endpoint description.
    pub fn new(
        info: EndpointInfo,
        transport: Arc<dyn ExecutionTransport>,
        config: BackendConfig,
    ) -> HalResult<Self> {
        config.validate()?;
        let target = CapabilitySet::from_endpoint_names(&info.gate_names, info.num_qubits)?;
        Ok(Self {
            name: info.name,
            target,
            transport,
            synthesizer: Arc::new(BasisTranslator),
            state: Mutex::new(BackendState {
                rng: StdRng::seed_from_u64(config.seed),
                submitted: 0,
                jobs: FxHashMap::default(),
            }),
            config,
        })
    }

    /// Replace the synthesis pass.
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn Synthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Backend name, as reported by the endpoint.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the endpoint can execute.
    pub fn target(&self) -> &CapabilitySet {
        &self.target
    }

    /// Backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Fit `circuit` to the target and encode it.
    pub fn encode(&self, circuit: &Circuit) -> HalResult<WireString> {
        let fitted = synthesize_for_target(
            self.synthesizer.as_ref(),
            circuit,
            &self.target,
            &self.config.synthesis_options(),
        )?;
        Ok(quic_wire::encode(&fitted))
    }

    /// Submit `circuit` for execution.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip_all, fields(backend = %self.name, circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit, options: RunOptions) -> HalResult<Job> {
        let shots = self.check_shots(options.shots)?;
        let wire = if options.add_measurements {
            let mut measured = circuit.clone();
            measured.measure_all()?;
            self.encode(&measured)?
        } else {
            self.encode(circuit)?
        };
        self.submit(wire, shots)
    }

    /// Submit an already encoded script. It is decoded and validated
    /// against the target, bypassing synthesis.
    #[instrument(skip_all, fields(backend = %self.name))]
    pub fn run_wire_script(&self, script: &str, options: RunOptions) -> HalResult<Job> {
        let shots = self.check_shots(options.shots)?;
        let mut circuit = quic_wire::decode(script)?;
        if options.add_measurements {
            circuit.measure_all()?;
        }
        self.target.validate(&circuit)?;
        self.submit(quic_wire::encode(&circuit), shots)
    }

    /// Look up a job submitted through this backend.
    ///
    /// A job is forgotten once every handle to it is dropped and its worker
    /// has finished.
    pub fn job(&self, id: &JobId) -> HalResult<Job> {
        self.lock()
            .jobs
            .get(id)
            .and_then(WeakJob::upgrade)
            .ok_or_else(|| HalError::JobNotFound(id.to_string()))
    }

    /// Current status of a job.
    pub fn status(&self, id: &JobId) -> HalResult<JobStatus> {
        Ok(self.job(id)?.status())
    }

    /// Wait for a job using the configured poll interval and timeout.
    pub async fn result(&self, id: &JobId) -> HalResult<ExecutionResult> {
        let job = self.job(id)?;
        job.result(self.config.retrieval_options()).await
    }

    /// Snapshots of every live job, oldest first.
    pub fn jobs(&self) -> Vec<JobInfo> {
        let mut jobs: Vec<_> = self
            .lock()
            .jobs
            .values()
            .filter_map(WeakJob::upgrade)
            .map(|job| job.info())
            .collect();
        jobs.sort_by_key(|job| job.created_at);
        jobs
    }

    fn check_shots(&self, shots: Option<u32>) -> HalResult<u32> {
        let shots = shots.unwrap_or(self.config.default_shots);
        if !(1..=self.config.max_shots).contains(&shots) {
            return Err(HalError::InvalidShots {
                shots,
                max: self.config.max_shots,
            });
        }
        Ok(shots)
    }

    fn submit(&self, wire: WireString, shots: u32) -> HalResult<Job> {
        let mut state = self.lock();
        // The backend stream only advances for jobs that actually started.
        let mut rng = state.rng.clone();
        let seed = rng.gen_range(0..SEED_BOUND);
        let id = JobId::new(format!("{}_{}_{}_{}", self.name, seed, shots, state.submitted));

        let job = Job::new(JobSpec {
            id: id.clone(),
            backend_name: self.name.clone(),
            wire,
            shots,
            seed,
        });
        job.submit(Arc::clone(&self.transport))?;

        state.rng = rng;
        state.submitted += 1;
        state.jobs.retain(|_, weak| !weak.is_dropped());
        state.jobs.insert(id, job.downgrade());
        Ok(job)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
