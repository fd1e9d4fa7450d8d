//! Circuits run through a backend connected to the local endpoint.

use std::sync::Arc;
use std::time::Duration;

use quic_adapter_sim::{DEFAULT_NAME, LocalEndpoint};
use quic_hal::{
    BackendConfig, EndpointInfo, HalError, JobStatus, Provider, QuicBackend, RetrievalOptions,
    RunOptions,
};
use quic_ir::{Circuit, QubitId};

fn fast_config(seed: u64) -> BackendConfig {
    BackendConfig {
        seed,
        poll_interval_ms: 1,
        ..BackendConfig::default()
    }
}

async fn connect(num_qubits: u32) -> QuicBackend {
    QuicBackend::connect(Arc::new(LocalEndpoint::new(num_qubits)), fast_config(7))
        .await
        .unwrap()
}

#[tokio::test]
async fn scenario_always_measures_eleven() {
    let backend = connect(2).await;
    let mut circuit = Circuit::with_size("x_cx", 2);
    circuit
        .x(QubitId(0))
        .unwrap()
        .cx(QubitId(0), QubitId(1))
        .unwrap()
        .measure(QubitId(0))
        .unwrap()
        .measure(QubitId(1))
        .unwrap();

    assert_eq!(backend.encode(&circuit).unwrap().as_str(), "XI,CN,mm.");

    let job = backend.run(&circuit, RunOptions::default()).unwrap();
    let result = job.wait(None).await.unwrap();
    assert_eq!(job.status(), JobStatus::Done);
    assert_eq!(result.counts.get("11"), Some(10));
    assert_eq!(result.counts.len(), 1);
}

#[tokio::test]
async fn bell_pair_is_correlated() {
    let backend = connect(2).await;
    let job = backend
        .run(&Circuit::bell().unwrap(), RunOptions::default().with_shots(200))
        .unwrap();
    let result = job
        .result(RetrievalOptions::default().with_poll_interval(Duration::from_millis(1)))
        .await
        .unwrap();

    let correlated = result.counts.get("00").unwrap_or(0) + result.counts.get("11").unwrap_or(0);
    assert_eq!(correlated, 200);
    assert_eq!(result.counts.total_shots(), 200);
}

#[tokio::test]
async fn ghz_outcomes() {
    let backend = connect(3).await;
    let job = backend
        .run(&Circuit::ghz(3).unwrap(), RunOptions::default().with_shots(100))
        .unwrap();
    let result = job.wait(None).await.unwrap();
    for (bitstring, _) in result.counts.iter() {
        assert!(bitstring == "000" || bitstring == "111", "{bitstring}");
    }
}

#[tokio::test]
async fn bit_strings_are_qubit_zero_first() {
    let backend = connect(3).await;
    let mut circuit = Circuit::with_size("first", 3);
    circuit.x(QubitId(0)).unwrap();
    let result = backend
        .run(&circuit, RunOptions::default().with_shots(5).with_measurements())
        .unwrap()
        .wait(None)
        .await
        .unwrap();
    assert_eq!(result.counts.get("100"), Some(5));
}

#[tokio::test]
async fn same_backend_seed_same_memory() {
    let run = || async {
        let backend = connect(2).await;
        backend
            .run(&Circuit::bell().unwrap(), RunOptions::default().with_shots(50))
            .unwrap()
            .wait(None)
            .await
            .unwrap()
            .memory
    };
    assert_eq!(run().await, run().await);
}

#[tokio::test]
async fn restricted_endpoint_gets_expanded_phase_gates() {
    let info = EndpointInfo {
        name: "phase_only".into(),
        num_qubits: 1,
        gate_names: vec!["X".into(), "P45".into(), "m".into()],
    };
    let backend = QuicBackend::new(info, Arc::new(LocalEndpoint::new(1)), fast_config(0)).unwrap();

    let mut circuit = Circuit::with_size("phase", 1);
    circuit
        .x(QubitId(0))
        .unwrap()
        .s(QubitId(0))
        .unwrap()
        .measure(QubitId(0))
        .unwrap();

    assert_eq!(backend.encode(&circuit).unwrap().as_str(), "X,P,P,m.");
    let result = backend
        .run(&circuit, RunOptions::default().with_shots(4))
        .unwrap()
        .wait(None)
        .await
        .unwrap();
    assert_eq!(result.counts.get("1"), Some(4));
}

#[tokio::test]
async fn oversized_script_fails_the_job() {
    let info = EndpointInfo {
        name: "liar".into(),
        num_qubits: 3,
        gate_names: vec!["X".into(), "m".into()],
    };
    let backend = QuicBackend::new(info, Arc::new(LocalEndpoint::new(1)), fast_config(0)).unwrap();
    let job = backend
        .run_wire_script("XXX,mmm.", RunOptions::default().with_shots(3))
        .unwrap();

    assert!(matches!(
        job.wait(None).await,
        Err(HalError::ExecutionFailed { .. })
    ));
    assert!(matches!(job.status(), JobStatus::Error(_)));
}

#[tokio::test]
async fn provider_hands_out_the_local_backend() {
    let mut provider = Provider::new();
    provider
        .connect(Arc::new(LocalEndpoint::new(2)), fast_config(1))
        .await
        .unwrap();

    let backend = provider.get_backend(DEFAULT_NAME).unwrap();
    let job = backend
        .run_wire_script("XI,CN.", RunOptions::default().with_shots(2).with_measurements())
        .unwrap();
    let result = backend.result(job.id()).await.unwrap();
    assert_eq!(result.memory, vec!["11", "11"]);
    assert_eq!(backend.jobs().len(), 1);
}
