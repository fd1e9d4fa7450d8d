//! Demo workloads on the local endpoint.

use quic_demos::{Workload, run_local, scenario_circuit};
use quic_hal::{BackendConfig, HalError};
use quic_ir::Circuit;

fn config() -> BackendConfig {
    BackendConfig {
        seed: 11,
        poll_interval_ms: 1,
        ..BackendConfig::default()
    }
}

#[tokio::test]
async fn test_scenario_report() {
    let report = run_local(
        Workload::Circuit(scenario_circuit().unwrap()),
        2,
        None,
        config(),
    )
    .await
    .unwrap();

    assert_eq!(report.backend, "quic_simulator");
    assert_eq!(report.wire, "XI,CN,mm.");
    assert_eq!(report.shots, 10);
    assert_eq!(report.counts, vec![("11".to_string(), 10)]);
    assert!(report.job_id.starts_with("quic_simulator_"));
}

#[tokio::test]
async fn test_bell_report_serializes() {
    let report = run_local(
        Workload::Circuit(Circuit::bell().unwrap()),
        2,
        Some(64),
        config(),
    )
    .await
    .unwrap();

    let total: u64 = report.counts.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 64);
    assert!(report.counts.iter().all(|(b, _)| b == "00" || b == "11"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["wire"], "HI,CN,mm.");
    assert_eq!(json["shots"], 64);
}

#[tokio::test]
async fn test_wire_workload() {
    let report = run_local(Workload::Wire("IX,Im.".into()), 2, Some(3), config())
        .await
        .unwrap();
    assert_eq!(report.counts, vec![("01".to_string(), 3)]);
}

#[tokio::test]
async fn test_bad_wire_is_reported() {
    let err = run_local(Workload::Wire("IX,Im".into()), 2, Some(3), config())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Wire(_)));
}
