// ClaimAudit - tests/e2e_audit.rs
//
// End-to-end tests for the load, audit, filter, and export pipeline.
//
// These tests read real CSV fixtures from disk through the same session
// the GUI uses, with no mocks. They cover the path from a raw claims file
// to the rows a user sees and exports.

use claimaudit::app::session::{AuditRequest, AuditSession};
use claimaudit::core::audit::{AuditKind, CostRange};
use claimaudit::core::export;
use claimaudit::core::filter::FilterState;
use claimaudit::core::model::{AuditOutcome, ColumnType, Value};
use claimaudit::util::constants::DEFAULT_MAX_UPLOAD_BYTES;
use claimaudit::util::error::{AuditError, ClaimAuditError, IngestError};
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A session with the sample claims file loaded.
fn sample_session() -> AuditSession {
    let mut session = AuditSession::new();
    session
        .load_path(&fixture("claims_sample.csv"), DEFAULT_MAX_UPLOAD_BYTES)
        .expect("sample fixture should load");
    session
}

fn run(session: &AuditSession, kind: AuditKind) -> AuditOutcome {
    session
        .run_audit(&AuditRequest {
            kind,
            ..Default::default()
        })
        .unwrap()
}

fn texts(row: &[Value]) -> Vec<String> {
    row.iter().map(Value::to_text).collect()
}

/// Render an outcome to CSV in memory.
fn csv_bytes(outcome: &AuditOutcome) -> Vec<u8> {
    let mut buf = Vec::new();
    export::export_csv(outcome, &mut buf, Path::new("memory.csv")).unwrap();
    buf
}

// =============================================================================
// Ingestion E2E
// =============================================================================

#[test]
fn e2e_loads_sample_with_inferred_types() {
    let session = sample_session();
    let table = session.table().unwrap();

    assert_eq!(table.source_name, "claims_sample.csv");
    assert_eq!(table.row_count(), 10);

    let kind = |name: &str| table.columns[table.column_index(name).unwrap()].kind;
    assert_eq!(kind("claim_id"), ColumnType::Integer);
    assert_eq!(kind("drug_ndc"), ColumnType::Text, "NDC zeros must survive");
    assert_eq!(kind("fill_date"), ColumnType::Date);
    assert_eq!(kind("submitted_cost"), ColumnType::Float);

    let ndc = table.column_index("drug_ndc").unwrap();
    assert_eq!(table.rows[0][ndc].to_text(), "00093101001");
}

#[test]
fn e2e_ragged_file_is_rejected_and_previous_table_kept() {
    let mut session = sample_session();
    let err = session
        .load_path(&fixture("claims_ragged.csv"), DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap_err();
    assert!(matches!(err, IngestError::Csv { .. }), "got {err:?}");
    assert_eq!(session.table().unwrap().source_name, "claims_sample.csv");
}

#[test]
fn e2e_oversized_file_is_rejected() {
    let mut session = AuditSession::new();
    let err = session
        .load_path(&fixture("claims_sample.csv"), 64)
        .unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { .. }), "got {err:?}");
    assert!(!session.has_table());
}

// =============================================================================
// Audit E2E
// =============================================================================

#[test]
fn e2e_duplicate_claims() {
    let session = sample_session();
    let outcome = run(&session, AuditKind::DuplicateClaims);

    let rows: Vec<Vec<String>> = outcome.visible_rows().map(|r| texts(r)).collect();
    assert_eq!(
        rows,
        vec![
            vec!["P001", "00093101001", "D10", "2024-01-05", "2"],
            vec!["P003", "55111064501", "D12", "2024-01-10", "3"],
        ]
    );
}

#[test]
fn e2e_early_refills_lists_every_fill_with_previous_date() {
    let session = sample_session();
    let outcome = run(&session, AuditKind::EarlyRefills);

    assert_eq!(outcome.result.row_count(), 10);
    let first_three: Vec<Vec<String>> =
        outcome.visible_rows().take(3).map(|r| texts(r)).collect();
    assert_eq!(
        first_three,
        vec![
            vec!["P001", "00093101001", "PH1", "2024-01-05", "30", ""],
            vec!["P001", "00093101001", "PH1", "2024-01-05", "30", "2024-01-05"],
            vec!["P001", "00093101001", "PH2", "2024-01-25", "30", "2024-01-05"],
        ]
    );
}

#[test]
fn e2e_high_cost_scores_against_full_table_mean() {
    let session = sample_session();
    let outcome = run(&session, AuditKind::HighCostRiskScore);

    // Claim 8 (1450.00) is outside the default range.
    let claims: Vec<String> = outcome.visible_rows().map(|r| r[0].to_text()).collect();
    assert_eq!(claims, vec!["1", "2", "3", "4", "5", "6", "7", "9", "10"]);

    // Claim 6's drug mean includes the out-of-range claim 8: (40+40+1450)/3.
    let risk = outcome.result.column_index("risk_score").unwrap();
    let avg = outcome.result.column_index("avg_cost").unwrap();
    let claim_6 = &outcome.result.rows[5];
    assert_eq!(claim_6[avg], Value::Float(510.0));
    let score = claim_6[risk].as_f64().unwrap();
    assert!((score - (40.0 - 510.0) / 510.0 * 100.0).abs() < 1e-9);

    // Zero-cost drug has an undefined score, not an error.
    let claim_9 = &outcome.result.rows[7];
    assert_eq!(claim_9[risk], Value::Undefined);
}

#[test]
fn e2e_cost_range_narrows_high_cost_rows() {
    let session = sample_session();
    let outcome = session
        .run_audit(&AuditRequest {
            kind: AuditKind::HighCostRiskScore,
            range: CostRange {
                min: 100.0,
                max: 2000.0,
            },
            ..Default::default()
        })
        .unwrap();
    let claims: Vec<String> = outcome.visible_rows().map(|r| r[0].to_text()).collect();
    assert_eq!(claims, vec!["1", "2", "3", "8"]);
}

#[test]
fn e2e_missing_column_names_the_column() {
    let mut session = AuditSession::new();
    session
        .load_path(&fixture("claims_no_cost.csv"), DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap();

    // Audits that do not need submitted_cost still run.
    run(&session, AuditKind::DuplicateClaims);

    let err = session
        .run_audit(&AuditRequest {
            kind: AuditKind::HighCostRiskScore,
            ..Default::default()
        })
        .unwrap_err();
    match err {
        ClaimAuditError::Audit(AuditError::MissingColumns { missing, .. }) => {
            assert_eq!(missing, vec!["submitted_cost".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

// =============================================================================
// Filter E2E
// =============================================================================

#[test]
fn e2e_pharmacy_filter_on_high_cost() {
    let session = sample_session();
    let outcome = session
        .run_audit(&AuditRequest {
            kind: AuditKind::HighCostRiskScore,
            filter: FilterState {
                pharmacy_id: "PH2".to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();
    let claims: Vec<String> = outcome.visible_rows().map(|r| r[0].to_text()).collect();
    assert_eq!(claims, vec!["3", "9", "10"]);
    assert_eq!(outcome.result.row_count(), 9, "filter must not change the result");
}

#[test]
fn e2e_patient_and_pharmacy_filters_combine() {
    let session = sample_session();
    let outcome = session
        .run_audit(&AuditRequest {
            kind: AuditKind::EarlyRefills,
            filter: FilterState {
                pharmacy_id: "PH1".to_string(),
                patient_id: "P001".to_string(),
            },
            ..Default::default()
        })
        .unwrap();
    assert_eq!(outcome.visible.len(), 2);
    assert!(outcome
        .visible_rows()
        .all(|r| r[0].to_text() == "P001" && r[2].to_text() == "PH1"));
}

// =============================================================================
// Reload and export E2E
// =============================================================================

#[test]
fn e2e_reload_replaces_table() {
    let mut session = sample_session();
    session
        .load_path(&fixture("claims_no_cost.csv"), DEFAULT_MAX_UPLOAD_BYTES)
        .unwrap();

    let outcome = run(&session, AuditKind::EarlyRefills);
    assert_eq!(outcome.result.row_count(), 2);
    assert!(outcome.visible_rows().all(|r| r[0].to_text() == "P001"));
}

#[test]
fn e2e_repeated_runs_export_identical_bytes() {
    let session = sample_session();
    for kind in AuditKind::all() {
        let first = csv_bytes(&run(&session, *kind));
        let second = csv_bytes(&run(&session, *kind));
        assert_eq!(first, second, "{kind} export differs between runs");
    }
}

#[test]
fn e2e_export_writes_visible_rows_to_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("high_cost.csv");

    let session = sample_session();
    let outcome = session
        .run_audit(&AuditRequest {
            kind: AuditKind::HighCostRiskScore,
            filter: FilterState {
                pharmacy_id: "PH2".to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

    let file = std::fs::File::create(&dest).unwrap();
    let written = export::export_csv(&outcome, file, &dest).unwrap();
    assert_eq!(written, 3);

    let content = std::fs::read_to_string(&dest).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "claim_id,pharmacy_id,drug_ndc,submitted_cost,avg_cost,risk_score"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("9,PH2,00378180001,0,0,"));
    assert!(lines[2].ends_with("undefined"));
}
