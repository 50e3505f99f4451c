// ClaimAudit - core/audit.rs
//
// The audit query catalog: three fixed queries over a loaded claim table.
// Core layer: pure functions of the table (and cost range), no I/O.
//
// Each query is an explicit in-memory algorithm:
//   - Duplicate Claims: group-by-count with a HAVING count > 1 filter.
//   - Early Refills: partitioned lag of fill_date.
//   - High-Cost Claims: range filter plus a partitioned average computed
//     over the whole table.
//
// Groups and partitions are keyed by BTreeMap so the same table always
// yields the same rows in the same order.

use crate::core::model::{AuditResult, ClaimTable, Value};
use crate::util::constants::{DEFAULT_MAX_COST, DEFAULT_MIN_COST};
use crate::util::error::AuditError;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the high-cost audit's score column.
pub const RISK_SCORE_COLUMN: &str = "risk_score";

/// The three audits offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuditKind {
    #[default]
    DuplicateClaims,
    EarlyRefills,
    HighCostRiskScore,
}

impl AuditKind {
    /// Returns all variants in menu order.
    pub fn all() -> &'static [AuditKind] {
        &[
            AuditKind::DuplicateClaims,
            AuditKind::EarlyRefills,
            AuditKind::HighCostRiskScore,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            AuditKind::DuplicateClaims => "Duplicate Claims",
            AuditKind::EarlyRefills => "Early Refills",
            AuditKind::HighCostRiskScore => "High-Cost Claims with Risk Score",
        }
    }

    /// Table columns the audit reads.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            AuditKind::DuplicateClaims => {
                &["patient_id", "drug_ndc", "prescriber_id", "fill_date"]
            }
            AuditKind::EarlyRefills => &[
                "patient_id",
                "drug_ndc",
                "pharmacy_id",
                "fill_date",
                "days_supply",
            ],
            AuditKind::HighCostRiskScore => {
                &["claim_id", "pharmacy_id", "drug_ndc", "submitted_cost"]
            }
        }
    }

    /// Columns of the audit's result, in output order.
    pub fn output_columns(&self) -> &'static [&'static str] {
        match self {
            AuditKind::DuplicateClaims => &[
                "patient_id",
                "drug_ndc",
                "prescriber_id",
                "fill_date",
                "claim_count",
            ],
            AuditKind::EarlyRefills => &[
                "patient_id",
                "drug_ndc",
                "pharmacy_id",
                "fill_date",
                "days_supply",
                "previous_fill_date",
            ],
            AuditKind::HighCostRiskScore => &[
                "claim_id",
                "pharmacy_id",
                "drug_ndc",
                "submitted_cost",
                "avg_cost",
                RISK_SCORE_COLUMN,
            ],
        }
    }

    /// Caveat shown with the audit's results, if any.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            AuditKind::EarlyRefills => Some(
                "Every fill is listed with its previous fill date. Early refills are not \
                 flagged: compare previous_fill_date + days_supply against fill_date.",
            ),
            AuditKind::HighCostRiskScore => Some(
                "avg_cost is the mean over all claims for the drug, including claims \
                 outside the cost range. A zero mean gives an undefined risk score.",
            ),
            AuditKind::DuplicateClaims => None,
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive submitted-cost bounds for the high-cost audit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl Default for CostRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_COST,
            max: DEFAULT_MAX_COST,
        }
    }
}

impl CostRange {
    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, cost: f64) -> bool {
        self.min <= cost && cost <= self.max
    }
}

/// Execute one audit against a table.
///
/// Fails with `MissingColumns` (naming every absent column) before doing any
/// work if the table lacks a column the audit reads.
pub fn run_audit(
    table: &ClaimTable,
    kind: AuditKind,
    range: &CostRange,
) -> Result<AuditResult, AuditError> {
    let cols = table
        .resolve_columns(kind.required_columns())
        .map_err(|missing| AuditError::MissingColumns {
            audit: kind,
            missing,
        })?;

    let rows = match kind {
        AuditKind::DuplicateClaims => duplicate_claims(table, &cols),
        AuditKind::EarlyRefills => early_refills(table, &cols),
        AuditKind::HighCostRiskScore => high_cost_claims(table, &cols, range),
    };

    Ok(AuditResult {
        audit: kind,
        columns: kind
            .output_columns()
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
        rows,
    })
}

/// Group by (patient, drug, prescriber, fill date); keep groups of 2+.
///
/// `cols` holds the positions of patient_id, drug_ndc, prescriber_id, fill_date.
fn duplicate_claims(table: &ClaimTable, cols: &[usize]) -> Vec<Vec<Value>> {
    let mut groups: BTreeMap<Vec<Value>, i64> = BTreeMap::new();
    for row in &table.rows {
        let key: Vec<Value> = cols.iter().map(|&c| row[c].clone()).collect();
        *groups.entry(key).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(mut key, count)| {
            key.push(Value::Integer(count));
            key
        })
        .collect()
}

/// Previous fill date within each (patient, drug) partition.
///
/// `cols` holds the positions of patient_id, drug_ndc, pharmacy_id,
/// fill_date, days_supply.
fn early_refills(table: &ClaimTable, cols: &[usize]) -> Vec<Vec<Value>> {
    let (patient, drug, pharmacy, fill_date, days_supply) =
        (cols[0], cols[1], cols[2], cols[3], cols[4]);

    let mut partitions: BTreeMap<(Value, Value), Vec<&Vec<Value>>> = BTreeMap::new();
    for row in &table.rows {
        partitions
            .entry((row[patient].clone(), row[drug].clone()))
            .or_default()
            .push(row);
    }

    let mut out = Vec::with_capacity(table.row_count());
    for (_, mut fills) in partitions {
        // Stable: fills on the same date keep their file order.
        fills.sort_by(|a, b| a[fill_date].cmp(&b[fill_date]));

        let mut previous = Value::Null;
        for row in fills {
            out.push(vec![
                row[patient].clone(),
                row[drug].clone(),
                row[pharmacy].clone(),
                row[fill_date].clone(),
                row[days_supply].clone(),
                previous,
            ]);
            previous = row[fill_date].clone();
        }
    }
    out
}

/// Claims inside the cost range, scored against their drug's mean cost.
///
/// `cols` holds the positions of claim_id, pharmacy_id, drug_ndc,
/// submitted_cost.
fn high_cost_claims(table: &ClaimTable, cols: &[usize], range: &CostRange) -> Vec<Vec<Value>> {
    let (claim, pharmacy, drug, cost) = (cols[0], cols[1], cols[2], cols[3]);

    // The mean covers every claim for the drug, not only those in range.
    let mut totals: BTreeMap<&Value, (f64, u64)> = BTreeMap::new();
    for row in &table.rows {
        if let Some(c) = row[cost].as_f64() {
            let entry = totals.entry(&row[drug]).or_insert((0.0, 0));
            entry.0 += c;
            entry.1 += 1;
        }
    }

    table
        .rows
        .iter()
        .filter_map(|row| {
            let submitted = row[cost].as_f64().filter(|c| range.contains(*c))?;
            let (sum, n) = totals.get(&row[drug]).copied()?;
            let mean = sum / n as f64;
            Some(vec![
                row[claim].clone(),
                row[pharmacy].clone(),
                row[drug].clone(),
                row[cost].clone(),
                Value::Float(mean),
                risk_score(submitted, mean),
            ])
        })
        .collect()
}

/// Percentage deviation of `cost` from `mean`; undefined for a zero mean.
pub fn risk_score(cost: f64, mean: f64) -> Value {
    if mean == 0.0 {
        Value::Undefined
    } else {
        Value::Float((cost - mean) / mean * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::load_csv;

    fn table(text: &str) -> ClaimTable {
        load_csv(text.as_bytes(), "test.csv").unwrap()
    }

    fn texts(row: &[Value]) -> Vec<String> {
        row.iter().map(Value::to_text).collect()
    }

    const HEADER: &str =
        "claim_id,patient_id,drug_ndc,prescriber_id,pharmacy_id,fill_date,days_supply,submitted_cost\n";

    #[test]
    fn test_duplicate_group_reported_with_count() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P1,N1,D1,34,2024-01-01,30,100\n\
             3,P1,N1,D1,12,2024-01-01,30,100\n\
             4,P2,N1,D1,12,2024-01-01,30,100\n"
        ));
        let result = run_audit(&t, AuditKind::DuplicateClaims, &CostRange::default()).unwrap();
        assert_eq!(result.columns.last().unwrap(), "claim_count");
        assert_eq!(result.row_count(), 1);
        assert_eq!(
            texts(&result.rows[0]),
            vec!["P1", "N1", "D1", "2024-01-01", "3"]
        );
    }

    #[test]
    fn test_unique_keys_give_empty_duplicates() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P1,N1,D1,12,2024-01-02,30,100\n\
             3,P1,N2,D1,12,2024-01-01,30,100\n"
        ));
        let result = run_audit(&t, AuditKind::DuplicateClaims, &CostRange::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicate_groups_are_ordered_by_key() {
        let t = table(&format!(
            "{HEADER}\
             1,P9,N1,D1,12,2024-01-01,30,100\n\
             2,P9,N1,D1,12,2024-01-01,30,100\n\
             3,P1,N1,D1,12,2024-01-01,30,100\n\
             4,P1,N1,D1,12,2024-01-01,30,100\n"
        ));
        let result = run_audit(&t, AuditKind::DuplicateClaims, &CostRange::default()).unwrap();
        let patients: Vec<_> = result.rows.iter().map(|r| r[0].to_text()).collect();
        assert_eq!(patients, vec!["P1", "P9"]);
    }

    #[test]
    fn test_previous_fill_date_within_partition() {
        // Fills listed out of order; a second drug shares the patient.
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-03-01,30,10\n\
             2,P1,N1,D1,12,2024-01-01,30,10\n\
             3,P1,N2,D1,12,2024-01-15,30,10\n\
             4,P1,N1,D1,34,2024-02-01,30,10\n"
        ));
        let result = run_audit(&t, AuditKind::EarlyRefills, &CostRange::default()).unwrap();
        assert_eq!(result.row_count(), 4);
        let rows: Vec<Vec<String>> = result.rows.iter().map(|r| texts(r)).collect();
        assert_eq!(rows[0], vec!["P1", "N1", "12", "2024-01-01", "30", ""]);
        assert_eq!(rows[1], vec!["P1", "N1", "34", "2024-02-01", "30", "2024-01-01"]);
        assert_eq!(rows[2], vec!["P1", "N1", "12", "2024-03-01", "30", "2024-02-01"]);
        assert_eq!(rows[3], vec!["P1", "N2", "12", "2024-01-15", "30", ""]);
        assert!(result.rows[3][5].is_null());
    }

    #[test]
    fn test_risk_score_against_drug_mean() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P2,N1,D1,12,2024-01-01,30,300\n"
        ));
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &CostRange::default()).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows[0][4], Value::Float(200.0));
        assert_eq!(result.rows[0][5], Value::Float(-50.0));
        assert_eq!(result.rows[1][5], Value::Float(50.0));
    }

    #[test]
    fn test_out_of_range_claim_still_counts_toward_mean() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P2,N1,D1,12,2024-01-01,30,300\n"
        ));
        let range = CostRange {
            min: 0.0,
            max: 150.0,
        };
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &range).unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.rows[0][0], Value::Integer(1));
        assert_eq!(result.rows[0][4], Value::Float(200.0));
        assert_eq!(result.rows[0][5], Value::Float(-50.0));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P2,N1,D1,12,2024-01-01,30,300\n"
        ));
        let range = CostRange {
            min: 100.0,
            max: 300.0,
        };
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &range).unwrap();
        assert_eq!(result.row_count(), 2);

        let inverted = CostRange {
            min: 300.0,
            max: 100.0,
        };
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &inverted).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_mean_gives_undefined_risk() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,0\n\
             2,P2,N1,D1,12,2024-01-01,30,0\n"
        ));
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &CostRange::default()).unwrap();
        assert_eq!(result.rows[0][5], Value::Undefined);
        assert_eq!(result.rows[0][5].to_text(), "undefined");
    }

    #[test]
    fn test_missing_columns_named() {
        let t = table("claim_id,patient_id\n1,P1\n");
        let err = run_audit(&t, AuditKind::EarlyRefills, &CostRange::default()).unwrap_err();
        assert_eq!(
            err,
            AuditError::MissingColumns {
                audit: AuditKind::EarlyRefills,
                missing: vec![
                    "drug_ndc".to_string(),
                    "pharmacy_id".to_string(),
                    "fill_date".to_string(),
                    "days_supply".to_string(),
                ],
            }
        );
        // Other audits are unaffected by the failure.
        let t = table("claim_id,pharmacy_id,drug_ndc,submitted_cost\n1,12,N1,5\n");
        assert!(run_audit(&t, AuditKind::HighCostRiskScore, &CostRange::default()).is_ok());
    }

    #[test]
    fn test_missing_fill_date_sorts_first() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-02-01,30,10\n\
             2,P1,N1,D1,12,NA,30,10\n\
             3,P1,N1,D1,12,2024-03-01,30,10\n"
        ));
        let result = run_audit(&t, AuditKind::EarlyRefills, &CostRange::default()).unwrap();
        assert_eq!(result.row_count(), 3);
        assert!(result.rows[0][3].is_null());
        assert!(result.rows[0][5].is_null());
        // The fill after the undated one inherits a missing previous date.
        assert_eq!(result.rows[1][3].to_text(), "2024-02-01");
        assert!(result.rows[1][5].is_null());
        assert_eq!(result.rows[2][5].to_text(), "2024-02-01");
    }

    #[test]
    fn test_non_numeric_cost_excluded() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P2,N1,D1,12,2024-01-01,30,NA\n\
             3,P3,N1,D1,12,2024-01-01,30,300\n"
        ));
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &CostRange::default()).unwrap();
        let claims: Vec<_> = result.rows.iter().map(|r| r[0].to_text()).collect();
        assert_eq!(claims, vec!["1", "3"]);
        assert_eq!(result.rows[0][4], Value::Float(200.0));

        // A cost column that is text throughout yields no rows, not an error.
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,n/a-pending\n\
             2,P2,N1,D1,12,2024-01-01,30,100\n"
        ));
        let result = run_audit(&t, AuditKind::HighCostRiskScore, &CostRange::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_audit_is_idempotent() {
        let t = table(&format!(
            "{HEADER}\
             1,P1,N1,D1,12,2024-01-01,30,100\n\
             2,P1,N1,D1,12,2024-01-01,30,250\n\
             3,P2,N2,D2,34,2024-01-09,90,40\n"
        ));
        for kind in AuditKind::all() {
            let a = run_audit(&t, *kind, &CostRange::default()).unwrap();
            let b = run_audit(&t, *kind, &CostRange::default()).unwrap();
            assert_eq!(a, b, "{kind} must be deterministic");
        }
    }
}
