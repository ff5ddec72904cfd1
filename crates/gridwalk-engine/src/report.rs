//! Text report and heatmap output.
//!
//! A report lists every evaluated policy, one row each: the eight direction
//! weights normalized to sum to 1, the rate, and the figure of merit, all
//! fixed to five decimals in seven-wide fields.
//!
//! ```text
//! Entries: 2
//! 0.12500 0.12500 0.12500 0.12500 0.12500 0.12500 0.12500 0.12500 1.00000 0.00873
//! ...
//! All Monte Carlo walks ran with 10000 samples
//! Maximum steps allowed per walk was 100,000
//! ```

use std::fmt;
use std::io::{self, Write};

use gridwalk_core::{PolicyParameters, WalkRecord};

use crate::error::ReportError;

/// Fields in a report row: a policy row plus the figure of merit.
pub const ROW_FIELDS: usize = PolicyParameters::ROW_LEN + 1;

/// Format one report row, without the line terminator.
pub fn format_row(policy: &PolicyParameters, fom: f64) -> String {
    let mut row = String::new();
    for weight in policy.normalized_weights() {
        row.push_str(&format!("{weight:>7.5} "));
    }
    row.push_str(&format!("{:>7.5} {fom:>7.5}", policy.rate()));
    row
}

/// Read back a row written by [`format_row`].
///
/// # Errors
///
/// `WrongFieldCount` unless the row has exactly ten fields,
/// `InvalidNumber` for a field that is not a float, and `Policy` if the
/// weights and rate are not a valid policy.
pub fn parse_report_row(line: &str) -> Result<(PolicyParameters, f64), ReportError> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ReportError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != ROW_FIELDS {
        return Err(ReportError::WrongFieldCount {
            expected: ROW_FIELDS,
            found: values.len(),
        });
    }
    let policy = PolicyParameters::from_row(&values[..PolicyParameters::ROW_LEN])?;
    Ok((policy, values[PolicyParameters::ROW_LEN]))
}

/// Write the full report for `records`.
pub fn write_report<W: Write>(
    out: &mut W,
    records: &[WalkRecord],
    samples: u64,
    max_steps: u64,
) -> io::Result<()> {
    writeln!(out, "Entries: {}", records.len())?;
    for record in records {
        writeln!(out, "{}", format_row(&record.policy, record.fom()))?;
    }
    writeln!(out, "All Monte Carlo walks ran with {samples} samples")?;
    writeln!(
        out,
        "Maximum steps allowed per walk was {}",
        group_thousands(max_steps)
    )
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ── Heatmap ─────────────────────────────────────────────────────

/// Average visits per history for every cell of the grid after one walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    /// What was walked, e.g. `walk 3`.
    pub label: String,
    /// Histories the counts were averaged over.
    pub histories: u64,
    /// One `Vec` per grid row, `y = 0` first.
    pub density: Vec<Vec<f64>>,
}

impl Heatmap {
    /// Bundle a density grid.
    pub fn new(label: impl Into<String>, histories: u64, density: Vec<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            histories,
            density,
        }
    }

    /// Largest density in the map, 0 for an empty map.
    pub fn peak(&self) -> f64 {
        self.density
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Heatmap {
    /// A label line, then one line per grid row with eight-wide cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} histories)", self.label, self.histories)?;
        for row in &self.density {
            for cell in row {
                write!(f, "{cell:>8.5} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
