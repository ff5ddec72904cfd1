//! Batch specifications: which policies to evaluate and how.
//!
//! ```text
//! Entries <N>                        | Optimization <N>
//! Samples <histories per walk>
//! Print Spatial Distributions <0|1>
//! <N rows of 9 numbers>              | (nothing)
//! ```
//!
//! Label tokens are skipped without being checked. Each entry row holds
//! the eight direction weights in compass order, North first, then the
//! rate.

use std::str::{FromStr, SplitWhitespace};

use gridwalk_core::PolicyParameters;

use crate::config::{ConfigError, WalkConfig};

/// What the manager does with a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchMode {
    /// Evaluate these policies in order, after the analog policy.
    Entries(Vec<PolicyParameters>),
    /// Run a simulated-annealing search with this many evaluations,
    /// the analog walk included.
    Optimization {
        /// Evaluation budget `N`.
        evaluations: u64,
    },
}

/// A parsed batch specification.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchSpec {
    /// Entries or optimization.
    pub mode: BatchMode,
    /// Histories per walk.
    pub samples: u64,
    /// Emit per-cell visit densities.
    pub print_spatial: bool,
}

impl BatchSpec {
    /// Parse a batch specification.
    ///
    /// # Errors
    ///
    /// `UnknownMode` for an unrecognized keyword, `MissingField` or
    /// `InvalidValue` for short or malformed input, `Policy` for an entry
    /// row that is not a valid policy, and `TrailingData` if tokens remain.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = Tokens {
            inner: text.split_whitespace(),
        };

        let keyword = tokens.next("mode keyword")?;
        let optimize = match keyword {
            "Entries" | "entries" => false,
            "Optimization" | "optimization" => true,
            other => {
                return Err(ConfigError::UnknownMode {
                    keyword: other.to_string(),
                })
            }
        };
        let count = tokens.parse::<u64>("mode count")?;

        tokens.skip(1, "samples label")?;
        let samples = tokens.samples()?;

        tokens.skip(3, "spatial distribution label")?;
        let print_spatial = tokens.flag()?;

        let mode = if optimize {
            BatchMode::Optimization { evaluations: count }
        } else {
            let mut entries = Vec::new();
            for index in 1..=count {
                let mut row = [0.0; PolicyParameters::ROW_LEN];
                for value in &mut row {
                    *value = tokens.parse::<f64>("policy value")?;
                }
                let policy =
                    PolicyParameters::from_row(&row).map_err(|source| ConfigError::Policy {
                        index: index as usize,
                        source,
                    })?;
                entries.push(policy);
            }
            BatchMode::Entries(entries)
        };

        let trailing = tokens.inner.count();
        if trailing > 0 {
            return Err(ConfigError::TrailingData { count: trailing });
        }

        let spec = Self {
            mode,
            samples,
            print_spatial,
        };
        spec.walk_config().validate()?;
        Ok(spec)
    }

    /// `true` in optimization mode.
    pub fn is_optimization(&self) -> bool {
        matches!(self.mode, BatchMode::Optimization { .. })
    }

    /// Walk configuration implied by this batch; everything else default.
    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig {
            num_samples: self.samples,
            track_visits: self.print_spatial,
            ..WalkConfig::default()
        }
    }
}

impl FromStr for BatchSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ConfigError> {
        self.inner.next().ok_or(ConfigError::MissingField { field })
    }

    fn skip(&mut self, count: usize, field: &'static str) -> Result<(), ConfigError> {
        for _ in 0..count {
            self.next(field)?;
        }
        Ok(())
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, ConfigError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| ConfigError::InvalidValue {
            field,
            token: token.to_string(),
        })
    }

    /// History count, written either as an integer or as an integral
    /// float such as `1e4`.
    fn samples(&mut self) -> Result<u64, ConfigError> {
        let field = "samples";
        let token = self.next(field)?;
        if let Ok(n) = token.parse::<u64>() {
            return Ok(n);
        }
        match token.parse::<f64>() {
            Ok(x) if x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= u64::MAX as f64 => {
                Ok(x as u64)
            }
            _ => Err(ConfigError::InvalidValue {
                field,
                token: token.to_string(),
            }),
        }
    }

    fn flag(&mut self) -> Result<bool, ConfigError> {
        let field = "spatial distribution flag";
        let token = self.next(field)?;
        match token {
            "1" | "true" | "True" => Ok(true),
            "0" | "false" | "False" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                field,
                token: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::PolicyError;

    const ENTRIES: &str = "\
Entries 2
Samples 1000
Print Spatial Distributions 1
0.125 0.125 0.125 0.125 0.125 0.125 0.125 0.125 1.0
1 1 2 2 4 2 1 1 0.8
";

    #[test]
    fn parses_entries() {
        let spec = BatchSpec::parse(ENTRIES).unwrap();
        assert_eq!(spec.samples, 1000);
        assert!(spec.print_spatial);
        assert!(!spec.is_optimization());
        let BatchMode::Entries(entries) = &spec.mode else {
            panic!("expected entries mode");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_analog());
        assert_eq!(entries[1].rate(), 0.8);
        assert_eq!(entries[1].weights()[4], 4.0);
    }

    #[test]
    fn parses_optimization() {
        let spec: BatchSpec = "optimization 50\nSamples 1e4\nPrint Spatial Distributions false\n"
            .parse()
            .unwrap();
        assert_eq!(spec.mode, BatchMode::Optimization { evaluations: 50 });
        assert_eq!(spec.samples, 10_000);
        assert!(!spec.print_spatial);
        assert_eq!(spec.walk_config().num_samples, 10_000);
        assert!(!spec.walk_config().track_visits);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(
            BatchSpec::parse("Training 3 Samples 10 Print Spatial Distributions 0"),
            Err(ConfigError::UnknownMode {
                keyword: "Training".into()
            })
        );
    }

    #[test]
    fn malformed_fields_are_reported() {
        assert_eq!(
            BatchSpec::parse("Entries 1 Samples 10"),
            Err(ConfigError::MissingField {
                field: "spatial distribution label"
            })
        );
        assert_eq!(
            BatchSpec::parse("Entries 0 Samples 2.5 Print Spatial Distributions 0"),
            Err(ConfigError::InvalidValue {
                field: "samples",
                token: "2.5".into()
            })
        );
        assert!(matches!(
            BatchSpec::parse("Entries 0 Samples 10 Print Spatial Distributions yes"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            BatchSpec::parse("Entries 0 Samples 0 Print Spatial Distributions 0"),
            Err(ConfigError::ZeroSamples)
        );
    }

    #[test]
    fn entry_rows_are_validated() {
        let text = "Entries 1 Samples 10 Print Spatial Distributions 0 1 1 1 1 1 1 1 1 -2";
        assert!(matches!(
            BatchSpec::parse(text),
            Err(ConfigError::Policy {
                index: 1,
                source: PolicyError::InvalidRate { .. }
            })
        ));
        let short = "Entries 1 Samples 10 Print Spatial Distributions 0 1 1 1";
        assert_eq!(
            BatchSpec::parse(short),
            Err(ConfigError::MissingField {
                field: "policy value"
            })
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(
            BatchSpec::parse("Optimization 5 Samples 10 Print Spatial Distributions 0 extra"),
            Err(ConfigError::TrailingData { count: 1 })
        );
    }
}
