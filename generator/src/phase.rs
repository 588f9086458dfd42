//! Evaluation phases and the accessor affixes each one selects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Affixes used when emitting code for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAffixes {
    pub field_accessor: &'static str,
    pub variable_accessor: &'static str,
    pub method_suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationPhase {
    Current,
    Old,
    Estimated,
}

impl EvaluationPhase {
    /// Dispatch methods are emitted in this order.
    pub const ALL: [EvaluationPhase; 3] = [
        EvaluationPhase::Current,
        EvaluationPhase::Old,
        EvaluationPhase::Estimated,
    ];

    // Estimated reads the current field value but the estimated variable value.
    pub const fn affixes(self) -> PhaseAffixes {
        match self {
            EvaluationPhase::Current => PhaseAffixes {
                field_accessor: "",
                variable_accessor: "",
                method_suffix: "",
            },
            EvaluationPhase::Old => PhaseAffixes {
                field_accessor: "Old",
                variable_accessor: "Old",
                method_suffix: "Old",
            },
            EvaluationPhase::Estimated => PhaseAffixes {
                field_accessor: "",
                variable_accessor: "Estimated",
                method_suffix: "Estimated",
            },
        }
    }

    /// Getter invoked on a field holder, e.g. `getOldValue`.
    pub fn field_getter(self) -> String {
        format!("get{}Value", self.affixes().field_accessor)
    }

    /// Getter invoked on a variable holder, e.g. `getEstimatedValue`.
    pub fn variable_getter(self) -> String {
        format!("get{}Value", self.affixes().variable_accessor)
    }

    /// Name of the dispatch method emitted for this phase.
    pub fn method_name(self) -> String {
        format!("evaluate{}", self.affixes().method_suffix)
    }
}

impl fmt::Display for EvaluationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationPhase::Current => write!(f, "current"),
            EvaluationPhase::Old => write!(f, "old"),
            EvaluationPhase::Estimated => write!(f, "estimated"),
        }
    }
}

impl FromStr for EvaluationPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" | "default" => Ok(EvaluationPhase::Current),
            "old" => Ok(EvaluationPhase::Old),
            "estimated" => Ok(EvaluationPhase::Estimated),
            other => Err(format!(
                "Unknown evaluation phase '{}' (expected current, old or estimated)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_affix_table() {
        assert_eq!(EvaluationPhase::Current.field_getter(), "getValue");
        assert_eq!(EvaluationPhase::Current.variable_getter(), "getValue");
        assert_eq!(EvaluationPhase::Current.method_name(), "evaluate");

        assert_eq!(EvaluationPhase::Old.field_getter(), "getOldValue");
        assert_eq!(EvaluationPhase::Old.variable_getter(), "getOldValue");
        assert_eq!(EvaluationPhase::Old.method_name(), "evaluateOld");

        assert_eq!(EvaluationPhase::Estimated.field_getter(), "getValue");
        assert_eq!(
            EvaluationPhase::Estimated.variable_getter(),
            "getEstimatedValue"
        );
        assert_eq!(EvaluationPhase::Estimated.method_name(), "evaluateEstimated");
    }

    #[test]
    fn test_parse_phase() {
        assert_eq!("old".parse::<EvaluationPhase>(), Ok(EvaluationPhase::Old));
        assert_eq!("Default".parse::<EvaluationPhase>(), Ok(EvaluationPhase::Current));
        assert_eq!("ESTIMATED".parse::<EvaluationPhase>(), Ok(EvaluationPhase::Estimated));
        assert!("future".parse::<EvaluationPhase>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for phase in EvaluationPhase::ALL {
            assert_eq!(phase.to_string().parse::<EvaluationPhase>(), Ok(phase));
        }
    }
}
