// src/core/engine/advice.rs

use crate::core::engine::RiskModel;
use crate::core::models::{Confidence, FactRecord, FlagSet, RiskLevel};

pub const REVIEW_RED_FLAGS: &str = "Review the red flags listed above before proceeding";
pub const INSUFFICIENT_DATA: &str =
    "Not enough data could be collected; treat this result as preliminary";

/// Verdict lines, then condition-triggered lines in check order, then the
/// closing lines.
pub fn compose(
    model: &dyn RiskModel,
    verdict: RiskLevel,
    flags: &FlagSet,
    record: &FactRecord,
) -> Vec<String> {
    let mut lines: Vec<&'static str> = model.verdict_lines(verdict).to_vec();

    if !flags.red_flags.is_empty() {
        lines.push(REVIEW_RED_FLAGS);
    }
    lines.extend(model.advisories(record, flags));
    if record.confidence == Confidence::Low {
        lines.push(INSUFFICIENT_DATA);
    }

    lines.extend(model.closing_lines());

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if !out.iter().any(|l| l == line) {
            out.push(line.to_string());
        }
    }
    out
}
