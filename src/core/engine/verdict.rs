// src/core/engine/verdict.rs

use crate::core::models::{RiskLevel, Score};

pub const LOW_RISK_MIN_SCORE: u8 = 80;
pub const MEDIUM_RISK_MIN_SCORE: u8 = 60;
pub const MEDIUM_RISK_MAX_RED_FLAGS: usize = 2;

/// Two-tier gate: a clean record needs a high score, and no score can lift
/// a record with three or more red flags past `high`.
pub fn classify(score: Score, red_flags: usize) -> RiskLevel {
    let score = score.value();
    if score >= LOW_RISK_MIN_SCORE && red_flags == 0 {
        RiskLevel::Low
    } else if score >= MEDIUM_RISK_MIN_SCORE && red_flags <= MEDIUM_RISK_MAX_RED_FLAGS {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}
