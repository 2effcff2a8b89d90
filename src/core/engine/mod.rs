// src/core/engine/mod.rs

//! Pure scoring pipeline: score, flags, verdict, recommendations.
//!
//! Nothing in here performs I/O or holds state. Each subject category has a
//! `RiskModel` carrying its rule tables; the shared pieces (age bands,
//! verdict gate, recommendation ordering) live in this module and its
//! siblings.

pub mod advice;
pub mod domain;
pub mod qr;
pub mod social;
pub mod verdict;

use crate::core::models::{Category, Contribution, FactRecord, FlagSet, RiskLevel, Score};

/// Every score starts here before any rule fires.
pub const BASE_SCORE: i32 = 50;

/// Running total of the rules that fired, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    contributions: Vec<Contribution>,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCard {
    pub fn new() -> Self {
        Self { contributions: Vec::new() }
    }

    /// Records `weight` under `rule` when `condition` holds.
    pub fn apply_if(&mut self, condition: bool, rule: &'static str, weight: i32) {
        if condition {
            self.contributions.push(Contribution { rule, weight });
        }
    }

    pub fn apply(&mut self, contribution: Option<Contribution>) {
        if let Some(c) = contribution {
            self.contributions.push(c);
        }
    }

    /// Unclamped total.
    pub fn raw(&self) -> i32 {
        BASE_SCORE + self.contributions.iter().map(|c| c.weight).sum::<i32>()
    }

    /// Clamped once, here.
    pub fn score(&self) -> Score {
        Score::clamped(self.raw())
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn into_contributions(self) -> Vec<Contribution> {
        self.contributions
    }
}

/// Age bands shared by domains and profiles. First match wins, largest first.
pub fn age_band(age_in_days: Option<u32>) -> Option<Contribution> {
    let age = age_in_days?;
    let (rule, weight) = match age {
        a if a > 365 => ("age_over_365_days", 20),
        a if a > 180 => ("age_over_180_days", 15),
        a if a > 90 => ("age_over_90_days", 10),
        a if a > 30 => ("age_over_30_days", 5),
        a if a < 7 => ("age_under_7_days", -15),
        _ => return None,
    };
    Some(Contribution { rule, weight })
}

/// The rule tables for one subject category.
pub trait RiskModel: Sync {
    fn score(&self, record: &FactRecord) -> ScoreCard;

    fn flags(&self, record: &FactRecord) -> FlagSet;

    /// Two baseline lines for the verdict.
    fn verdict_lines(&self, verdict: RiskLevel) -> [&'static str; 2];

    /// Extra lines whose conditions are specific to this category, in check order.
    fn advisories(&self, record: &FactRecord, flags: &FlagSet) -> Vec<&'static str>;

    /// Closing lines present in every response.
    fn closing_lines(&self) -> [&'static str; 2];
}

/// The rule tables that apply to a category.
pub fn model_for(category: &Category) -> &'static dyn RiskModel {
    match category {
        Category::Domain => &domain::DomainModel,
        Category::Qr { .. } => &qr::QrModel,
        Category::Profile { .. } => &social::ProfileModel,
    }
}

/// Result of running the pure pipeline over one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: Score,
    pub breakdown: Vec<Contribution>,
    pub flags: FlagSet,
    pub verdict: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Fact Record -> Score -> Flags -> Verdict -> Recommendations.
pub fn evaluate(record: &FactRecord) -> Evaluation {
    let model = model_for(&record.category);

    let card = model.score(record);
    let score = card.score();
    let flags = model.flags(record);
    let verdict = verdict::classify(score, flags.red_flags.len());
    let recommendations = advice::compose(model, verdict, &flags, record);

    Evaluation {
        score,
        breakdown: card.into_contributions(),
        flags,
        verdict,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bands_pick_the_highest_threshold() {
        assert_eq!(age_band(Some(10_000)).map(|c| c.weight), Some(20));
        assert_eq!(age_band(Some(366)).map(|c| c.weight), Some(20));
        assert_eq!(age_band(Some(365)).map(|c| c.weight), Some(15));
        assert_eq!(age_band(Some(181)).map(|c| c.weight), Some(15));
        assert_eq!(age_band(Some(91)).map(|c| c.weight), Some(10));
        assert_eq!(age_band(Some(31)).map(|c| c.weight), Some(5));
        assert_eq!(age_band(Some(30)), None);
        assert_eq!(age_band(Some(7)), None);
        assert_eq!(age_band(Some(6)).map(|c| c.weight), Some(-15));
        assert_eq!(age_band(Some(0)).map(|c| c.weight), Some(-15));
        assert_eq!(age_band(None), None);
    }

    #[test]
    fn score_card_clamps_only_at_the_end() {
        let mut card = ScoreCard::new();
        card.apply_if(true, "a", 40);
        card.apply_if(true, "b", 40);
        card.apply_if(false, "never", -100);
        card.apply_if(true, "c", -25);
        assert_eq!(card.raw(), 105);
        assert_eq!(card.score().value(), 100);
        assert_eq!(card.contributions().len(), 3);
    }
}
