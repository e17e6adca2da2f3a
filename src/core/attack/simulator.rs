//! Simulated execution of catalog attack vectors
//!
//! Outcomes are drawn from an injected random source so runs can be made
//! reproducible in tests via a fixed seed.

use super::{resolve_vectors, Intensity};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of one simulated vector execution
#[derive(Debug, Clone, Serialize)]
pub struct VectorOutcome {
    pub vector_id: String,
    pub model: String,
    pub scenario: String,
    pub success: bool,
    /// Detector confidence in the verdict, 0.0..1.0
    pub confidence: f64,
    /// Bypass strength when successful, 0.0 otherwise
    pub bypass_score: f64,
    pub processing_time_ms: u64,
}

/// Aggregate of one simulated run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_attacks: usize,
    pub successful_attacks: usize,
    /// Share of successful attacks, percent
    pub success_rate: f64,
    pub average_confidence: f64,
    pub threat_level: &'static str,
}

/// Full report of one simulated run
#[derive(Debug, Clone, Serialize)]
pub struct AttackRunReport {
    pub test_id: String,
    pub vectors: Vec<String>,
    pub intensity: Intensity,
    pub results: Vec<VectorOutcome>,
    pub summary: RunSummary,
    pub timestamp: DateTime<Utc>,
}

/// Attack simulator with a pluggable, seedable random source
pub struct AttackSimulator {
    rng: Mutex<StdRng>,
}

impl AttackSimulator {
    /// Create a simulator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a simulator with a fixed seed; runs become reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Execute the given vectors at the given intensity
    ///
    /// Unknown vector ids are rejected before anything is drawn from the
    /// random source.
    pub fn execute(&self, vector_ids: &[String], intensity: Intensity) -> Result<AttackRunReport> {
        let vectors = resolve_vectors(vector_ids)?;

        let mut rng = self.rng.lock();
        let results: Vec<VectorOutcome> = vectors
            .iter()
            .map(|vector| {
                let bypass_probability =
                    (vector.success_rate * intensity.modifier()).clamp(0.05, 0.98);
                let success = rng.gen_bool(bypass_probability);
                let confidence = round3(rng.gen_range(0.2..1.0));
                let bypass_score = if success {
                    round3(rng.gen_range(0.6..1.0))
                } else {
                    0.0
                };

                VectorOutcome {
                    vector_id: vector.id.to_string(),
                    model: vector.model.to_string(),
                    scenario: vector.scenario.to_string(),
                    success,
                    confidence,
                    bypass_score,
                    processing_time_ms: rng.gen_range(1000..4000),
                }
            })
            .collect();
        drop(rng);

        let summary = summarize(&results);

        Ok(AttackRunReport {
            test_id: format!("ATK_{}", Uuid::new_v4().simple()),
            vectors: vector_ids.to_vec(),
            intensity,
            results,
            summary,
            timestamp: Utc::now(),
        })
    }
}

fn summarize(results: &[VectorOutcome]) -> RunSummary {
    let total = results.len();
    let successful = results.iter().filter(|r| r.success).count();
    let success_rate = if total > 0 {
        (successful as f64 / total as f64 * 100.0).round()
    } else {
        0.0
    };
    let average_confidence = if total > 0 {
        round3(results.iter().map(|r| r.confidence).sum::<f64>() / total as f64)
    } else {
        0.0
    };

    RunSummary {
        total_attacks: total,
        successful_attacks: successful,
        success_rate,
        average_confidence,
        threat_level: threat_level(success_rate),
    }
}

fn threat_level(success_rate_pct: f64) -> &'static str {
    if success_rate_pct >= 80.0 {
        "CRITICAL"
    } else if success_rate_pct >= 60.0 {
        "HIGH"
    } else {
        "MEDIUM"
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
