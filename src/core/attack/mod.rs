//! Attack-vector catalog for eKYC red-team simulations
//!
//! The catalog is descriptive data: each vector labels an adversarial
//! technique against identity-verification pipelines together with its
//! observed bypass rate. Execution lives in [`simulator`].

pub mod simulator;

pub use simulator::{AttackRunReport, AttackSimulator, RunSummary, VectorOutcome};

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// A labeled adversarial technique against an eKYC verification step
#[derive(Debug, Clone, Serialize)]
pub struct AttackVector {
    /// Catalog id, `A1`..`A5`
    pub id: &'static str,
    /// Generative model family behind the technique
    pub model: &'static str,
    /// Verification step the technique targets
    pub scenario: &'static str,
    /// Execution difficulty
    pub difficulty: Difficulty,
    /// Observed bypass rate against baseline detection, 0.0..1.0
    pub success_rate: f64,
    /// Human-readable description
    pub description: &'static str,
}

/// Execution difficulty of an attack vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

/// Simulation intensity requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    /// Multiplier applied to a vector's baseline bypass rate
    pub fn modifier(&self) -> f64 {
        match self {
            Intensity::Low => 0.85,
            Intensity::Medium => 1.0,
            Intensity::High => 1.15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

const CATALOG: &[AttackVector] = &[
    AttackVector {
        id: "A1",
        model: "StyleGAN3",
        scenario: "synthetic enrollment selfie",
        difficulty: Difficulty::Medium,
        success_rate: 0.78,
        description: "High-fidelity generated face imagery submitted as a live selfie",
    },
    AttackVector {
        id: "A2",
        model: "StableDiffusion",
        scenario: "screen replay attack",
        difficulty: Difficulty::Low,
        success_rate: 0.65,
        description: "Re-captured synthetic imagery presented to the camera from a screen",
    },
    AttackVector {
        id: "A3",
        model: "SimSwap",
        scenario: "real-time face swap",
        difficulty: Difficulty::High,
        success_rate: 0.89,
        description: "Live face replacement during the video verification step",
    },
    AttackVector {
        id: "A4",
        model: "Diffusion+GAN",
        scenario: "forged passport",
        difficulty: Difficulty::Medium,
        success_rate: 0.73,
        description: "Composited travel document with regenerated security features",
    },
    AttackVector {
        id: "A5",
        model: "DALL-E",
        scenario: "fabricated identity document",
        difficulty: Difficulty::Medium,
        success_rate: 0.82,
        description: "Fully generated national id card imagery",
    },
];

/// The full vector catalog
pub fn catalog() -> &'static [AttackVector] {
    CATALOG
}

/// All catalog ids, in order
pub fn catalog_ids() -> Vec<String> {
    CATALOG.iter().map(|v| v.id.to_string()).collect()
}

/// Look up a vector by id
pub fn find_vector(id: &str) -> Option<&'static AttackVector> {
    CATALOG.iter().find(|v| v.id == id)
}

/// Resolve a list of ids against the catalog
///
/// Fails with `InvalidRequest` on the first unknown id.
pub fn resolve_vectors(ids: &[String]) -> Result<Vec<&'static AttackVector>> {
    ids.iter()
        .map(|id| {
            find_vector(id)
                .ok_or_else(|| GatewayError::invalid_request(format!("unknown attack vector: {}", id)))
        })
        .collect()
}

/// A combination of vectors known to reinforce each other
#[derive(Debug, Clone, Serialize)]
pub struct ComboRecommendation {
    /// Vector ids in the combination
    pub combo: Vec<&'static str>,
    /// What the combination achieves
    pub description: &'static str,
    /// Estimated combined bypass rate, 0.0..1.0
    pub estimated_success_rate: f64,
}

/// Recommended vector combinations
pub fn recommended_combos() -> Vec<ComboRecommendation> {
    vec![
        ComboRecommendation {
            combo: vec!["A2", "A3"],
            description: "Deepfake plus screen replay",
            estimated_success_rate: 0.92,
        },
        ComboRecommendation {
            combo: vec!["A1", "A4"],
            description: "Synthetic selfie plus forged passport",
            estimated_success_rate: 0.75,
        },
    ]
}

/// Aggregate catalog statistics
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatistics {
    pub total_vectors: usize,
    /// Mean baseline bypass rate, 0.0..1.0
    pub average_success_rate: f64,
    pub most_effective: String,
    pub least_effective: String,
}

/// Compute aggregate statistics over the catalog
pub fn catalog_statistics() -> CatalogStatistics {
    let total = CATALOG.len();
    let average = CATALOG.iter().map(|v| v.success_rate).sum::<f64>() / total as f64;

    let mut most = &CATALOG[0];
    let mut least = &CATALOG[0];
    for vector in CATALOG {
        if vector.success_rate > most.success_rate {
            most = vector;
        }
        if vector.success_rate < least.success_rate {
            least = vector;
        }
    }

    CatalogStatistics {
        total_vectors: total,
        average_success_rate: (average * 1000.0).round() / 1000.0,
        most_effective: format!("{} - {}", most.id, most.model),
        least_effective: format!("{} - {}", least.id, least.model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_unique_vectors() {
        let ids: Vec<_> = catalog().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3", "A4", "A5"]);
    }

    #[test]
    fn test_resolve_vectors_rejects_unknown_id() {
        let err = resolve_vectors(&["A1".to_string(), "A9".to_string()]).unwrap_err();
        assert!(err.to_string().contains("A9"));
    }

    #[test]
    fn test_catalog_statistics() {
        let stats = catalog_statistics();
        assert_eq!(stats.total_vectors, 5);
        assert_eq!(stats.most_effective, "A3 - SimSwap");
        assert_eq!(stats.least_effective, "A2 - StableDiffusion");
        assert!((stats.average_success_rate - 0.774).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_modifiers() {
        assert!(Intensity::Low.modifier() < Intensity::Medium.modifier());
        assert!(Intensity::Medium.modifier() < Intensity::High.modifier());
    }

    #[test]
    fn test_intensity_deserializes_lowercase() {
        let intensity: Intensity = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(intensity, Intensity::High);
    }
}
