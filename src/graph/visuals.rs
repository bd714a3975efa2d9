//! Visual attributes for graph rendering
//!
//! Node colours and the base weight of new co-occurrence edges are random so
//! that repeated renders look varied. They never influence node identity,
//! frequency or topology, and tests swap in [`FixedVisuals`] to pin them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Palette concept nodes are coloured from
pub const CONCEPT_PALETTE: &[&str] = &[
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
];

/// Colour of document nodes
pub const DOCUMENT_COLOR: &str = "#1F2937";

/// Source of the randomized rendering attributes
pub trait VisualSource {
    /// Colour for a newly created concept node
    fn concept_color(&mut self) -> String;

    /// Base weight for a newly created co-occurrence edge, in `[min, max)`
    fn base_edge_weight(&mut self, min: f64, max: f64) -> f64;
}

/// Default source backed by a seeded or entropy-initialized RNG
#[derive(Debug, Clone)]
pub struct RandomVisuals {
    rng: StdRng,
}

impl Default for RandomVisuals {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomVisuals {
    /// Create a source seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl VisualSource for RandomVisuals {
    fn concept_color(&mut self) -> String {
        let idx = self.rng.gen_range(0..CONCEPT_PALETTE.len());
        CONCEPT_PALETTE[idx].to_string()
    }

    fn base_edge_weight(&mut self, min: f64, max: f64) -> f64 {
        // gen_range panics on empty, NaN or infinite ranges
        if !(min < max) || !(max - min).is_finite() {
            return if min.is_finite() { min } else { 0.0 };
        }
        self.rng.gen_range(min..max)
    }
}

/// Deterministic source: one colour, lowest base weight
#[derive(Debug, Clone)]
pub struct FixedVisuals {
    color: String,
}

impl Default for FixedVisuals {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedVisuals {
    /// Use the first palette colour
    pub fn new() -> Self {
        Self::with_color(CONCEPT_PALETTE[0])
    }

    /// Use a specific colour
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

impl VisualSource for FixedVisuals {
    fn concept_color(&mut self) -> String {
        self.color.clone()
    }

    fn base_edge_weight(&mut self, min: f64, _max: f64) -> f64 {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_visuals_in_range() {
        let mut visuals = RandomVisuals::seeded(7);
        for _ in 0..100 {
            let w = visuals.base_edge_weight(0.5, 1.0);
            assert!((0.5..1.0).contains(&w));
            assert!(CONCEPT_PALETTE.contains(&visuals.concept_color().as_str()));
        }
    }

    #[test]
    fn test_seeded_visuals_repeat() {
        let mut a = RandomVisuals::seeded(42);
        let mut b = RandomVisuals::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.concept_color(), b.concept_color());
            assert_eq!(a.base_edge_weight(0.5, 1.0), b.base_edge_weight(0.5, 1.0));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut visuals = RandomVisuals::seeded(1);
        assert_eq!(visuals.base_edge_weight(0.7, 0.7), 0.7);
        assert_eq!(visuals.base_edge_weight(0.9, 0.5), 0.9);
    }

    #[test]
    fn test_non_finite_range_does_not_panic() {
        let mut visuals = RandomVisuals::seeded(1);

        assert_eq!(visuals.base_edge_weight(f64::NAN, 1.0), 0.0);
        assert_eq!(visuals.base_edge_weight(0.5, f64::NAN), 0.5);
        assert_eq!(visuals.base_edge_weight(0.5, f64::INFINITY), 0.5);
        assert_eq!(visuals.base_edge_weight(f64::NEG_INFINITY, 1.0), 0.0);
    }

    #[test]
    fn test_fixed_visuals() {
        let mut visuals = FixedVisuals::with_color("#000000");
        assert_eq!(visuals.concept_color(), "#000000");
        assert_eq!(visuals.base_edge_weight(0.5, 1.0), 0.5);
    }
}
