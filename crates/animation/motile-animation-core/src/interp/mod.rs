//! Curve registry and the cubic-bezier timing curve.
//!
//! Every animated value names a curve. Curves map normalized time in [0,1]
//! to normalized progress; the registry always holds `"default"`, so lookups
//! never fail.

pub mod functions;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

pub const DEFAULT_CURVE: &str = "default";

const DEFAULT_P1: Vec2 = Vec2::new(0.0, 0.75);
const DEFAULT_P2: Vec2 = Vec2::new(0.15, 1.0);

/// Cubic Bezier with implicit endpoints (0,0) and (1,1).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BezierCurve {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl BezierCurve {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Progress at normalized time `x` (clamped to [0,1]).
    #[inline]
    pub fn y_for_x(&self, x: f32) -> f32 {
        functions::bezier_ease(x, self.p1.x, self.p1.y, self.p2.x, self.p2.y)
    }
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self::new(DEFAULT_P1, DEFAULT_P2)
    }
}

/// Named curves. Single-threaded; mutate only between ticks.
#[derive(Debug)]
pub struct CurveRegistry {
    curves: HashMap<String, BezierCurve>,
}

impl Default for CurveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveRegistry {
    pub fn new() -> Self {
        let mut reg = Self {
            curves: HashMap::new(),
        };
        reg.reset_all();
        reg
    }

    /// Build or overwrite the curve `name` from its two control points.
    pub fn add_or_replace(&mut self, name: &str, p1: Vec2, p2: Vec2) {
        self.curves
            .insert(name.to_string(), BezierCurve::new(p1, p2));
    }

    /// Drop every curve, then re-seed `"default"`.
    pub fn reset_all(&mut self) {
        self.curves.clear();
        self.curves
            .insert(DEFAULT_CURVE.to_string(), BezierCurve::default());
    }

    /// The named curve, or `"default"` when the name is unknown.
    pub fn lookup(&self, name: &str) -> &BezierCurve {
        self.get(name).unwrap_or_else(|| self.default_curve())
    }

    /// The named curve if registered.
    pub fn get(&self, name: &str) -> Option<&BezierCurve> {
        self.curves.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    fn default_curve(&self) -> &BezierCurve {
        // reset_all() re-seeds synchronously and nothing else removes entries
        &self.curves[DEFAULT_CURVE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_registry_has_default() {
        let reg = CurveRegistry::new();
        assert_eq!(reg.len(), 1);
        assert_eq!(*reg.lookup(DEFAULT_CURVE), BezierCurve::default());
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let mut reg = CurveRegistry::new();
        reg.add_or_replace("linear", Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(reg.lookup("nonexistent"), reg.lookup(DEFAULT_CURVE));
        assert_ne!(reg.lookup("linear"), reg.lookup(DEFAULT_CURVE));
    }

    #[test]
    fn reset_restores_builtin_default_after_override() {
        let mut reg = CurveRegistry::new();
        reg.add_or_replace(DEFAULT_CURVE, Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5));
        reg.add_or_replace("snappy", Vec2::new(0.1, 0.9), Vec2::new(0.2, 1.0));
        assert_eq!(reg.len(), 2);

        reg.reset_all();
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains("snappy"));
        assert_eq!(*reg.lookup(DEFAULT_CURVE), BezierCurve::default());
    }

    #[test]
    fn default_curve_matches_reference_solve() {
        // y at x = 0.5 for control points (0, 0.75), (0.15, 1.0)
        let y = BezierCurve::default().y_for_x(0.5);
        assert!((y - 0.953_009).abs() < 1e-4, "y = {y}");
    }
}
