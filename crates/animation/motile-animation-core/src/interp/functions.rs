//! Interpolation helpers:
//! - cubic_bezier (1D Bernstein basis)
//! - bezier_ease (invert the x curve by bisection, return y)

/// Cubic Bezier basis function
#[inline]
pub fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input x in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
pub fn bezier_ease(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return x;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = x;
    for _ in 0..32 {
        let bx = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (bx - x).abs() < 1e-7 {
            break;
        }
        if bx < x {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(bezier_ease(0.0, 0.0, 0.75, 0.15, 1.0), 0.0);
        assert_eq!(bezier_ease(1.0, 0.0, 0.75, 0.15, 1.0), 1.0);
    }

    #[test]
    fn linear_fast_path() {
        assert_eq!(bezier_ease(0.3, 0.0, 0.0, 1.0, 1.0), 0.3);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(bezier_ease(-2.0, 0.25, 0.1, 0.25, 1.0), 0.0);
        assert_eq!(bezier_ease(3.0, 0.25, 0.1, 0.25, 1.0), 1.0);
    }
}
