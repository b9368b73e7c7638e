//! Damage geometry for animated owners.

use crate::geometry::{Rect, Vec2};

/// Window box as damaged by the renderer: the real box grown by the border
/// plus one pixel of slack on every side.
#[inline]
pub fn window_damage_box(position: Vec2, size: Vec2, border_size: i32) -> Rect {
    Rect::from_pos_size(position, size).expand(border_size + 1)
}

/// Top, left, right and bottom strips covering a border drawn around `b`.
/// Each strip is `border_size + rounding + 1` thick so rounded corners are
/// covered too.
pub fn border_strips(b: Rect, border_size: i32, rounding: i32) -> [Rect; 4] {
    let edge = border_size + rounding + 1;
    let rounding_size = rounding + 1;
    [
        // top
        Rect::new(
            b.x - border_size,
            b.y - border_size,
            b.width + 2 * border_size,
            edge,
        ),
        // left
        Rect::new(
            b.x - border_size,
            b.y - border_size,
            edge,
            b.height + 2 * border_size,
        ),
        // right
        Rect::new(
            b.x + b.width - rounding_size,
            b.y - border_size,
            edge,
            b.height + 2 * border_size,
        ),
        // bottom
        Rect::new(
            b.x,
            b.y + b.height - rounding_size,
            b.width + 2 * border_size,
            edge,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_box_includes_border_and_slack() {
        let r = window_damage_box(Vec2::new(100.0, 50.0), Vec2::new(400.0, 300.0), 2);
        assert_eq!(r, Rect::new(97, 47, 406, 306));
    }

    #[test]
    fn strips_cover_each_edge() {
        let strips = border_strips(Rect::new(100, 100, 200, 100), 2, 3);
        // thickness = border + rounding + 1
        assert_eq!(strips[0], Rect::new(98, 98, 204, 6));
        assert_eq!(strips[1], Rect::new(98, 98, 6, 104));
        assert_eq!(strips[2], Rect::new(296, 98, 6, 104));
        assert_eq!(strips[3], Rect::new(100, 196, 204, 6));
    }
}
