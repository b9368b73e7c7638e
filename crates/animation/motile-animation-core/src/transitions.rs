//! Window open/close transitions.
//!
//! Two styles exist. *Popin* grows the window out of (or shrinks it into)
//! its own center. *Slide* keeps the size and moves the window in from, or
//! out to, a monitor edge. The style comes from the window's own rule when it
//! has one, otherwise from the global `windows_style`.

use log::debug;

use crate::engine::AnimationManager;
use crate::geometry::Vec2;
use crate::ids::WindowId;
use crate::scene::{MonitorInfo, Scene};

/// Size a popin window starts from / shrinks to.
const POPIN_SIZE: Vec2 = Vec2::new(5.0, 5.0);

/// Edges closer than this count as touching.
const STICK_EPSILON: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    Top,
    Bottom,
    Left,
    Right,
}

impl SlideDirection {
    /// Anything unrecognized slides to the top.
    pub fn parse(s: &str) -> Self {
        match s {
            "bottom" => SlideDirection::Bottom,
            "left" => SlideDirection::Left,
            "right" => SlideDirection::Right,
            _ => SlideDirection::Top,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStyle {
    Popin,
    /// `None` infers the direction from the window's placement.
    Slide(Option<SlideDirection>),
}

impl TransitionStyle {
    /// Per-window rule: `slide`, `slide <direction>`, anything else is popin.
    pub fn from_window_rule(rule: &str) -> Self {
        if !rule.starts_with("slide") {
            return TransitionStyle::Popin;
        }
        // "slide" and "slide " both infer the direction
        match rule.find(' ').map(|space| rule[space + 1..].trim()) {
            Some(dir) if !dir.is_empty() => TransitionStyle::Slide(Some(SlideDirection::parse(dir))),
            _ => TransitionStyle::Slide(None),
        }
    }

    /// Global setting: case-insensitive `slide`, anything else is popin.
    pub fn from_global(style: &str) -> Self {
        if style.to_lowercase() == "slide" {
            TransitionStyle::Slide(None)
        } else {
            if !style.is_empty() && !style.eq_ignore_ascii_case("popin") {
                debug!("unknown windows_style '{}', using popin", style);
            }
            TransitionStyle::Popin
        }
    }
}

#[inline]
fn sticks(a: f32, b: f32) -> bool {
    (a - b).abs() < STICK_EPSILON
}

/// Entry point for window map (`close == false`) and unmap (`close == true`).
///
/// Skipped when neither the real position nor the real size is animating,
/// which means the layout pinned the window to a fixed box.
pub fn on_window_post_create_close(
    manager: &mut AnimationManager,
    scene: &dyn Scene,
    window: WindowId,
    close: bool,
) {
    let Some(view) = scene.window(window) else {
        debug!("transition for dead window {:?} skipped", window);
        return;
    };
    if !manager.is_animating(view.real_position) && !manager.is_animating(view.real_size) {
        return;
    }

    let style = match view.animation_style.filter(|s| !s.is_empty()) {
        Some(rule) => TransitionStyle::from_window_rule(rule),
        None => TransitionStyle::from_global(&manager.config().windows_style),
    };

    match style {
        TransitionStyle::Popin => animate_popin(manager, scene, window, close),
        TransitionStyle::Slide(force) => animate_slide(manager, scene, window, force, close),
    }
}

/// Grow from (or shrink into) the center of the goal box.
pub fn animate_popin(
    manager: &mut AnimationManager,
    scene: &dyn Scene,
    window: WindowId,
    close: bool,
) {
    let Some(view) = scene.window(window) else {
        return;
    };
    let (Some(pos), Some(size)) = (manager.get(view.real_position), manager.get(view.real_size))
    else {
        return;
    };
    let goal_pos = pos.goal_vector();
    let goal_size = size.goal_vector();
    let center = goal_pos + goal_size / 2.0;

    if close {
        manager.set_goal(view.real_position, center);
        manager.set_goal(view.real_size, POPIN_SIZE);
    } else {
        manager.set_value(view.real_position, center);
        manager.set_value(view.real_size, POPIN_SIZE);
    }
}

/// Slide in from or out to a monitor edge. The size is never animated.
pub fn animate_slide(
    manager: &mut AnimationManager,
    scene: &dyn Scene,
    window: WindowId,
    force: Option<SlideDirection>,
    close: bool,
) {
    let Some(view) = scene.window(window) else {
        return;
    };
    manager.warp(view.real_size);

    let (Some(pos), Some(size)) = (manager.get(view.real_position), manager.get(view.real_size))
    else {
        return;
    };
    let goal_pos = pos.goal_vector();
    let goal_size = size.goal_vector();

    let Some(monitor) = scene.monitor(view.monitor) else {
        debug!("window {:?} has no monitor, slide skipped", window);
        return;
    };

    let offset = match force {
        Some(dir) => forced_offset(dir, goal_pos, goal_size, &monitor),
        None => inferred_offset(goal_pos, goal_size, view.position, view.size, &monitor),
    };

    if close {
        manager.set_goal(view.real_position, offset);
    } else {
        manager.set_value(view.real_position, offset);
    }
}

/// Off-screen position for an explicit direction.
pub fn forced_offset(
    dir: SlideDirection,
    goal_pos: Vec2,
    goal_size: Vec2,
    monitor: &MonitorInfo,
) -> Vec2 {
    match dir {
        SlideDirection::Bottom => Vec2::new(goal_pos.x, monitor.position.y + monitor.size.y),
        SlideDirection::Left => goal_pos - Vec2::new(goal_size.x, 0.0),
        SlideDirection::Right => goal_pos + Vec2::new(goal_size.x, 0.0),
        SlideDirection::Top => Vec2::new(goal_pos.x, monitor.position.y - goal_size.y),
    }
}

/// Off-screen position chosen from the monitor edges the layout box touches.
///
/// Touching top and bottom: sideways if it touches exactly one side (left
/// wins), down if it spans the full height and width. Touching only top: up.
/// Only bottom: down. Neither: toward the nearer vertical half.
pub fn inferred_offset(
    goal_pos: Vec2,
    goal_size: Vec2,
    layout_pos: Vec2,
    layout_size: Vec2,
    monitor: &MonitorInfo,
) -> Vec2 {
    let mon_pos = monitor.position;
    let mon_size = monitor.size;
    let tl = monitor.reserved_top_left;
    let br = monitor.reserved_bottom_right;

    let display_left = sticks(layout_pos.x, mon_pos.x + tl.x);
    let display_right = sticks(layout_pos.x + layout_size.x, mon_pos.x + mon_size.x - br.x);
    let display_top = sticks(layout_pos.y, mon_pos.y + tl.y);
    let display_bottom = sticks(layout_pos.y + layout_size.y, mon_pos.y + mon_size.y - br.y);

    if display_top && display_bottom {
        if display_left && display_right {
            goal_pos + Vec2::new(0.0, goal_size.y)
        } else if display_left {
            goal_pos - Vec2::new(goal_size.x, 0.0)
        } else {
            goal_pos + Vec2::new(goal_size.x, 0.0)
        }
    } else if display_top {
        goal_pos - Vec2::new(0.0, goal_size.y)
    } else if display_bottom {
        goal_pos + Vec2::new(0.0, goal_size.y)
    } else {
        let midpoint = goal_pos + goal_size / 2.0;
        if midpoint.y > mon_pos.y + mon_size.y / 2.0 {
            Vec2::new(goal_pos.x, mon_pos.y + mon_size.y)
        } else {
            Vec2::new(goal_pos.x, mon_pos.y - goal_size.y)
        }
    }
}
