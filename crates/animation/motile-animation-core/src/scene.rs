//! Collaborator traits: the compositor scene (owners, monitors), the renderer's
//! damage accumulator, and the clock.
//!
//! The manager never owns windows, workspaces or layer surfaces. It holds
//! generation-checked handles and resolves them through [`Scene`] each tick;
//! a handle that no longer resolves means the owner is gone.

use std::time::Instant;

use crate::geometry::{Rect, Vec2};
use crate::ids::{LayerId, MonitorId, ValueId, WindowId, WorkspaceId};

/// What the animation core needs to know about a window.
#[derive(Clone, Copy, Debug)]
pub struct WindowView<'a> {
    /// Rendered (animated) position.
    pub real_position: ValueId,
    /// Rendered (animated) size.
    pub real_size: ValueId,
    /// Layout position, un-animated.
    pub position: Vec2,
    /// Layout size, un-animated.
    pub size: Vec2,
    pub monitor: MonitorId,
    pub mapped: bool,
    /// Per-window open/close style override (window rule).
    pub animation_style: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonitorInfo {
    pub position: Vec2,
    pub size: Vec2,
    /// Insets reserved by bars/panels on the top and left edges.
    pub reserved_top_left: Vec2,
    /// Insets reserved on the bottom and right edges.
    pub reserved_bottom_right: Vec2,
}

impl MonitorInfo {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// Monitor lookup collaborator.
pub trait MonitorLookup {
    fn monitor(&self, id: MonitorId) -> Option<MonitorInfo>;
}

/// Owner collaborators. Every lookup returns `None` for dead handles.
pub trait Scene: MonitorLookup {
    fn window(&self, id: WindowId) -> Option<WindowView<'_>>;

    fn workspace_monitor(&self, id: WorkspaceId) -> Option<MonitorId>;

    fn layer_geometry(&self, id: LayerId) -> Option<Rect>;

    /// Tell every decoration of the window that the window changed.
    fn update_decorations(&mut self, id: WindowId);

    /// Resize the window's client surface. Only called for mapped windows.
    fn apply_window_size(&mut self, id: WindowId, size: Vec2);
}

/// Renderer damage accumulator; regions are flushed with the next frame.
pub trait Renderer {
    fn invalidate_region(&mut self, region: Rect);
}

/// A window decoration (group bar, shadow, ...) that follows its window.
pub trait WindowDecoration {
    /// The window's real box changed.
    fn update_window(&mut self, window: WindowId);
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
