//! Motile Animation Core
//!
//! Time-driven property animation for a compositor: animated scalar, vector
//! and color values eased along named cubic-bezier curves, a per-frame manager
//! that advances them and reports damage to the renderer, and the window
//! open/close transition styles built on top.

pub mod animated;
pub mod config;
pub mod damage;
pub mod engine;
pub mod geometry;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod scene;
pub mod transitions;
pub mod value;

// Re-exports for consumers (compositor glue)
pub use animated::{AnimatedValue, DamagePolicy, Owner, ValueConfig};
pub use config::{AnimationProperty, Config, ConfigError, CurveDef};
pub use engine::AnimationManager;
pub use geometry::{Color, Rect, Vec2};
pub use ids::{Arena, Handle, LayerId, MonitorId, ValueId, WindowId, WorkspaceId};
pub use interp::{BezierCurve, CurveRegistry, DEFAULT_CURVE};
pub use outputs::{Change, CoreEvent, Outputs};
pub use scene::{
    Clock, MonitorInfo, MonitorLookup, Renderer, Scene, SystemClock, WindowDecoration, WindowView,
};
pub use transitions::{on_window_post_create_close, SlideDirection, TransitionStyle};
pub use value::{AnimValue, Animatable, Tween, ValueKind};
