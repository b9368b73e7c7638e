//! One animatable property slot: typed current/start/goal, timing, the knob
//! property it reads, its owner and its damage policy.
//!
//! A default-constructed value is a dummy: it has no kind, never animates and
//! reads as zero. [`AnimatedValue::initialize`] binds it exactly once.
//! Typed access with the wrong kind is a programming error and panics.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Vec2};
use crate::ids::{LayerId, WindowId, WorkspaceId};
use crate::value::{AnimValue, Tween, ValueKind};

/// How much screen area a tick of this value invalidates.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DamagePolicy {
    /// The owner's whole box, before and after the tick.
    Entire,
    /// Only the border strips of the owning window.
    Border,
}

/// Non-owning back-reference to the entity a value animates.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Owner {
    #[default]
    None,
    Window(WindowId),
    Workspace(WorkspaceId),
    Layer(LayerId),
}

/// Binding parameters for [`AnimatedValue::initialize`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValueConfig {
    /// Key into [`Config::properties`](crate::config::Config::properties).
    pub property: String,
    pub owner: Owner,
    pub damage: DamagePolicy,
}

impl ValueConfig {
    pub fn new(property: &str, owner: Owner, damage: DamagePolicy) -> Self {
        Self {
            property: property.to_string(),
            owner,
            damage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Slot {
    Scalar(Tween<f32>),
    Vector(Tween<Vec2>),
    Color(Tween<Color>),
}

impl Slot {
    fn new(initial: AnimValue) -> Self {
        match initial {
            AnimValue::Scalar(v) => Slot::Scalar(Tween::new(v)),
            AnimValue::Vector(v) => Slot::Vector(Tween::new(v)),
            AnimValue::Color(v) => Slot::Color(Tween::new(v)),
        }
    }

    fn kind(&self) -> ValueKind {
        match self {
            Slot::Scalar(tw) => tw.kind(),
            Slot::Vector(tw) => tw.kind(),
            Slot::Color(tw) => tw.kind(),
        }
    }
}

macro_rules! with_tween {
    ($slot:expr, $tw:ident => $body:expr) => {
        match $slot {
            Slot::Scalar($tw) => $body,
            Slot::Vector($tw) => $body,
            Slot::Color($tw) => $body,
        }
    };
}

macro_rules! assign {
    ($slot:expr, $op:ident, $value:expr) => {
        match ($slot, $value) {
            (Slot::Scalar(tw), AnimValue::Scalar(v)) => tw.$op(v),
            (Slot::Vector(tw), AnimValue::Vector(v)) => tw.$op(v),
            (Slot::Color(tw), AnimValue::Color(v)) => tw.$op(v),
            (slot, v) => panic!(
                "Tried to {}({:?}) on a {:?} value!",
                stringify!($op),
                v.kind(),
                slot.kind()
            ),
        }
    };
}

#[derive(Clone, Debug)]
struct Binding {
    slot: Slot,
    property: String,
    owner: Owner,
    damage: DamagePolicy,
    animation_start: Instant,
}

#[derive(Clone, Debug, Default)]
pub struct AnimatedValue {
    inner: Option<Binding>,
}

impl AnimatedValue {
    /// Initialized value of `initial`'s kind.
    pub fn new(initial: impl Into<AnimValue>, cfg: ValueConfig, now: Instant) -> Self {
        let initial = initial.into();
        let mut v = Self::default();
        v.initialize(initial.kind(), Some(initial), cfg, now);
        v
    }

    /// Bind kind, knobs, owner and damage policy. Current, start and goal all
    /// become `initial` (or the kind's zero).
    ///
    /// Panics if already initialized, if `initial` has a different kind, or
    /// if a border damage policy is bound to a non-window owner.
    pub fn initialize(
        &mut self,
        kind: ValueKind,
        initial: Option<AnimValue>,
        cfg: ValueConfig,
        now: Instant,
    ) {
        assert!(
            self.inner.is_none(),
            "Tried to initialize an already initialized {:?} value!",
            self.kind()
        );
        let initial = initial.unwrap_or_else(|| AnimValue::zero(kind));
        assert_eq!(
            initial.kind(),
            kind,
            "Initial value kind does not match the declared kind"
        );
        if cfg.damage == DamagePolicy::Border {
            assert!(
                matches!(cfg.owner, Owner::Window(_)),
                "Tried to bind border damage to a non-window owner {:?}!",
                cfg.owner
            );
        }
        self.inner = Some(Binding {
            slot: Slot::new(initial),
            property: cfg.property,
            owner: cfg.owner,
            damage: cfg.damage,
            animation_start: now,
        });
    }

    /// Back to a dummy; the value may be initialized again afterwards.
    pub fn teardown(&mut self) {
        self.inner = None;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    /// `None` for a dummy.
    #[inline]
    pub fn kind(&self) -> Option<ValueKind> {
        self.inner.as_ref().map(|b| b.slot.kind())
    }

    pub fn scalar(&self) -> f32 {
        match self.slot() {
            None => 0.0,
            Some(Slot::Scalar(tw)) => tw.current,
            Some(other) => panic!("Tried to access scalar() of a {:?} value!", other.kind()),
        }
    }

    pub fn vector(&self) -> Vec2 {
        match self.slot() {
            None => Vec2::ZERO,
            Some(Slot::Vector(tw)) => tw.current,
            Some(other) => panic!("Tried to access vector() of a {:?} value!", other.kind()),
        }
    }

    pub fn color(&self) -> Color {
        match self.slot() {
            None => Color::default(),
            Some(Slot::Color(tw)) => tw.current,
            Some(other) => panic!("Tried to access color() of a {:?} value!", other.kind()),
        }
    }

    pub fn goal_scalar(&self) -> f32 {
        match self.slot() {
            None => 0.0,
            Some(Slot::Scalar(tw)) => tw.goal,
            Some(other) => panic!("Tried to access goal_scalar() of a {:?} value!", other.kind()),
        }
    }

    pub fn goal_vector(&self) -> Vec2 {
        match self.slot() {
            None => Vec2::ZERO,
            Some(Slot::Vector(tw)) => tw.goal,
            Some(other) => panic!("Tried to access goal_vector() of a {:?} value!", other.kind()),
        }
    }

    pub fn goal_color(&self) -> Color {
        match self.slot() {
            None => Color::default(),
            Some(Slot::Color(tw)) => tw.goal,
            Some(other) => panic!("Tried to access goal_color() of a {:?} value!", other.kind()),
        }
    }

    /// Current value as a tagged value; `None` for a dummy.
    pub fn value(&self) -> Option<AnimValue> {
        self.slot()
            .map(|slot| with_tween!(slot, tw => AnimValue::from(tw.current)))
    }

    pub fn goal(&self) -> Option<AnimValue> {
        self.slot()
            .map(|slot| with_tween!(slot, tw => AnimValue::from(tw.goal)))
    }

    /// Value the running animation started from.
    pub fn start(&self) -> Option<AnimValue> {
        self.slot()
            .map(|slot| with_tween!(slot, tw => AnimValue::from(tw.start)))
    }

    /// Animate toward `goal`, restarting the curve from the current value.
    pub fn set_goal(&mut self, goal: impl Into<AnimValue>, now: Instant) {
        let goal: AnimValue = goal.into();
        let b = self.binding_mut("set_goal");
        assign!(&mut b.slot, set_goal, goal);
        b.animation_start = now;
    }

    /// Move the current value without retargeting; restarts the timer.
    pub fn set_value(&mut self, value: impl Into<AnimValue>, now: Instant) {
        let value: AnimValue = value.into();
        let b = self.binding_mut("set_value");
        assign!(&mut b.slot, set_value, value);
        b.animation_start = now;
    }

    /// Set goal and current at once; nothing animates.
    pub fn set_value_and_warp(&mut self, value: impl Into<AnimValue>) {
        let value: AnimValue = value.into();
        let b = self.binding_mut("set_value_and_warp");
        assign!(&mut b.slot, set_value_and_warp, value);
    }

    /// Snap current to goal. No-op on a dummy.
    pub fn warp(&mut self) {
        if let Some(b) = self.inner.as_mut() {
            with_tween!(&mut b.slot, tw => tw.warp());
        }
    }

    /// `current != goal`, exact comparison.
    pub fn is_animating(&self) -> bool {
        match self.slot() {
            None => false,
            Some(slot) => with_tween!(slot, tw => tw.is_animating()),
        }
    }

    pub fn animation_start(&self) -> Option<Instant> {
        self.inner.as_ref().map(|b| b.animation_start)
    }

    pub fn property(&self) -> Option<&str> {
        self.inner.as_ref().map(|b| b.property.as_str())
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        self.inner.as_ref().map_or(Owner::None, |b| b.owner)
    }

    pub fn damage_policy(&self) -> Option<DamagePolicy> {
        self.inner.as_ref().map(|b| b.damage)
    }

    /// Place current at curve `progress` between start and goal.
    pub(crate) fn advance(&mut self, progress: f32) {
        if let Some(b) = self.inner.as_mut() {
            with_tween!(&mut b.slot, tw => tw.advance(progress));
        }
    }

    #[inline]
    fn slot(&self) -> Option<&Slot> {
        self.inner.as_ref().map(|b| &b.slot)
    }

    fn binding_mut(&mut self, op: &str) -> &mut Binding {
        match self.inner.as_mut() {
            Some(b) => b,
            None => panic!("Tried to {op}() on an uninitialized value!"),
        }
    }
}
