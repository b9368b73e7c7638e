//! Value kinds, tagged values, and the generic current/start/goal triple.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Vec2};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Vector,
    Color,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AnimValue {
    Scalar(f32),
    Vector(Vec2),
    /// RGBA color
    Color(Color),
}

impl AnimValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            AnimValue::Scalar(_) => ValueKind::Scalar,
            AnimValue::Vector(_) => ValueKind::Vector,
            AnimValue::Color(_) => ValueKind::Color,
        }
    }

    /// Zero value of the given kind.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Scalar => AnimValue::Scalar(0.0),
            ValueKind::Vector => AnimValue::Vector(Vec2::ZERO),
            ValueKind::Color => AnimValue::Color(Color::default()),
        }
    }
}

impl From<f32> for AnimValue {
    fn from(v: f32) -> Self {
        AnimValue::Scalar(v)
    }
}

impl From<Vec2> for AnimValue {
    fn from(v: Vec2) -> Self {
        AnimValue::Vector(v)
    }
}

impl From<Color> for AnimValue {
    fn from(c: Color) -> Self {
        AnimValue::Color(c)
    }
}

/// Anything that can be interpolated: affine combination plus exact equality.
pub trait Animatable:
    Copy + Default + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const KIND: ValueKind;
}

impl Animatable for f32 {
    const KIND: ValueKind = ValueKind::Scalar;
}

impl Animatable for Vec2 {
    const KIND: ValueKind = ValueKind::Vector;
}

impl Animatable for Color {
    const KIND: ValueKind = ValueKind::Color;
}

/// `start + (goal - start) * progress`, component-wise.
#[inline]
pub fn interpolate<T: Animatable>(start: T, goal: T, progress: f32) -> T {
    start + (goal - start) * progress
}

/// Current, start and goal of one animated property.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tween<T: Animatable> {
    pub current: T,
    pub start: T,
    pub goal: T,
}

impl<T: Animatable> Tween<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            start: initial,
            goal: initial,
        }
    }

    #[inline]
    pub fn set_goal(&mut self, goal: T) {
        self.goal = goal;
        self.start = self.current;
    }

    #[inline]
    pub fn set_value(&mut self, value: T) {
        self.current = value;
        self.start = value;
    }

    #[inline]
    pub fn set_value_and_warp(&mut self, value: T) {
        self.goal = value;
        self.warp();
    }

    #[inline]
    pub fn warp(&mut self) {
        self.current = self.goal;
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        T::KIND
    }

    /// Exact comparison; no epsilon.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.current != self.goal
    }

    /// Move `current` to the given curve progress between start and goal.
    #[inline]
    pub fn advance(&mut self, progress: f32) {
        self.current = interpolate(self.start, self.goal, progress);
    }
}
