//! AnimationManager: owns every live animated value and advances them once per
//! frame.
//!
//! Methods:
//! - new, reload_config, create/register/unregister
//! - set_goal/set_value/set_value_and_warp/warp by id (stamped with the clock)
//! - tick (advance along the curve → snap on completion → damage → size sync)

use std::time::Instant;

use log::{debug, info, trace};

use crate::animated::{AnimatedValue, DamagePolicy, Owner, ValueConfig};
use crate::config::Config;
use crate::damage::{border_strips, window_damage_box};
use crate::geometry::{Rect, Vec2};
use crate::ids::{Arena, ValueId, WindowId};
use crate::interp::{BezierCurve, CurveRegistry};
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::scene::{Clock, Renderer, Scene, SystemClock};
use crate::value::AnimValue;

/// Milliseconds of wall time per unit of speed.
const MS_PER_SPEED_UNIT: f32 = 100.0;

/// Normalized time spent, `elapsed / (100ms * speed)` clamped to [0,1].
/// A non-positive speed finishes immediately.
#[inline]
pub fn spent_fraction(elapsed_ms: f32, speed: f32) -> f32 {
    if !(speed > 0.0) {
        return 1.0;
    }
    (elapsed_ms / MS_PER_SPEED_UNIT / speed).clamp(0.0, 1.0)
}

pub struct AnimationManager {
    cfg: Config,
    curves: CurveRegistry,
    clock: Box<dyn Clock>,

    values: Arena<AnimatedValue>,
    /// Registration order; this is the tick order.
    live: Vec<ValueId>,

    // Per-tick outputs
    outputs: Outputs,
}

impl AnimationManager {
    /// Create a manager with the given config and time source. Curves named
    /// in the config are registered on top of `"default"`.
    pub fn new(cfg: Config, clock: Box<dyn Clock>) -> Self {
        let mut mgr = Self {
            cfg: Config::default(),
            curves: CurveRegistry::new(),
            clock,
            values: Arena::new(),
            live: Vec::new(),
            outputs: Outputs::default(),
        };
        mgr.reload_config(cfg);
        mgr
    }

    pub fn with_system_clock(cfg: Config) -> Self {
        Self::new(cfg, Box::new(SystemClock))
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Knob edits take effect on the next tick. Curve definitions are only
    /// re-read by [`reload_config`](Self::reload_config).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.cfg
    }

    /// Replace the config and rebuild the curve registry from it.
    pub fn reload_config(&mut self, cfg: Config) {
        self.curves.reset_all();
        for def in &cfg.curves {
            self.curves.add_or_replace(&def.name, def.p1, def.p2);
        }
        info!(
            "animation config loaded: {} curves, {} properties, enabled={}",
            self.curves.len(),
            cfg.properties.len(),
            cfg.animations_enabled
        );
        self.cfg = cfg;
    }

    pub fn curves(&self) -> &CurveRegistry {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut CurveRegistry {
        &mut self.curves
    }

    #[inline]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Add an initialized value to the live set. Panics on a dummy.
    pub fn register(&mut self, value: AnimatedValue) -> ValueId {
        assert!(
            value.is_initialized(),
            "Tried to register an uninitialized animated value!"
        );
        let id = ValueId(self.values.insert(value));
        self.live.push(id);
        id
    }

    /// Initialize a value from `initial` and register it.
    pub fn create(&mut self, initial: impl Into<AnimValue>, cfg: ValueConfig) -> ValueId {
        let value = AnimatedValue::new(initial, cfg, self.now());
        self.register(value)
    }

    /// Remove from the live set. Safe to call repeatedly; later calls return
    /// `None`.
    pub fn unregister(&mut self, id: ValueId) -> Option<AnimatedValue> {
        let value = self.values.remove(id.0)?;
        self.live.retain(|v| *v != id);
        Some(value)
    }

    pub fn get(&self, id: ValueId) -> Option<&AnimatedValue> {
        self.values.get(id.0)
    }

    /// Run `f` on a live value with the current time. A value that `f` tears
    /// down is unregistered, so the live set never holds a dummy.
    pub fn with_value<R>(
        &mut self,
        id: ValueId,
        f: impl FnOnce(&mut AnimatedValue, Instant) -> R,
    ) -> Option<R> {
        let now = self.clock.now();
        let Some(value) = self.values.get_mut(id.0) else {
            debug!("ignoring update for unregistered value {:?}", id);
            return None;
        };
        let out = f(value, now);
        if !value.is_initialized() {
            debug!("value {:?} was torn down, unregistering", id);
            self.unregister(id);
        }
        Some(out)
    }

    /// Returns false if `id` is not live.
    pub fn set_goal(&mut self, id: ValueId, goal: impl Into<AnimValue>) -> bool {
        self.with_value(id, |v, now| v.set_goal(goal, now)).is_some()
    }

    pub fn set_value(&mut self, id: ValueId, value: impl Into<AnimValue>) -> bool {
        self.with_value(id, |v, now| v.set_value(value, now))
            .is_some()
    }

    pub fn set_value_and_warp(&mut self, id: ValueId, value: impl Into<AnimValue>) -> bool {
        self.with_value(id, |v, _| v.set_value_and_warp(value))
            .is_some()
    }

    pub fn warp(&mut self, id: ValueId) -> bool {
        self.with_value(id, |v, _| v.warp()).is_some()
    }

    pub fn is_animating(&self, id: ValueId) -> bool {
        self.get(id).is_some_and(AnimatedValue::is_animating)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live ids in tick order.
    pub fn live_ids(&self) -> &[ValueId] {
        &self.live
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Advance every animating value by the time elapsed since its animation
    /// started, emit damage, and sync window surface sizes.
    pub fn tick(&mut self, scene: &mut dyn Scene, renderer: &mut dyn Renderer) -> &Outputs {
        self.outputs.clear();

        let now = self.clock.now();
        let animations_disabled = !self.cfg.animations_enabled;
        let border_size = self.cfg.border_size;
        let rounding = self.cfg.rounding;
        let fallback_curve = *self.curves.lookup(&self.cfg.default_curve);

        let mut gone = Vec::new();

        for idx in 0..self.live.len() {
            let id = self.live[idx];
            let Some(av) = self.values.get(id.0) else {
                continue;
            };
            if !av.is_animating() {
                continue;
            }

            let owner = av.owner();
            let damage = av.damage_policy().unwrap_or(DamagePolicy::Entire);

            // pre-tick box, for damaging where the owner was
            let Some(prev_box) = owner_box(&self.values, scene, owner, border_size) else {
                debug!("owner {:?} of {:?} is gone, dropping value", owner, id);
                gone.push(id);
                continue;
            };

            let (enabled, speed, curve) = {
                let name = av.property().unwrap_or_default();
                match self.cfg.properties.get(name) {
                    Some(prop) => {
                        let curve = match self.curves.get(&prop.curve) {
                            Some(c) => *c,
                            None => {
                                trace!("curve '{}' not registered, using fallback", prop.curve);
                                fallback_curve
                            }
                        };
                        (prop.enabled, prop.speed, curve)
                    }
                    None => {
                        trace!("property '{}' not configured, using defaults", name);
                        (true, 0.0, fallback_curve)
                    }
                }
            };
            let speed = if speed == 0.0 {
                self.cfg.animation_speed
            } else {
                speed
            };

            let started = av.animation_start().unwrap_or(now);
            let elapsed_ms = now.saturating_duration_since(started).as_millis() as f32;
            let spent = spent_fraction(elapsed_ms, speed);

            let Some(av) = self.values.get_mut(id.0) else {
                continue;
            };
            if !enabled || animations_disabled {
                av.warp();
            } else {
                av.advance(curve_progress(&curve, spent));
                if spent >= 1.0 {
                    av.warp();
                }
            }
            trace!("tick {:?}: spent={spent:.3} value={:?}", id, av.value());

            if let Some(value) = av.value() {
                self.outputs.push_change(Change { id, value });
            }
            if !av.is_animating() {
                self.outputs.push_event(CoreEvent::Finished { id });
            }

            match damage {
                DamagePolicy::Entire => {
                    renderer.invalidate_region(prev_box);
                    if let Owner::Window(window) = owner {
                        if let Some((pos, size, _)) = window_geometry(&self.values, scene, window) {
                            renderer.invalidate_region(window_damage_box(pos, size, border_size));
                        }
                        scene.update_decorations(window);
                    }
                }
                DamagePolicy::Border => {
                    let Owner::Window(window) = owner else {
                        panic!("Tried to border-damage a non-window value {:?}!", id);
                    };
                    for strip in border_strips(prev_box, border_size, rounding) {
                        renderer.invalidate_region(strip);
                    }
                    if let Some((pos, size, _)) = window_geometry(&self.values, scene, window) {
                        let new_box = Rect::from_pos_size(pos, size);
                        for strip in border_strips(new_box, border_size, rounding) {
                            renderer.invalidate_region(strip);
                        }
                    }
                }
            }

            // the surface jumps to the final size; only the rendered box animates
            if damage == DamagePolicy::Entire {
                if let Owner::Window(window) = owner {
                    let mapped_goal = scene
                        .window(window)
                        .filter(|w| w.mapped)
                        .map(|w| goal_vector_of(&self.values, w.real_size));
                    if let Some(goal_size) = mapped_goal {
                        scene.apply_window_size(window, goal_size);
                    }
                }
            }
        }

        for id in gone {
            self.unregister(id);
            self.outputs.push_event(CoreEvent::OwnerGone { id });
        }

        &self.outputs
    }
}

#[inline]
fn curve_progress(curve: &BezierCurve, spent: f32) -> f32 {
    curve.y_for_x(spent)
}

fn vector_of(values: &Arena<AnimatedValue>, id: ValueId) -> Vec2 {
    values.get(id.0).map_or(Vec2::ZERO, AnimatedValue::vector)
}

fn goal_vector_of(values: &Arena<AnimatedValue>, id: ValueId) -> Vec2 {
    values.get(id.0).map_or(Vec2::ZERO, AnimatedValue::goal_vector)
}

/// Real position, real size and mapped flag of a live window.
fn window_geometry(
    values: &Arena<AnimatedValue>,
    scene: &dyn Scene,
    window: WindowId,
) -> Option<(Vec2, Vec2, bool)> {
    let w = scene.window(window)?;
    Some((
        vector_of(values, w.real_position),
        vector_of(values, w.real_size),
        w.mapped,
    ))
}

/// Box covering the owner right now; `None` when the owner handle is dead.
fn owner_box(
    values: &Arena<AnimatedValue>,
    scene: &dyn Scene,
    owner: Owner,
    border_size: i32,
) -> Option<Rect> {
    match owner {
        Owner::None => Some(Rect::ZERO),
        Owner::Window(window) => {
            let (pos, size, _) = window_geometry(values, scene, window)?;
            Some(window_damage_box(pos, size, border_size))
        }
        Owner::Workspace(ws) => {
            let monitor = scene.workspace_monitor(ws)?;
            Some(scene.monitor(monitor).map_or(Rect::ZERO, |m| m.rect()))
        }
        Owner::Layer(layer) => scene.layer_geometry(layer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spent_fraction_scales_with_speed() {
        assert_eq!(spent_fraction(50.0, 1.0), 0.5);
        assert_eq!(spent_fraction(50.0, 2.0), 0.25);
        assert_eq!(spent_fraction(500.0, 1.0), 1.0);
        assert_eq!(spent_fraction(0.0, 1.0), 0.0);
    }

    #[test]
    fn non_positive_speed_finishes_immediately() {
        assert_eq!(spent_fraction(0.0, 0.0), 1.0);
        assert_eq!(spent_fraction(10.0, -1.0), 1.0);
        assert_eq!(spent_fraction(0.0, f32::NAN), 1.0);
    }
}
