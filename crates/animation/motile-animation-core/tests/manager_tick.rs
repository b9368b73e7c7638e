use motile_animation_core::config::{PROPERTY_BORDER, PROPERTY_FADE, PROPERTY_WINDOWS};
use motile_animation_core::{
    AnimValue, AnimationManager, Config, CoreEvent, DamagePolicy, Owner, ValueConfig, ValueId,
};
use motile_test_fixtures::{configs, FakeScene, ManualClock, RecordingRenderer};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

struct Rig {
    clock: ManualClock,
    mgr: AnimationManager,
    scene: FakeScene,
    renderer: RecordingRenderer,
}

impl Rig {
    fn new(cfg: Config) -> Self {
        let clock = ManualClock::new();
        let mgr = AnimationManager::new(cfg, clock.boxed());
        Self {
            clock,
            mgr,
            scene: FakeScene::new(),
            renderer: RecordingRenderer::new(),
        }
    }

    fn scalar(&mut self, property: &str, initial: f32) -> ValueId {
        self.mgr.create(
            initial,
            ValueConfig::new(property, Owner::None, DamagePolicy::Entire),
        )
    }

    fn tick_after(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.mgr.tick(&mut self.scene, &mut self.renderer);
    }

    fn value(&self, id: ValueId) -> f32 {
        self.mgr.get(id).expect("live value").scalar()
    }
}

#[test]
fn default_curve_midpoint_matches_reference() {
    let mut rig = Rig::new(Config::default());
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    assert!(rig.mgr.set_goal(id, 10.0f32));
    assert!(rig.mgr.is_animating(id));

    rig.tick_after(50);
    approx(rig.value(id), 9.530089, 1e-4);
    assert!(rig.mgr.is_animating(id));
}

#[test]
fn completes_and_reports_finished_after_full_duration() {
    let mut rig = Rig::new(Config::default());
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.clock.advance_ms(100);
    let out = rig.mgr.tick(&mut rig.scene, &mut rig.renderer);
    assert!(out.finished(id));
    assert_eq!(out.changes.len(), 1);

    assert_eq!(rig.value(id), 10.0);
    assert!(!rig.mgr.is_animating(id));

    // nothing left to advance
    rig.clock.advance_ms(16);
    let out = rig.mgr.tick(&mut rig.scene, &mut rig.renderer);
    assert!(out.is_empty());
}

#[test]
fn property_speed_overrides_global_speed() {
    let mut cfg = Config::default();
    cfg.property_mut(PROPERTY_FADE).speed = 2.0;
    let mut rig = Rig::new(cfg);
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.tick_after(100);
    approx(rig.value(id), 9.530089, 1e-4);
    rig.tick_after(100);
    assert_eq!(rig.value(id), 10.0);
}

#[test]
fn global_speed_applies_when_property_speed_is_zero() {
    let mut cfg = Config::default();
    cfg.animation_speed = 0.5;
    let mut rig = Rig::new(cfg);
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.tick_after(50);
    assert_eq!(rig.value(id), 10.0);
    assert!(!rig.mgr.is_animating(id));
}

#[test]
fn disabled_property_snaps_on_first_tick() {
    let mut cfg = Config::default();
    cfg.property_mut(PROPERTY_FADE).enabled = false;
    let mut rig = Rig::new(cfg);
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.tick_after(0);
    assert_eq!(rig.value(id), 10.0);
}

#[test]
fn globally_disabled_animations_snap() {
    let cfg = configs::load("disabled").expect("disabled config");
    let mut rig = Rig::new(cfg);
    let id = rig.scalar(PROPERTY_WINDOWS, 3.0);
    rig.mgr.set_goal(id, -3.0f32);

    rig.tick_after(1);
    assert_eq!(rig.value(id), -3.0);
}

#[test]
fn retarget_restarts_from_current_value() {
    let mut rig = Rig::new(Config::default());
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);
    rig.tick_after(50);
    let mid = rig.value(id);

    rig.mgr.set_goal(id, 20.0f32);
    let start = rig.mgr.get(id).and_then(|v| v.start()).expect("start");
    assert_eq!(start, AnimValue::Scalar(mid));

    // zero time since the retarget
    rig.tick_after(0);
    approx(rig.value(id), mid, 1e-3);

    rig.tick_after(100);
    assert_eq!(rig.value(id), 20.0);
}

#[test]
fn unconfigured_property_uses_global_defaults() {
    let mut rig = Rig::new(Config::default());
    let id = rig.scalar("not-a-property", 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.tick_after(50);
    approx(rig.value(id), 9.530089, 1e-4);
}

#[test]
fn unknown_curve_falls_back_to_default() {
    let mut cfg = Config::default();
    cfg.property_mut(PROPERTY_FADE).curve = "nope".into();
    let mut rig = Rig::new(cfg);
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);

    rig.tick_after(50);
    approx(rig.value(id), 9.530089, 1e-4);
}

#[test]
fn configured_curves_and_fallback_default_curve() {
    let cfg = configs::load("custom-curves").expect("custom curves");
    let mut rig = Rig::new(cfg);
    assert!(rig.mgr.curves().contains("linear"));
    assert!(rig.mgr.curves().contains("overshot"));

    let linear = rig.scalar(PROPERTY_WINDOWS, 0.0);
    let fallback = rig.scalar(PROPERTY_FADE, 0.0);
    let disabled = rig.scalar(PROPERTY_BORDER, 0.0);
    for id in [linear, fallback, disabled] {
        rig.mgr.set_goal(id, 10.0f32);
    }

    rig.tick_after(50);
    approx(rig.value(linear), 5.0, 1e-5);
    let expected = 10.0 * rig.mgr.curves().lookup("overshot").y_for_x(0.5);
    approx(rig.value(fallback), expected, 1e-5);
    assert_eq!(rig.value(disabled), 10.0);
}

#[test]
fn reload_config_rebuilds_curves() {
    let cfg = configs::load("custom-curves").expect("custom curves");
    let mut rig = Rig::new(cfg);
    assert!(rig.mgr.curves().contains("linear"));

    rig.mgr.reload_config(Config::default());
    assert!(!rig.mgr.curves().contains("linear"));
    assert!(rig.mgr.curves().contains("default"));
    assert_eq!(rig.mgr.curves().len(), 1);
}

#[test]
fn knob_edits_apply_on_next_tick() {
    let mut rig = Rig::new(Config::default());
    let id = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(id, 10.0f32);
    rig.tick_after(10);
    assert!(rig.mgr.is_animating(id));

    rig.mgr.config_mut().animations_enabled = false;
    rig.tick_after(0);
    assert_eq!(rig.value(id), 10.0);
}

#[test]
fn torn_down_value_leaves_live_set() {
    let mut rig = Rig::new(Config::default());
    let a = rig.scalar(PROPERTY_FADE, 0.0);
    let b = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(a, 5.0f32);

    assert_eq!(rig.mgr.with_value(a, |v, _| v.teardown()), Some(()));
    assert!(rig.mgr.get(a).is_none());
    assert_eq!(rig.mgr.live_ids(), &[b]);

    rig.tick_after(50);
    assert!(rig.mgr.outputs().is_empty());
}

#[test]
fn unregister_is_idempotent() {
    let mut rig = Rig::new(Config::default());
    let a = rig.scalar(PROPERTY_FADE, 0.0);
    let b = rig.scalar(PROPERTY_FADE, 0.0);
    assert_eq!(rig.mgr.len(), 2);

    assert!(rig.mgr.unregister(a).is_some());
    assert!(rig.mgr.unregister(a).is_none());
    assert_eq!(rig.mgr.live_ids(), &[b]);

    // updates to a removed value are ignored
    assert!(!rig.mgr.set_goal(a, 1.0f32));
    assert!(!rig.mgr.is_animating(a));
}

#[test]
fn ticks_values_in_registration_order() {
    let mut rig = Rig::new(Config::default());
    let ids: Vec<ValueId> = (0..4).map(|i| rig.scalar(PROPERTY_FADE, i as f32)).collect();
    for id in ids.iter().rev() {
        rig.mgr.set_goal(*id, 100.0f32);
    }

    rig.clock.advance_ms(20);
    let out = rig.mgr.tick(&mut rig.scene, &mut rig.renderer);
    let order: Vec<ValueId> = out.changes.iter().map(|c| c.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn only_animating_values_are_reported() {
    let mut rig = Rig::new(Config::default());
    let idle = rig.scalar(PROPERTY_FADE, 1.0);
    let moving = rig.scalar(PROPERTY_FADE, 0.0);
    rig.mgr.set_goal(moving, 1.0f32);

    rig.clock.advance_ms(200);
    let out = rig.mgr.tick(&mut rig.scene, &mut rig.renderer);
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.changes[0].id, moving);
    assert_eq!(out.events, vec![CoreEvent::Finished { id: moving }]);
    assert!(!out.finished(idle));
}
