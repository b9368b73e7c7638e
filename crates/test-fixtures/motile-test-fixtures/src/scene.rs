use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

use motile_animation_core::config::{PROPERTY_BORDER, PROPERTY_WINDOWS, PROPERTY_WORKSPACES};
use motile_animation_core::{
    AnimationManager, Arena, Color, DamagePolicy, LayerId, MonitorId, MonitorInfo, MonitorLookup,
    Owner, Rect, Scene, ValueConfig, ValueId, Vec2, WindowDecoration, WindowId, WindowView,
    WorkspaceId,
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MonitorSpec {
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub reserved_top_left: Vec2,
    #[serde(default)]
    pub reserved_bottom_right: Vec2,
}

impl From<&MonitorSpec> for MonitorInfo {
    fn from(m: &MonitorSpec) -> Self {
        MonitorInfo {
            position: m.position,
            size: m.size,
            reserved_top_left: m.reserved_top_left,
            reserved_bottom_right: m.reserved_bottom_right,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WindowSpec {
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub monitor: u32,
    #[serde(default = "default_mapped")]
    pub mapped: bool,
    #[serde(default)]
    pub animation_style: Option<String>,
}

fn default_mapped() -> bool {
    true
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SceneSpec {
    pub monitors: Vec<MonitorSpec>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
}

/// Decoration that counts `update_window` calls through a shared counter.
#[derive(Clone, Debug, Default)]
pub struct CountingDecoration {
    pub updates: Rc<Cell<usize>>,
}

impl WindowDecoration for CountingDecoration {
    fn update_window(&mut self, _window: WindowId) {
        self.updates.set(self.updates.get() + 1);
    }
}

pub struct FakeWindow {
    pub real_position: ValueId,
    pub real_size: ValueId,
    pub border_color: Option<ValueId>,
    pub position: Vec2,
    pub size: Vec2,
    pub monitor: MonitorId,
    pub mapped: bool,
    pub animation_style: Option<String>,
    pub decorations: Vec<Box<dyn WindowDecoration>>,
    /// Sizes pushed to the client surface, in order.
    pub applied_sizes: Vec<Vec2>,
}

/// In-memory compositor: monitors by index, windows/workspaces/layers in
/// generational arenas so removed entities turn into dead handles.
#[derive(Default)]
pub struct FakeScene {
    pub monitors: Vec<MonitorInfo>,
    pub windows: Arena<FakeWindow>,
    pub workspaces: Arena<MonitorId>,
    pub layers: Arena<Rect>,
}

impl FakeScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a fixture, registering each window's real
    /// position/size with `manager`.
    pub fn from_spec(spec: &SceneSpec, manager: &mut AnimationManager) -> (Self, Vec<WindowId>) {
        let mut scene = Self::new();
        for m in &spec.monitors {
            scene.add_monitor(m.into());
        }
        let ids = spec
            .windows
            .iter()
            .map(|w| scene.add_window(manager, w))
            .collect();
        (scene, ids)
    }

    pub fn add_monitor(&mut self, info: MonitorInfo) -> MonitorId {
        self.monitors.push(info);
        MonitorId(self.monitors.len() as u32 - 1)
    }

    /// Window whose real box starts at (and rests on) its layout box.
    pub fn add_window(&mut self, manager: &mut AnimationManager, spec: &WindowSpec) -> WindowId {
        let handle = self.windows.insert_with(|h| {
            let owner = Owner::Window(WindowId(h));
            let real_position = manager.create(
                spec.position,
                ValueConfig::new(PROPERTY_WINDOWS, owner, DamagePolicy::Entire),
            );
            let real_size = manager.create(
                spec.size,
                ValueConfig::new(PROPERTY_WINDOWS, owner, DamagePolicy::Entire),
            );
            FakeWindow {
                real_position,
                real_size,
                border_color: None,
                position: spec.position,
                size: spec.size,
                monitor: MonitorId(spec.monitor),
                mapped: spec.mapped,
                animation_style: spec.animation_style.clone(),
                decorations: Vec::new(),
                applied_sizes: Vec::new(),
            }
        });
        WindowId(handle)
    }

    /// Border color value damaged with the border-only policy.
    pub fn add_border_color(
        &mut self,
        manager: &mut AnimationManager,
        window: WindowId,
        color: Color,
    ) -> Option<ValueId> {
        let w = self.windows.get_mut(window.0)?;
        let id = manager.create(
            color,
            ValueConfig::new(PROPERTY_BORDER, Owner::Window(window), DamagePolicy::Border),
        );
        w.border_color = Some(id);
        Some(id)
    }

    pub fn add_decoration(&mut self, window: WindowId, decoration: Box<dyn WindowDecoration>) {
        if let Some(w) = self.windows.get_mut(window.0) {
            w.decorations.push(decoration);
        }
    }

    /// Workspace plus its render offset value.
    pub fn add_workspace(
        &mut self,
        manager: &mut AnimationManager,
        monitor: MonitorId,
    ) -> (WorkspaceId, ValueId) {
        let ws = WorkspaceId(self.workspaces.insert(monitor));
        let offset = manager.create(
            Vec2::ZERO,
            ValueConfig::new(PROPERTY_WORKSPACES, Owner::Workspace(ws), DamagePolicy::Entire),
        );
        (ws, offset)
    }

    pub fn add_layer(&mut self, geometry: Rect) -> LayerId {
        LayerId(self.layers.insert(geometry))
    }

    /// The layout moved the window; the real box is not touched.
    pub fn set_layout_box(&mut self, window: WindowId, position: Vec2, size: Vec2) {
        if let Some(w) = self.windows.get_mut(window.0) {
            w.position = position;
            w.size = size;
        }
    }

    /// Destroy without unregistering the window's values.
    pub fn remove_window(&mut self, window: WindowId) -> Option<FakeWindow> {
        self.windows.remove(window.0)
    }

    pub fn window_state(&self, window: WindowId) -> Option<&FakeWindow> {
        self.windows.get(window.0)
    }
}

impl MonitorLookup for FakeScene {
    fn monitor(&self, id: MonitorId) -> Option<MonitorInfo> {
        self.monitors.get(id.0 as usize).copied()
    }
}

impl Scene for FakeScene {
    fn window(&self, id: WindowId) -> Option<WindowView<'_>> {
        let w = self.windows.get(id.0)?;
        Some(WindowView {
            real_position: w.real_position,
            real_size: w.real_size,
            position: w.position,
            size: w.size,
            monitor: w.monitor,
            mapped: w.mapped,
            animation_style: w.animation_style.as_deref(),
        })
    }

    fn workspace_monitor(&self, id: WorkspaceId) -> Option<MonitorId> {
        self.workspaces.get(id.0).copied()
    }

    fn layer_geometry(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(id.0).copied()
    }

    fn update_decorations(&mut self, id: WindowId) {
        if let Some(w) = self.windows.get_mut(id.0) {
            for deco in &mut w.decorations {
                deco.update_window(id);
            }
        }
    }

    fn apply_window_size(&mut self, id: WindowId, size: Vec2) {
        if let Some(w) = self.windows.get_mut(id.0) {
            w.applied_sizes.push(size);
        }
    }
}
