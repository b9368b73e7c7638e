use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

mod clock;
mod renderer;
mod scene;

pub use clock::ManualClock;
pub use renderer::RecordingRenderer;
pub use scene::{
    CountingDecoration, FakeScene, FakeWindow, MonitorSpec, SceneSpec, WindowSpec,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    configs: HashMap<String, String>,
    scenes: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Animation configs (`Config` JSON).
pub mod configs {
    use super::*;
    use motile_animation_core::Config;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    /// Parsed and validated through `Config::from_json_str`.
    pub fn load(name: &str) -> Result<Config> {
        let text = json(name)?;
        Config::from_json_str(&text).with_context(|| format!("invalid config fixture '{name}'"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        Ok(resolve_path(rel))
    }
}

/// Monitor/window layouts for [`FakeScene`].
pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn load(name: &str) -> Result<SceneSpec> {
        let rel = lookup(&MANIFEST.scenes, "scene", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.scenes, "scene", name)?;
        Ok(resolve_path(rel))
    }
}
