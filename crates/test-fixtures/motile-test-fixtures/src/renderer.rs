use motile_animation_core::{Rect, Renderer};

/// Renderer stand-in that keeps every invalidated region.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub regions: Vec<Rect>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions since the last call; mimics a frame flush.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.regions)
    }

    pub fn contains(&self, region: Rect) -> bool {
        self.regions.contains(&region)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Renderer for RecordingRenderer {
    fn invalidate_region(&mut self, region: Rect) {
        self.regions.push(region);
    }
}
