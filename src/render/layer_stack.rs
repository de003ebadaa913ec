use serde::{Deserialize, Serialize};

/// Drawing pass a command belongs to. Variants are declared in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DrawLayer {
    Clear,
    Grid,
    Series,
    Hover,
    ValueLabels,
    TimeLabels,
    EdgeFade,
}

/// Target surface of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Main,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceLayerStack {
    pub surface: SurfaceKind,
    pub layers: Vec<DrawLayer>,
}

impl SurfaceLayerStack {
    #[must_use]
    pub fn canonical_for_surface(surface: SurfaceKind) -> Self {
        let layers = match surface {
            SurfaceKind::Main => vec![
                DrawLayer::Clear,
                DrawLayer::Grid,
                DrawLayer::Series,
                DrawLayer::Hover,
                DrawLayer::ValueLabels,
                DrawLayer::TimeLabels,
                DrawLayer::EdgeFade,
            ],
            SurfaceKind::Preview => vec![DrawLayer::Clear, DrawLayer::Series],
        };
        Self { surface, layers }
    }

    #[must_use]
    pub fn contains(&self, layer: DrawLayer) -> bool {
        self.layers.contains(&layer)
    }
}
