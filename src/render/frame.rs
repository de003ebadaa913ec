use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, CompositeMode, DrawLayer, LinePrimitive, LinearGradient, PolylinePrimitive,
    RectPrimitive, SurfaceKind, SurfaceLayerStack, TextPrimitive,
};

/// One drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clears the whole surface to transparent.
    Clear,
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    /// Clears a rectangle to transparent.
    ClearRect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
    GradientFill {
        rect: RectPrimitive,
        gradient: LinearGradient,
        composite: CompositeMode,
    },
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            DrawCommand::Clear => Ok(()),
            DrawCommand::Line(line) => line.validate(),
            DrawCommand::Polyline(polyline) => polyline.validate(),
            DrawCommand::ClearRect(rect) => rect.validate(),
            DrawCommand::Circle(circle) => circle.validate(),
            DrawCommand::Text(text) => text.validate(),
            DrawCommand::GradientFill { rect, gradient, .. } => {
                rect.validate()?;
                gradient.validate()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredCommand {
    pub layer: DrawLayer,
    pub command: DrawCommand,
}

/// Backend-agnostic, ordered draw list for one surface repaint.
///
/// Commands must be executed in order: later layers composite over (or, for
/// the edge fade, into) earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub surface: SurfaceKind,
    /// Surface size in device pixels.
    pub viewport: Viewport,
    pub commands: Vec<LayeredCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceKind, viewport: Viewport) -> Self {
        Self {
            surface,
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: DrawLayer, command: DrawCommand) {
        self.commands.push(LayeredCommand { layer, command });
    }


    pub fn commands_in(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |entry| entry.layer == layer)
            .map(|entry| &entry.command)
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylinePrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Polyline(polyline) => Some(polyline),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|entry| match &entry.command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let stack = SurfaceLayerStack::canonical_for_surface(self.surface);
        let mut previous = DrawLayer::Clear;
        for entry in &self.commands {
            if !stack.contains(entry.layer) {
                return Err(ChartError::InvalidData(format!(
                    "layer {:?} is not drawn on {:?} surface",
                    entry.layer, self.surface
                )));
            }
            if entry.layer < previous {
                return Err(ChartError::InvalidData(format!(
                    "layer {:?} emitted after {:?}",
                    entry.layer, previous
                )));
            }
            previous = entry.layer;
            entry.command.validate()?;
        }

        Ok(())
    }
}
