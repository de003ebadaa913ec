use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, SurfaceKind};

/// Headless renderer used by tests and server-side usage.
///
/// It still validates every frame so invalid geometry surfaces before a real
/// backend sees it, and keeps the last frame per surface for inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_command_count: usize,
    last_main: Option<RenderFrame>,
    last_preview: Option<RenderFrame>,
}

impl NullRenderer {
    #[must_use]
    pub fn last_frame(&self, surface: SurfaceKind) -> Option<&RenderFrame> {
        match surface {
            SurfaceKind::Main => self.last_main.as_ref(),
            SurfaceKind::Preview => self.last_preview.as_ref(),
        }
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.commands.len();
        let slot = match frame.surface {
            SurfaceKind::Main => &mut self.last_main,
            SurfaceKind::Preview => &mut self.last_preview,
        };
        *slot = Some(frame.clone());
        Ok(())
    }
}
