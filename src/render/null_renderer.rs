use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so invalid geometry surfaces before a
/// real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_primitive_count: usize,
    pub last_text_count: usize,
    pub last_series_primitive_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_primitive_count = frame.primitive_count();
        self.last_text_count = frame
            .primitives()
            .filter(|(_, primitive)| matches!(primitive, Primitive::Text(_)))
            .count();
        self.last_series_primitive_count = frame.layer(CanvasLayerKind::Series).len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
