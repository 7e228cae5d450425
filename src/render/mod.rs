mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;

pub use frame::{FrameLayer, RenderFrame};
pub use layer_stack::{CANONICAL_LAYER_ORDER, CanvasLayerKind};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, EllipsePrimitive, FontSpec, LinePrimitive, PathCommand, PathPrimitive,
    PolygonPrimitive, Primitive, RectPrimitive, Stroke, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Drawing surface contract implemented by every backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from chart data, scaling and layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        (**self).render(frame)
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
#[cfg(feature = "cairo-backend")]
pub(crate) use cairo_backend::font_description;
