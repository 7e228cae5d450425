use crate::core::{PlotRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{CANONICAL_LAYER_ORDER, CanvasLayerKind, Primitive};

/// Primitives painted in one layer, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayer {
    pub kind: CanvasLayerKind,
    pub primitives: Vec<Primitive>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are stored in paint order; backends draw them front to back as
/// iterated by `primitives()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub plot: PlotRect,
    pub layers: Vec<FrameLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, plot: PlotRect) -> Self {
        let layers = CANONICAL_LAYER_ORDER
            .iter()
            .map(|kind| FrameLayer {
                kind: *kind,
                primitives: Vec::new(),
            })
            .collect();
        Self {
            viewport,
            plot,
            layers,
        }
    }

    pub fn push(&mut self, kind: CanvasLayerKind, primitive: Primitive) {
        self.layer_mut(kind).primitives.push(primitive);
    }

    pub fn extend<I>(&mut self, kind: CanvasLayerKind, primitives: I)
    where
        I: IntoIterator<Item = Primitive>,
    {
        self.layer_mut(kind).primitives.extend(primitives);
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &[Primitive] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map_or(&[], |layer| layer.primitives.as_slice())
    }

    /// Every primitive in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = (CanvasLayerKind, &Primitive)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.primitives.iter().map(move |p| (layer.kind, p)))
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.primitives.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (_, primitive) in self.primitives() {
            primitive.validate()?;
        }
        Ok(())
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut FrameLayer {
        let existing = self.layers.iter().position(|layer| layer.kind == kind);
        let index = match existing {
            Some(index) => index,
            None => {
                self.layers.push(FrameLayer {
                    kind,
                    primitives: Vec::new(),
                });
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }
}
