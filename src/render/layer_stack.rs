use serde::{Deserialize, Serialize};

/// Paint layers of a chart frame, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Chart background fill and plot border.
    Background,
    Grid,
    Title,
    AxisLabels,
    TickLabels,
    /// Area-series fills, kept under line series.
    Areas,
    Series,
}

/// Fixed bottom-to-top paint order.
pub const CANONICAL_LAYER_ORDER: [CanvasLayerKind; 7] = [
    CanvasLayerKind::Background,
    CanvasLayerKind::Grid,
    CanvasLayerKind::Title,
    CanvasLayerKind::AxisLabels,
    CanvasLayerKind::TickLabels,
    CanvasLayerKind::Areas,
    CanvasLayerKind::Series,
];

impl CanvasLayerKind {
    /// Position in `CANONICAL_LAYER_ORDER`.
    #[must_use]
    pub fn paint_index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Grid => 1,
            Self::Title => 2,
            Self::AxisLabels => 3,
            Self::TickLabels => 4,
            Self::Areas => 5,
            Self::Series => 6,
        }
    }
}
