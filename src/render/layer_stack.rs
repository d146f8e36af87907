use serde::{Deserialize, Serialize};

/// Index of a panel within its figure, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(pub usize);

impl PanelId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Series,
    ErrorBars,
    Shading,
    Annotation,
    Legend,
    Axis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayerStack {
    pub panel_id: PanelId,
    pub layers: Vec<CanvasLayerKind>,
}

impl PanelLayerStack {
    /// Paint order for every panel: curves, then error-bar point sets, then
    /// shaded spans, then annotations, then the legend, with the frame and
    /// tick labels last.
    #[must_use]
    pub fn canonical_for_panel(panel_id: PanelId) -> Self {
        Self {
            panel_id,
            layers: vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::Series,
                CanvasLayerKind::ErrorBars,
                CanvasLayerKind::Shading,
                CanvasLayerKind::Annotation,
                CanvasLayerKind::Legend,
                CanvasLayerKind::Axis,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, PanelId, PanelLayerStack};

    #[test]
    fn panel_layer_stack_uses_canonical_order() {
        let stack = PanelLayerStack::canonical_for_panel(PanelId::new(1));
        assert_eq!(
            stack.layers,
            vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::Series,
                CanvasLayerKind::ErrorBars,
                CanvasLayerKind::Shading,
                CanvasLayerKind::Annotation,
                CanvasLayerKind::Legend,
                CanvasLayerKind::Axis,
            ]
        );
    }
}
