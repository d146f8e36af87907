use serde::{Deserialize, Serialize};

use crate::core::{PlotRect, Viewport};

use super::{CanvasLayerKind, Color, PanelId, PanelLayerStack, Primitive, RenderFrame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayerFrame {
    pub panel_id: PanelId,
    pub plot_rect: PlotRect,
    pub layers: Vec<LayerPrimitives>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub panels: Vec<PanelLayerFrame>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stacks(viewport: Viewport, stacks: Vec<(PanelLayerStack, PlotRect)>) -> Self {
        let panels = stacks
            .into_iter()
            .map(|(stack, plot_rect)| PanelLayerFrame {
                panel_id: stack.panel_id,
                plot_rect,
                layers: stack
                    .layers
                    .into_iter()
                    .map(|kind| LayerPrimitives {
                        kind,
                        primitives: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            viewport,
            background: Color::WHITE,
            panels,
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn push(
        &mut self,
        panel_id: PanelId,
        kind: CanvasLayerKind,
        primitive: impl Into<Primitive>,
    ) {
        if let Some(layer) = self.layer_mut(panel_id, kind) {
            layer.primitives.push(primitive.into());
        }
    }

    #[must_use]
    pub fn plot_rect(&self, panel_id: PanelId) -> Option<PlotRect> {
        self.panels
            .iter()
            .find(|panel| panel.panel_id == panel_id)
            .map(|panel| panel.plot_rect)
    }

    #[must_use]
    pub fn layer(&self, panel_id: PanelId, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        let panel = self.panels.iter().find(|panel| panel.panel_id == panel_id)?;
        panel.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport).with_background(self.background);
        for panel in &self.panels {
            for layer in &panel.layers {
                frame.primitives.extend(layer.primitives.iter().cloned());
            }
        }
        frame
    }

    fn layer_mut(
        &mut self,
        panel_id: PanelId,
        kind: CanvasLayerKind,
    ) -> Option<&mut LayerPrimitives> {
        let panel = self
            .panels
            .iter_mut()
            .find(|panel| panel.panel_id == panel_id)?;
        panel.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::{PlotRect, Viewport};
    use crate::render::{
        CanvasLayerKind, Color, LinePrimitive, PanelId, PanelLayerStack, Primitive, RectPrimitive,
    };

    #[test]
    fn layered_render_frame_flattens_in_layer_order() {
        let panel_id = PanelId::new(0);
        let mut layered = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 50),
            vec![(
                PanelLayerStack::canonical_for_panel(panel_id),
                PlotRect::new(0.0, 0.0, 100.0, 50.0),
            )],
        );

        layered.push(
            panel_id,
            CanvasLayerKind::Shading,
            RectPrimitive::new(0.0, 0.0, 10.0, 10.0, Color::GREY.with_alpha(0.2)),
        );
        layered.push(
            panel_id,
            CanvasLayerKind::Series,
            LinePrimitive::new(0.0, 2.0, 5.0, 3.0, 1.0, Color::RED),
        );

        let flattened = layered.flatten();
        assert_eq!(flattened.primitives.len(), 2);
        // Series comes before Shading in the canonical stack.
        assert!(matches!(flattened.primitives[0], Primitive::Line(_)));
        assert!(matches!(flattened.primitives[1], Primitive::Rect(_)));
    }

    #[test]
    fn push_to_unknown_panel_is_ignored() {
        let mut layered = LayeredRenderFrame::from_stacks(Viewport::new(10, 10), Vec::new());
        layered.push(
            PanelId::new(3),
            CanvasLayerKind::Series,
            LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, Color::BLACK),
        );
        assert!(layered.flatten().is_empty());
    }
}
