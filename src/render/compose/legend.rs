use crate::figure::{LegendLocation, SeriesStyle};
use crate::render::text_metrics::estimate_text_extent;
use crate::render::{
    CanvasLayerKind, LinePrimitive, MarkerPrimitive, RectPrimitive, TextHAlign, TextVAlign,
};

use super::{PanelContext, PanelSink};

/// Legend box anchored in a lower corner of the plot, one row per labelled
/// series in draw order.
pub(super) fn append_legend(sink: &mut PanelSink<'_>, ctx: &PanelContext<'_>) {
    let Some(legend) = ctx.panel.legend else {
        return;
    };
    let entries: Vec<_> = ctx
        .panel
        .legend_entries()
        .filter_map(|series| series.label().map(|label| (series, label)))
        .collect();
    if entries.is_empty() {
        return;
    }

    let metrics = ctx.style.legend;
    let em = ctx.pt(metrics.font_size_pt);
    let handle_length = metrics.handle_length_em * em;
    let handle_pad = metrics.handle_text_pad_em * em;
    let border_pad = metrics.border_pad_em * em;
    let row_spacing = metrics.label_spacing_em * em;
    let axes_pad = metrics.border_axes_pad_em * em;

    let extents: Vec<_> = entries
        .iter()
        .map(|(_, label)| estimate_text_extent(label, em, false))
        .collect();
    let label_width = extents.iter().map(|(width, _)| *width).fold(0.0, f64::max);
    let row_height = extents.iter().map(|(_, height)| *height).fold(0.0, f64::max);
    let rows = entries.len() as f64;

    let box_width = 2.0 * border_pad + handle_length + handle_pad + label_width;
    let box_height = 2.0 * border_pad + rows * row_height + (rows - 1.0) * row_spacing;
    let box_x = match legend.location {
        LegendLocation::LowerLeft => ctx.rect.left() + axes_pad,
        LegendLocation::LowerRight => ctx.rect.right() - axes_pad - box_width,
    };
    let box_y = ctx.rect.bottom() - axes_pad - box_height;

    sink.push(
        CanvasLayerKind::Legend,
        RectPrimitive::new(
            box_x,
            box_y,
            box_width,
            box_height,
            legend.face_color.with_alpha(legend.frame_alpha),
        )
        .with_border(
            metrics.edge_color.with_alpha(legend.frame_alpha),
            ctx.pt(metrics.edge_width_pt),
        )
        .with_corner_radius(metrics.corner_radius_em * em),
    );

    let handle_x = box_x + border_pad;
    let text_x = handle_x + handle_length + handle_pad;
    for (row, (series, label)) in entries.into_iter().enumerate() {
        let center_y =
            box_y + border_pad + row as f64 * (row_height + row_spacing) + row_height / 2.0;
        match series.style() {
            SeriesStyle::Line { width_pt, stroke } => sink.push(
                CanvasLayerKind::Legend,
                LinePrimitive::new(
                    handle_x,
                    center_y,
                    handle_x + handle_length,
                    center_y,
                    ctx.pt(width_pt),
                    series.color(),
                )
                .with_stroke_style(stroke),
            ),
            SeriesStyle::Markers {
                shape,
                size_pt,
                filled,
            } => {
                let marker = MarkerPrimitive::new(
                    handle_x + handle_length / 2.0,
                    center_y,
                    shape,
                    ctx.pt(size_pt),
                    series.color(),
                );
                sink.push(
                    CanvasLayerKind::Legend,
                    if filled { marker } else { marker.hollow(ctx.pt(1.0)) },
                );
            }
        }
        sink.push(
            CanvasLayerKind::Legend,
            ctx.text(
                label,
                text_x,
                center_y,
                metrics.font_size_pt,
                ctx.style.text_color,
                (TextHAlign::Left, TextVAlign::Center),
            ),
        );
    }
}
