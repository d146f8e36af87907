use crate::core::{clip_polyline, clip_segment};
use crate::error::FigureResult;
use crate::figure::{Series, SeriesStyle};
use crate::render::{
    CanvasLayerKind, LinePrimitive, MarkerPrimitive, PixelPoint, PolylinePrimitive,
};

use super::{PanelContext, PanelSink};

/// Edge width of hollow markers, in points.
const HOLLOW_MARKER_EDGE_PT: f64 = 1.0;

/// Line series as clipped polylines, one per visible run.
pub(super) fn append_series(sink: &mut PanelSink<'_>, ctx: &PanelContext<'_>) -> FigureResult<()> {
    for series in &ctx.panel.series {
        let SeriesStyle::Line { width_pt, stroke } = series.style() else {
            continue;
        };
        for run in pixel_runs(series, ctx) {
            for clipped in clip_polyline(&run, ctx.rect) {
                let points = clipped
                    .into_iter()
                    .map(|(x, y)| PixelPoint::new(x, y))
                    .collect();
                sink.push(
                    CanvasLayerKind::Series,
                    PolylinePrimitive::new(points, ctx.pt(width_pt), series.color(), stroke),
                );
            }
        }
    }
    Ok(())
}

/// Marker series with their error bars; markers outside the plot are dropped.
pub(super) fn append_point_sets(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
) -> FigureResult<()> {
    let bar_width = ctx.pt(ctx.style.error_bar_width_pt);
    for series in &ctx.panel.series {
        let SeriesStyle::Markers {
            shape,
            size_pt,
            filled,
        } = series.style()
        else {
            continue;
        };

        for (index, (x, y)) in series.points().enumerate() {
            if let Some(error) = series.x_error()
                && let Some((lower, upper)) = error.extents(index)
            {
                push_bar(sink, ctx, (x - lower, y), (x + upper, y), bar_width, series);
            }
            if let Some(error) = series.y_error()
                && let Some((lower, upper)) = error.extents(index)
            {
                push_bar(sink, ctx, (x, y - lower), (x, y + upper), bar_width, series);
            }
        }

        for (x, y) in series.points() {
            let Some((px, py)) = ctx.point_px(x, y) else {
                continue;
            };
            if !ctx.rect.contains(px, py) {
                continue;
            }
            let marker = MarkerPrimitive::new(px, py, shape, ctx.pt(size_pt), series.color());
            let marker = if filled {
                marker
            } else {
                marker.hollow(ctx.pt(HOLLOW_MARKER_EDGE_PT))
            };
            sink.push(CanvasLayerKind::ErrorBars, marker);
        }
    }
    Ok(())
}

fn push_bar(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    series: &Series,
) {
    if from == to {
        return;
    }
    let (Some(a), Some(b)) = (ctx.point_px(from.0, from.1), ctx.point_px(to.0, to.1)) else {
        return;
    };
    if let Some((x1, y1, x2, y2)) = clip_segment(a.0, a.1, b.0, b.1, ctx.rect) {
        sink.push(
            CanvasLayerKind::ErrorBars,
            LinePrimitive::new(x1, y1, x2, y2, width, series.color()),
        );
    }
}

/// Pixel-space runs of a series, broken wherever a point cannot be mapped.
fn pixel_runs(series: &Series, ctx: &PanelContext<'_>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    for run in series.runs() {
        let mut current = Vec::with_capacity(run.len());
        for (x, y) in run {
            match ctx.point_px(x, y) {
                Some(point) => current.push(point),
                None if current.len() > 1 => runs.push(std::mem::take(&mut current)),
                None => current.clear(),
            }
        }
        if current.len() > 1 {
            runs.push(current);
        }
    }
    runs
}
