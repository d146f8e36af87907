use crate::core::ticks::{
    DEFAULT_LINEAR_BINS, integer_secondary_ticks, linear_ticks, log10_ticks,
    transformed_secondary_ticks,
};
use crate::core::{AxisScale, ScaleKind, Tick};
use crate::error::FigureResult;
use crate::figure::{AxisSide, SecondaryAxis, SecondaryTicks};
use crate::render::text_metrics::estimate_text_width;
use crate::render::{
    CanvasLayerKind, Color, LinePrimitive, RectPrimitive, TextHAlign, TextVAlign,
};

use super::{PanelContext, PanelSink};

const LINE_HEIGHT_EM: f64 = 1.2;
const POSITION_EPSILON: f64 = 1e-6;

/// Which edge of the plot a set of ticks hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Bottom,
    Left,
    Right,
    Top,
}

/// Plot face and grid underneath, frame, ticks and labels on top.
pub(super) fn append_axes(sink: &mut PanelSink<'_>, ctx: &PanelContext<'_>) -> FigureResult<()> {
    let rect = ctx.rect;
    let style = ctx.style;
    let panel = ctx.panel;

    sink.push(
        CanvasLayerKind::Background,
        RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, Color::WHITE),
    );

    let x_ticks = axis_ticks(ctx.x_scale)?;
    let y_ticks = axis_ticks(ctx.y_scale)?;
    if panel.grid {
        append_grid(sink, ctx, &x_ticks, &y_ticks)?;
    }

    sink.push(
        CanvasLayerKind::Axis,
        RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, Color::TRANSPARENT)
            .with_border(style.frame_color, ctx.pt(style.frame_width_pt)),
    );

    let bottom_depth = append_ticks(sink, ctx, Edge::Bottom, ctx.x_scale, &x_ticks)?;
    let left_depth = append_ticks(sink, ctx, Edge::Left, ctx.y_scale, &y_ticks)?;
    append_axis_label(sink, ctx, Edge::Bottom, &panel.x_axis.label, bottom_depth);
    append_axis_label(sink, ctx, Edge::Left, &panel.y_axis.label, left_depth);

    if let Some(secondary) = &panel.secondary_axis {
        append_secondary_axis(sink, ctx, secondary)?;
    }
    Ok(())
}

fn append_secondary_axis(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    secondary: &SecondaryAxis,
) -> FigureResult<()> {
    let (edge, scale) = match secondary.side {
        AxisSide::Right => (Edge::Right, ctx.y_scale),
        AxisSide::Top => (Edge::Top, ctx.x_scale),
    };
    let (min, max) = scale.bounds();
    let ticks = match secondary.ticks {
        SecondaryTicks::Integer => integer_secondary_ticks(min, max, secondary.transform)?,
        SecondaryTicks::Nice => {
            transformed_secondary_ticks(min, max, secondary.transform, DEFAULT_LINEAR_BINS)?
        }
    };
    let depth = append_ticks(sink, ctx, edge, scale, &ticks)?;
    append_axis_label(sink, ctx, edge, &secondary.label, depth);
    Ok(())
}

fn axis_ticks(scale: AxisScale) -> FigureResult<Vec<Tick>> {
    let (min, max) = scale.bounds();
    match scale.kind() {
        ScaleKind::Linear => linear_ticks(min, max, DEFAULT_LINEAR_BINS),
        ScaleKind::Log10 => log10_ticks(min, max),
    }
}

fn append_grid(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
) -> FigureResult<()> {
    let rect = ctx.rect;
    let width = ctx.pt(ctx.style.grid_width_pt);
    let color = ctx.style.grid_color;
    for tick in x_ticks.iter().filter(|tick| tick.major) {
        let x = ctx.x_px(tick.value)?;
        if inside(x, rect.left(), rect.right()) {
            sink.push(
                CanvasLayerKind::Background,
                LinePrimitive::new(x, rect.top(), x, rect.bottom(), width, color),
            );
        }
    }
    for tick in y_ticks.iter().filter(|tick| tick.major) {
        let y = ctx.y_px(tick.value)?;
        if inside(y, rect.top(), rect.bottom()) {
            sink.push(
                CanvasLayerKind::Background,
                LinePrimitive::new(rect.left(), y, rect.right(), y, width, color),
            );
        }
    }
    Ok(())
}

/// Draws outward ticks and their labels along `edge`; returns how far the
/// tick labels reach away from the plot, in pixels.
fn append_ticks(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    edge: Edge,
    scale: AxisScale,
    ticks: &[Tick],
) -> FigureResult<f64> {
    let rect = ctx.rect;
    let style = ctx.style;
    let major_length = ctx.pt(style.major_tick_length_pt);
    let minor_length = ctx.pt(style.minor_tick_length_pt);
    let label_pad = ctx.pt(style.tick_label_pad_pt);
    let font_px = ctx.pt(style.tick_label_font_size_pt);
    let span = match edge {
        Edge::Bottom | Edge::Top => ctx.x_span(),
        Edge::Left | Edge::Right => ctx.y_span(),
    };

    let mut label_extent: f64 = 0.0;
    for tick in ticks {
        let position = scale.domain_to_pixel(tick.value, span)?;
        let (low, high) = match edge {
            Edge::Bottom | Edge::Top => (rect.left(), rect.right()),
            Edge::Left | Edge::Right => (rect.top(), rect.bottom()),
        };
        if !inside(position, low, high) {
            continue;
        }

        let (length, width) = if tick.major {
            (major_length, ctx.pt(style.major_tick_width_pt))
        } else {
            (minor_length, ctx.pt(style.minor_tick_width_pt))
        };
        let line = match edge {
            Edge::Bottom => LinePrimitive::new(
                position,
                rect.bottom(),
                position,
                rect.bottom() + length,
                width,
                style.frame_color,
            ),
            Edge::Top => LinePrimitive::new(
                position,
                rect.top() - length,
                position,
                rect.top(),
                width,
                style.frame_color,
            ),
            Edge::Left => LinePrimitive::new(
                rect.left() - length,
                position,
                rect.left(),
                position,
                width,
                style.frame_color,
            ),
            Edge::Right => LinePrimitive::new(
                rect.right(),
                position,
                rect.right() + length,
                position,
                width,
                style.frame_color,
            ),
        };
        sink.push(CanvasLayerKind::Axis, line);

        let Some(label) = tick.label.as_deref().filter(|label| !label.is_empty()) else {
            continue;
        };
        let offset = major_length + label_pad;
        let (x, y, align) = match edge {
            Edge::Bottom => (
                position,
                rect.bottom() + offset,
                (TextHAlign::Center, TextVAlign::Top),
            ),
            Edge::Top => (
                position,
                rect.top() - offset,
                (TextHAlign::Center, TextVAlign::Bottom),
            ),
            Edge::Left => (
                rect.left() - offset,
                position,
                (TextHAlign::Right, TextVAlign::Center),
            ),
            Edge::Right => (
                rect.right() + offset,
                position,
                (TextHAlign::Left, TextVAlign::Center),
            ),
        };
        let extent = match edge {
            Edge::Bottom | Edge::Top => font_px * LINE_HEIGHT_EM,
            Edge::Left | Edge::Right => estimate_text_width(label, font_px, false),
        };
        label_extent = label_extent.max(offset + extent);
        sink.push(
            CanvasLayerKind::Axis,
            ctx.text(
                label,
                x,
                y,
                style.tick_label_font_size_pt,
                style.text_color,
                align,
            ),
        );
    }
    Ok(label_extent.max(major_length))
}

/// Axis title outside the tick labels; vertical axes read bottom to top.
fn append_axis_label(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    edge: Edge,
    label: &str,
    depth: f64,
) {
    if label.is_empty() {
        return;
    }
    let rect = ctx.rect;
    let offset = depth + ctx.pt(ctx.style.axis_label_pad_pt);
    let (x, y, align, rotation) = match edge {
        Edge::Bottom => (
            rect.center_x(),
            rect.bottom() + offset,
            (TextHAlign::Center, TextVAlign::Top),
            0.0,
        ),
        Edge::Top => (
            rect.center_x(),
            rect.top() - offset,
            (TextHAlign::Center, TextVAlign::Bottom),
            0.0,
        ),
        Edge::Left => (
            rect.left() - offset,
            rect.center_y(),
            (TextHAlign::Right, TextVAlign::Center),
            90.0,
        ),
        Edge::Right => (
            rect.right() + offset,
            rect.center_y(),
            (TextHAlign::Left, TextVAlign::Center),
            90.0,
        ),
    };
    sink.push(
        CanvasLayerKind::Axis,
        ctx.text(
            label,
            x,
            y,
            ctx.style.axis_label_font_size_pt,
            ctx.style.text_color,
            align,
        )
        .with_rotation(rotation)
        .with_markup(true),
    );
}

fn inside(position: f64, low: f64, high: f64) -> bool {
    position >= low - POSITION_EPSILON && position <= high + POSITION_EPSILON
}
