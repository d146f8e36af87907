use crate::core::{PlotRect, clip_segment};
use crate::error::FigureResult;
use crate::figure::{
    Annotation, ArrowAnnotation, Hatch, ReferenceLine, Span, SpanOrientation, TextAnnotation,
};
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

use super::{PanelContext, PanelSink};

/// `->` arrow head size in units of the annotation font size.
const ARROW_HEAD_LENGTH_EM: f64 = 0.4;
const ARROW_HEAD_HALF_WIDTH_EM: f64 = 0.2;

pub(super) fn append_spans(sink: &mut PanelSink<'_>, ctx: &PanelContext<'_>) -> FigureResult<()> {
    for span in &ctx.panel.spans {
        let Some(area) = span_rect(span, ctx)? else {
            continue;
        };
        sink.push(
            CanvasLayerKind::Shading,
            RectPrimitive::new(area.x, area.y, area.width, area.height, span.color),
        );
        if let Some(hatch) = span.hatch {
            append_hatch(sink, ctx, area, hatch);
        }
    }
    Ok(())
}

/// Pixel rectangle covered by a span, clipped to the plot area.
fn span_rect(span: &Span, ctx: &PanelContext<'_>) -> FigureResult<Option<PlotRect>> {
    let rect = ctx.rect;
    let area = match span.orientation {
        SpanOrientation::Horizontal => PlotRect::from_corners(
            rect.left(),
            ctx.y_px(span.start)?,
            rect.right(),
            ctx.y_px(span.end)?,
        ),
        SpanOrientation::Vertical => PlotRect::from_corners(
            ctx.x_px(span.start)?,
            rect.top(),
            ctx.x_px(span.end)?,
            rect.bottom(),
        ),
    };
    Ok(area
        .intersection(rect)
        .filter(|area| area.width > 0.0 && area.height > 0.0))
}

/// `/` hatch: lines `x + y = k · spacing` in pixel space, clipped to `area`.
fn append_hatch(sink: &mut PanelSink<'_>, ctx: &PanelContext<'_>, area: PlotRect, hatch: Hatch) {
    let spacing = hatch.spacing_px(ctx.config.dpi);
    let width = ctx.pt(ctx.style.hatch_width_pt);
    let first = ((area.left() + area.top()) / spacing).floor() as i64;
    let last = ((area.right() + area.bottom()) / spacing).ceil() as i64;
    for k in first..=last {
        let sum = k as f64 * spacing;
        let segment = clip_segment(
            sum - area.bottom(),
            area.bottom(),
            sum - area.top(),
            area.top(),
            area,
        );
        if let Some((x1, y1, x2, y2)) = segment
            && (x1 != x2 || y1 != y2)
        {
            sink.push(
                CanvasLayerKind::Shading,
                LinePrimitive::new(x1, y1, x2, y2, width, hatch.color),
            );
        }
    }
}

pub(super) fn append_annotations(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
) -> FigureResult<()> {
    for annotation in &ctx.panel.annotations {
        match annotation {
            Annotation::Text(text) => append_text(sink, ctx, text)?,
            Annotation::Arrow(arrow) => append_arrow(sink, ctx, arrow)?,
            Annotation::Line(line) => append_reference_line(sink, ctx, line)?,
        }
    }
    Ok(())
}

fn append_text(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    text: &TextAnnotation,
) -> FigureResult<()> {
    let (x, y) = ctx.to_px(text.x, text.y)?;
    let (dx, dy) = text.offset_pt;
    sink.push(
        CanvasLayerKind::Annotation,
        ctx.text(
            text.text.clone(),
            x + ctx.pt(dx),
            y - ctx.pt(dy),
            text.font_size_pt,
            text.color,
            (text.h_align, text.v_align),
        )
        .with_rotation(text.rotation_deg)
        .with_markup(text.markup),
    );
    Ok(())
}

/// Label centred above `text_at` and an open-headed arrow down to `tip`,
/// shortened at both ends.
fn append_arrow(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    arrow: &ArrowAnnotation,
) -> FigureResult<()> {
    let (text_x, text_y) = ctx.to_px(arrow.text_at.0, arrow.text_at.1)?;
    let (tip_x, tip_y) = ctx.to_px(arrow.tip.0, arrow.tip.1)?;

    let label: TextPrimitive = ctx.text(
        arrow.text.clone(),
        text_x,
        text_y,
        arrow.font_size_pt,
        arrow.color,
        (TextHAlign::Center, TextVAlign::Bottom),
    );
    sink.push(CanvasLayerKind::Annotation, label);

    let shrink = ctx.pt(ctx.style.arrow_shrink_pt);
    let (dx, dy) = (tip_x - text_x, tip_y - text_y);
    let length = dx.hypot(dy);
    if length <= 2.0 * shrink {
        return Ok(());
    }
    let (ux, uy) = (dx / length, dy / length);
    let start = (text_x + ux * shrink, text_y + uy * shrink);
    let end = (tip_x - ux * shrink, tip_y - uy * shrink);
    let width = ctx.pt(arrow.width_pt);

    sink.push(
        CanvasLayerKind::Annotation,
        LinePrimitive::new(start.0, start.1, end.0, end.1, width, arrow.color),
    );

    let head_length = ctx.pt(ARROW_HEAD_LENGTH_EM * arrow.font_size_pt);
    let head_half_width = ctx.pt(ARROW_HEAD_HALF_WIDTH_EM * arrow.font_size_pt);
    let base = (end.0 - ux * head_length, end.1 - uy * head_length);
    for side in [-1.0, 1.0] {
        // Normal of the shaft direction is (-uy, ux).
        let wing = (
            base.0 - side * uy * head_half_width,
            base.1 + side * ux * head_half_width,
        );
        sink.push(
            CanvasLayerKind::Annotation,
            LinePrimitive::new(wing.0, wing.1, end.0, end.1, width, arrow.color),
        );
    }
    Ok(())
}

fn append_reference_line(
    sink: &mut PanelSink<'_>,
    ctx: &PanelContext<'_>,
    line: &ReferenceLine,
) -> FigureResult<()> {
    let rect = ctx.rect;
    let (x1, y1, x2, y2) = match line.orientation {
        SpanOrientation::Vertical => {
            let x = ctx.x_px(line.value)?;
            (x, rect.top(), x, rect.bottom())
        }
        SpanOrientation::Horizontal => {
            let y = ctx.y_px(line.value)?;
            (rect.left(), y, rect.right(), y)
        }
    };
    if !rect.contains(x1, y1) || !rect.contains(x2, y2) {
        return Ok(());
    }
    sink.push(
        CanvasLayerKind::Annotation,
        LinePrimitive::new(x1, y1, x2, y2, ctx.pt(line.width_pt), line.color)
            .with_stroke_style(line.stroke),
    );
    Ok(())
}
