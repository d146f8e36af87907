use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{FigureError, FigureResult};
use crate::render::{
    Color, LinePrimitive, MarkerPrimitive, MarkerShape, PolylinePrimitive, Primitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

const FONT_FAMILY: &str = "DejaVu Sans, Sans";
const STAR_INNER_RATIO: f64 = 0.381_966;
const SQUARE_SIDE_RATIO: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension trait for renderers that can draw into an external Cairo
/// context, such as a translated context over a cropped surface.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> FigureResult<()>;
}

/// Cairo + Pango + PangoCairo raster backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> FigureResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(FigureError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> FigureResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_line_join(LineJoin::Round);
        context.set_line_cap(LineCap::Butt);

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line(line) => {
                    draw_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                Primitive::Polyline(polyline) => {
                    draw_polyline(context, polyline)?;
                    stats.polylines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    draw_rect(context, *rect)?;
                    stats.rects_drawn += 1;
                }
                Primitive::Marker(marker) => {
                    draw_marker(context, *marker)?;
                    stats.markers_drawn += 1;
                }
                Primitive::Text(text) => {
                    draw_text(context, text)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> FigureResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_line(context: &Context, line: &LinePrimitive) -> FigureResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.set_dash(&line.stroke_style.dash_pattern(line.stroke_width), 0.0);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let result = context.stroke();
    context.set_dash(&[], 0.0);
    result.map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_polyline(context: &Context, polyline: &PolylinePrimitive) -> FigureResult<()> {
    let mut points = polyline.points.iter();
    let Some(first) = points.next() else {
        return Ok(());
    };
    apply_color(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context.set_dash(
        &polyline.stroke_style.dash_pattern(polyline.stroke_width),
        0.0,
    );
    context.move_to(first.x, first.y);
    for point in points {
        context.line_to(point.x, point.y);
    }
    let result = context.stroke();
    context.set_dash(&[], 0.0);
    result.map_err(|err| map_backend_error("failed to stroke polyline", err))
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> FigureResult<()> {
    append_rect_path(context, rect);
    let stroke = rect.border_width > 0.0 && rect.border_color.alpha > 0.0;
    apply_color(context, rect.fill_color);
    if stroke {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_marker(context: &Context, marker: MarkerPrimitive) -> FigureResult<()> {
    let radius = marker.size_px / 2.0;
    context.new_path();
    match marker.shape {
        MarkerShape::Circle => context.arc(marker.x, marker.y, radius, 0.0, TAU),
        MarkerShape::Point => context.arc(marker.x, marker.y, radius / 2.0, 0.0, TAU),
        MarkerShape::Square => {
            let side = marker.size_px * SQUARE_SIDE_RATIO;
            context.rectangle(marker.x - side / 2.0, marker.y - side / 2.0, side, side);
        }
        MarkerShape::TriangleDown => {
            append_polygon(context, marker.x, marker.y, &regular_polygon(3, radius, FRAC_PI_2));
        }
        MarkerShape::Pentagon => {
            append_polygon(context, marker.x, marker.y, &regular_polygon(5, radius, -FRAC_PI_2));
        }
        MarkerShape::Star => {
            append_polygon(context, marker.x, marker.y, &star_vertices(radius));
        }
    }

    let stroke = marker.edge_width > 0.0 && marker.edge_color.alpha > 0.0;
    if marker.fill_color.alpha > 0.0 {
        apply_color(context, marker.fill_color);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill marker", err))?;
    }
    if stroke {
        apply_color(context, marker.edge_color);
        context.set_line_width(marker.edge_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke marker", err))
    } else {
        context.new_path();
        Ok(())
    }
}

/// Vertices on a circle, the first at `start_angle` (screen radians, y down).
fn regular_polygon(sides: usize, radius: f64, start_angle: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|index| {
            let angle = start_angle + TAU * index as f64 / sides as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn star_vertices(radius: f64) -> Vec<(f64, f64)> {
    (0..10)
        .map(|index| {
            let r = if index % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = -FRAC_PI_2 + PI * index as f64 / 5.0;
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

fn append_polygon(context: &Context, cx: f64, cy: f64, vertices: &[(f64, f64)]) {
    let mut iter = vertices.iter();
    if let Some((x, y)) = iter.next() {
        context.move_to(cx + x, cy + y);
        for (x, y) in iter {
            context.line_to(cx + x, cy + y);
        }
        context.close_path();
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) -> FigureResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string(FONT_FAMILY);
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_alignment(match text.h_align {
        TextHAlign::Left => pango::Alignment::Left,
        TextHAlign::Center => pango::Alignment::Center,
        TextHAlign::Right => pango::Alignment::Right,
    });
    if text.markup {
        layout.set_markup(&text.text);
    } else {
        layout.set_text(&text.text);
    }

    let (_, logical) = layout.pixel_extents();
    let width = f64::from(logical.width());
    let height = f64::from(logical.height());
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    // Screen-space bounding box of the (possibly rotated) layout box.
    let angle = -text.rotation_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let corners = [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)]
        .map(|(x, y)| (x * cos - y * sin, x * sin + y * cos));
    let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

    let origin_x = match text.h_align {
        TextHAlign::Left => text.x - min_x,
        TextHAlign::Center => text.x - (min_x + max_x) / 2.0,
        TextHAlign::Right => text.x - max_x,
    };
    let origin_y = match text.v_align {
        TextVAlign::Top => text.y - min_y,
        TextVAlign::Center => text.y - (min_y + max_y) / 2.0,
        TextVAlign::Baseline if text.rotation_deg == 0.0 => text.y - baseline,
        TextVAlign::Baseline | TextVAlign::Bottom => text.y - max_y,
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    apply_color(context, text.color);
    context.translate(origin_x, origin_y);
    context.rotate(angle);
    context.move_to(0.0, 0.0);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

pub(crate) fn map_backend_error(prefix: &str, err: impl std::fmt::Display) -> FigureError {
    FigureError::Backend(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{regular_polygon, star_vertices};

    #[test]
    fn triangle_down_has_a_vertex_below_centre() {
        let vertices = regular_polygon(3, 10.0, std::f64::consts::FRAC_PI_2);
        assert!((vertices[0].0).abs() < 1e-9);
        assert!((vertices[0].1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn star_alternates_outer_and_inner_radius() {
        let vertices = star_vertices(10.0);
        assert_eq!(vertices.len(), 10);
        let radius = |(x, y): (f64, f64)| x.hypot(y);
        assert!((radius(vertices[0]) - 10.0).abs() < 1e-9);
        assert!((radius(vertices[1]) - 3.81966).abs() < 1e-9);
    }
}
