use crate::core::PlotRect;
use crate::error::{FigureError, FigureResult};
use crate::figure::{AxisSide, Figure, FigureStyle, Panel};

const LINE_HEIGHT_EM: f64 = 1.2;

/// Plot rectangles of every panel, stacked top to bottom.
///
/// Panels share the page height in proportion to their height ratios once
/// margins and inter-panel gaps are removed. A top secondary axis reserves
/// room for its ticks and label above its panel.
pub fn panel_plot_rects(figure: &Figure) -> FigureResult<Vec<PlotRect>> {
    let viewport = figure.viewport();
    let style = &figure.style;
    let pt = |points: f64| figure.pt_to_px(points);

    let left = pt(style.margin_left_pt);
    let right = f64::from(viewport.width) - pt(style.margin_right_pt);
    let width = right - left;

    let reserved: f64 = figure
        .panels
        .iter()
        .map(|panel| pt(top_axis_room_pt(panel, style)))
        .sum();
    let gaps = pt(style.panel_gap_pt) * figure.panels.len().saturating_sub(1) as f64;
    let available = f64::from(viewport.height)
        - pt(style.margin_top_pt)
        - pt(style.margin_bottom_pt)
        - gaps
        - reserved;
    let ratio_sum: f64 = figure.panels.iter().map(|panel| panel.height_ratio).sum();

    if width <= 0.0 || available <= 0.0 || ratio_sum <= 0.0 {
        return Err(FigureError::InvalidData(
            "figure margins leave no room for the plot area".to_owned(),
        ));
    }

    let mut cursor = pt(style.margin_top_pt);
    let mut rects = Vec::with_capacity(figure.panels.len());
    for panel in &figure.panels {
        cursor += pt(top_axis_room_pt(panel, style));
        let height = available * panel.height_ratio / ratio_sum;
        rects.push(PlotRect::new(left, cursor, width, height));
        cursor += height + pt(style.panel_gap_pt);
    }
    Ok(rects)
}

fn top_axis_room_pt(panel: &Panel, style: &FigureStyle) -> f64 {
    match &panel.secondary_axis {
        Some(axis) if axis.side == AxisSide::Top => {
            style.major_tick_length_pt
                + style.tick_label_pad_pt
                + style.tick_label_font_size_pt * LINE_HEIGHT_EM
                + style.axis_label_pad_pt
                + style.axis_label_font_size_pt * LINE_HEIGHT_EM
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::panel_plot_rects;
    use crate::figure::passive_nd::build_passive_nd_figure;
    use crate::figure::{Axis, Figure, FigureConfig, FigureStyle, Panel};

    fn panel(ratio: f64) -> Panel {
        Panel::new(
            Axis::linear(0.0, 1.0, "x").expect("x axis"),
            Axis::linear(0.0, 1.0, "y").expect("y axis"),
        )
        .with_height_ratio(ratio)
    }

    #[test]
    fn equal_ratios_give_equal_heights_without_overlap() {
        let figure = build_passive_nd_figure().expect("figure");
        let rects = panel_plot_rects(&figure).expect("rects");
        assert_eq!(rects.len(), 2);
        assert!((rects[0].height - rects[1].height).abs() < 1e-9);
        assert!(rects[0].bottom() < rects[1].top());
        assert!(rects[1].bottom() <= 800.0);
    }

    #[test]
    fn height_ratios_split_space_left_after_margins_and_gaps() {
        // 72 dpi makes one point one pixel.
        let figure = Figure::new(FigureConfig::new(4.0, 6.0).with_dpi(72.0))
            .with_style(
                FigureStyle::default()
                    .with_margins(10.0, 10.0, 10.0, 10.0)
                    .with_panel_gap_pt(20.0),
            )
            .with_panel(panel(2.0))
            .with_panel(panel(1.0));
        let rects = panel_plot_rects(&figure).expect("rects");

        assert!((rects[0].y - 10.0).abs() < 1e-9);
        assert!((rects[0].width - 268.0).abs() < 1e-9);
        assert!((rects[0].height + rects[1].height - 392.0).abs() < 1e-9);
        assert!((rects[0].height / rects[1].height - 2.0).abs() < 1e-9);
        assert!((rects[1].top() - rects[0].bottom() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let figure = Figure::new(FigureConfig::new(1.0, 1.0).with_dpi(72.0))
            .with_style(FigureStyle::default().with_margins(40.0, 40.0, 10.0, 10.0))
            .with_panel(panel(1.0));
        assert!(panel_plot_rects(&figure).is_err());
    }
}
