use galaxy_figures::figure::landscape::{
    LandscapeOptions, YAxisMode, build_simulation_landscape_figure,
};
use galaxy_figures::figure::passive_nd::build_passive_nd_figure;
use galaxy_figures::render::{
    CanvasLayerKind, NullRenderer, PanelId, Primitive, Renderer, compose_figure,
};

fn texts(frame: &galaxy_figures::render::RenderFrame) -> Vec<String> {
    frame.texts().map(|text| text.text.clone()).collect()
}

#[test]
fn passive_figure_scene_is_deterministic() {
    let first = compose_figure(&build_passive_nd_figure().expect("figure")).expect("scene");
    let second = compose_figure(&build_passive_nd_figure().expect("figure")).expect("scene");
    assert_eq!(first, second);
}

#[test]
fn passive_figure_primitives_all_validate() {
    let figure = build_passive_nd_figure().expect("figure");
    let frame = compose_figure(&figure).expect("scene").flatten();

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    assert_eq!(renderer.last_primitive_count, frame.primitives.len());
    assert!(renderer.last_marker_count > 0);
    assert!(renderer.last_text_count > 0);
}

#[test]
fn passive_figure_has_two_stacked_panels() {
    let figure = build_passive_nd_figure().expect("figure");
    assert_eq!(figure.panels.len(), 2);
    assert_eq!(figure.viewport().width, 500);
    assert_eq!(figure.viewport().height, 800);

    let layered = compose_figure(&figure).expect("scene");
    let top = layered.plot_rect(PanelId::new(0)).expect("top panel");
    let bottom = layered.plot_rect(PanelId::new(1)).expect("bottom panel");
    assert!(top.bottom() < bottom.top());
}

#[test]
fn passive_figure_carries_its_annotations() {
    let figure = build_passive_nd_figure().expect("figure");
    let frame = compose_figure(&figure).expect("scene").flatten();
    let texts = texts(&frame);

    for expected in [
        "zoom-accessible regime",
        "Cosmic variance\nlimited regime",
        "Simba",
        "EAGLE",
    ] {
        assert!(
            texts.iter().any(|text| text.contains(expected)),
            "missing `{expected}`"
        );
    }
    assert!(texts.iter().any(|text| text.starts_with("Peak:")));
}

#[test]
fn shading_is_drawn_after_series_and_before_the_frame() {
    let figure = build_passive_nd_figure().expect("figure");
    let layered = compose_figure(&figure).expect("scene");
    let panel = PanelId::new(0);

    let shading = layered
        .layer(panel, CanvasLayerKind::Shading)
        .expect("shading layer");
    // Two spans plus hatch lines.
    let rects = shading
        .primitives
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Rect(_)))
        .count();
    assert_eq!(rects, 2);
    assert!(
        shading
            .primitives
            .iter()
            .any(|primitive| matches!(primitive, Primitive::Line(_)))
    );

    let order: Vec<CanvasLayerKind> = layered.panels[0]
        .layers
        .iter()
        .map(|layer| layer.kind)
        .collect();
    let position = |kind: CanvasLayerKind| order.iter().position(|candidate| *candidate == kind);
    assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Shading));
    assert!(position(CanvasLayerKind::Shading) < position(CanvasLayerKind::Axis));
}

#[test]
fn scene_primitives_stay_finite() {
    let figure = build_passive_nd_figure().expect("figure");
    let frame = compose_figure(&figure).expect("scene").flatten();
    for polyline in frame.polylines() {
        assert!(polyline.points.len() >= 2);
        assert!(
            polyline
                .points
                .iter()
                .all(|point| point.x.is_finite() && point.y.is_finite())
        );
    }
}

#[test]
fn landscape_volume_mode_draws_every_simulation() {
    let figure = build_simulation_landscape_figure(LandscapeOptions::default()).expect("figure");
    let frame = compose_figure(&figure).expect("scene").flatten();

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    // 26 points, 3 radiative-transfer rings, 2 stars.
    assert_eq!(renderer.last_marker_count, 31);

    let texts = texts(&frame);
    for name in ["EAGLE-Ref", "BAHAMAS", "SPHINX", "FLARES", "CAMELS-2"] {
        assert!(texts.iter().any(|text| text == name), "missing `{name}`");
    }
}

#[test]
fn landscape_area_mode_labels_surveys_inside_range() {
    let options = LandscapeOptions::default().with_y_axis(YAxisMode::Area);
    let figure = build_simulation_landscape_figure(options).expect("figure");
    let frame = compose_figure(&figure).expect("scene").flatten();
    NullRenderer::default().render(&frame).expect("valid frame");

    let texts = texts(&frame);
    for name in ["Euclid/Deep", "Webb/COSMOS-Web", "Webb/NGDEEP"] {
        assert!(texts.iter().any(|text| text == name), "missing `{name}`");
    }
    assert!(!texts.iter().any(|text| text == "All Sky"));
}

#[test]
fn landscape_scene_is_deterministic() {
    let options = LandscapeOptions::default().with_y_axis(YAxisMode::Area);
    let first = compose_figure(&build_simulation_landscape_figure(options).expect("figure"))
        .expect("scene");
    let second = compose_figure(&build_simulation_landscape_figure(options).expect("figure"))
        .expect("scene");
    assert_eq!(first, second);
}
