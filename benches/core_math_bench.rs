use criterion::{Criterion, criterion_group, criterion_main};
use galaxy_figures::core::{AxisScale, EfficiencyCurve, PixelSpan, ShmrParameters, logspace};
use galaxy_figures::figure::landscape::{LandscapeOptions, build_simulation_landscape_figure};
use galaxy_figures::figure::passive_nd::build_passive_nd_figure;
use galaxy_figures::render::{NullRenderer, Renderer, compose_figure};
use std::hint::black_box;

fn bench_log_scale_round_trip(c: &mut Criterion) {
    let scale = AxisScale::log10(0.001, 0.08).expect("valid scale");
    let span = PixelSpan::new(720.0, 420.0);

    c.bench_function("log_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale
                .domain_to_pixel(black_box(0.0234), span)
                .expect("to pixel");
            let _ = scale.pixel_to_domain(px, span).expect("from pixel");
        })
    });
}

fn bench_efficiency_curve_10k(c: &mut Criterion) {
    let parameters = ShmrParameters::moster13_like();
    let masses = logspace(10.0, 15.0, 10_000);

    c.bench_function("efficiency_curve_10k", |b| {
        b.iter(|| {
            let curve = EfficiencyCurve::evaluate(black_box(&parameters), masses.clone())
                .expect("curve should evaluate");
            let _ = black_box(curve.peak());
        })
    });
}

fn bench_compose_passive_figure(c: &mut Criterion) {
    let figure = build_passive_nd_figure().expect("figure");
    let mut renderer = NullRenderer::default();

    c.bench_function("compose_passive_nd_figure", |b| {
        b.iter(|| {
            let frame = compose_figure(black_box(&figure))
                .expect("compose should succeed")
                .flatten();
            renderer.render(&frame).expect("render should succeed");
        })
    });
}

fn bench_build_landscape_area_mode(c: &mut Criterion) {
    let options = LandscapeOptions::default().with_y_axis(
        "area"
            .parse()
            .expect("area is a valid y axis mode"),
    );

    c.bench_function("build_landscape_area_mode", |b| {
        b.iter(|| {
            let figure =
                build_simulation_landscape_figure(black_box(options)).expect("figure builds");
            let _ = compose_figure(&figure).expect("compose should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_log_scale_round_trip,
    bench_efficiency_curve_10k,
    bench_compose_passive_figure,
    bench_build_landscape_area_mode
);
criterion_main!(benches);
