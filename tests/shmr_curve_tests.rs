use approx::assert_relative_eq;
use galaxy_figures::core::{EfficiencyCurve, ShmrParameters, logspace};
use galaxy_figures::figure::passive_nd::shmr_summary;
use proptest::prelude::*;

#[test]
fn efficiency_at_characteristic_mass_is_exactly_normalization() {
    let parameters = ShmrParameters::new(10f64.powf(11.8), 0.03, 1.3, 0.6).expect("valid");
    let efficiency = parameters
        .efficiency(10f64.powf(11.8))
        .expect("positive mass");
    assert_eq!(efficiency, 0.03);
}

#[test]
fn sampled_peak_matches_closed_form_within_grid_spacing() {
    let summary = shmr_summary().expect("summary");
    let analytic = ShmrParameters::moster13_like().analytic_peak();
    // 100 samples over five decades.
    let grid_step = 5.0 / 99.0;

    assert!((summary.peak.peak.log_halo_mass - analytic.log_halo_mass).abs() <= grid_step / 2.0);
    assert!(summary.peak.peak.efficiency <= analytic.efficiency);
    assert_relative_eq!(
        summary.peak.peak.efficiency,
        analytic.efficiency,
        max_relative = 1e-3
    );
}

#[test]
fn analytic_peak_location_for_default_parameters() {
    let peak = ShmrParameters::moster13_like().analytic_peak();
    let expected = 11.8 + (1.3f64 / 0.6).log10() / 1.9;
    assert_relative_eq!(peak.log_halo_mass, expected, epsilon = 1e-12);
}

#[test]
fn curve_on_figure_grid_has_one_local_maximum() {
    let summary = shmr_summary().expect("summary");
    assert_eq!(summary.curve.halo_masses.len(), 100);
    assert_eq!(summary.curve.local_maxima(), vec![summary.peak.index]);
}

#[test]
fn evaluate_rejects_non_positive_masses() {
    let err = EfficiencyCurve::evaluate(&ShmrParameters::moster13_like(), vec![1.0e12, 0.0]);
    assert!(err.is_err());
}

proptest! {
    #[test]
    fn efficiency_is_positive_for_positive_masses(log_mass in -5.0f64..25.0) {
        let parameters = ShmrParameters::moster13_like();
        let efficiency = parameters.efficiency(10f64.powf(log_mass)).expect("positive mass");
        prop_assert!(efficiency > 0.0);
        prop_assert!(efficiency <= 0.03 * 2.0);
    }

    #[test]
    fn efficiency_is_unimodal_on_log_grid(
        log_m1 in 10.5f64..14.0,
        normalization in 0.005f64..0.1,
        alpha in 0.5f64..2.5,
        beta in 0.3f64..1.5,
    ) {
        let parameters = ShmrParameters::new(10f64.powf(log_m1), normalization, alpha, beta)
            .expect("valid parameters");
        let curve = EfficiencyCurve::evaluate(&parameters, logspace(10.0, 15.0, 200))
            .expect("curve");
        let peak = curve.peak().expect("finite samples").index;

        // Non-decreasing up to the peak, non-increasing after it.
        for window in curve.efficiencies[..=peak].windows(2) {
            prop_assert!(window[1] >= window[0]);
        }
        for window in curve.efficiencies[peak..].windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
        prop_assert!(curve.local_maxima().len() <= 1);
    }
}
