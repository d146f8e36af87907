use galaxy_figures::FigureError;
use galaxy_figures::core::stellar_mass_limit;
use galaxy_figures::data::{
    SampleSelection, comparison_curves, eagle, flares, observations, shuntov22_z5,
    simulation_catalogue, survey_catalogue,
};
use galaxy_figures::figure::{ErrorBar, Series};
use galaxy_figures::render::Color;

#[test]
fn eagle_short_columns_fail_with_length_mismatch() {
    let table = eagle();
    for selection in [
        SampleSelection::Mass5e9SsfrBelow1,
        SampleSelection::Mass5e9SsfrBelow2,
        SampleSelection::Mass1e10SsfrBelow2,
    ] {
        let err = table
            .series(selection, Color::BLUE)
            .expect_err("five values for six redshifts");
        match err {
            FigureError::LengthMismatch {
                field,
                expected,
                actual,
                ..
            } => {
                assert_eq!(field, "y");
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn plotted_selection_is_complete_in_both_simulations() {
    let selection = SampleSelection::Mass1e10SsfrBelow1;
    let flares = flares().series(selection, Color::RED).expect("flares");
    let eagle = eagle().series(selection, Color::BLUE).expect("eagle");
    assert_eq!(flares.len(), 3);
    assert_eq!(eagle.len(), 6);
    assert_eq!(eagle.y().last().copied(), Some(-2.65));
}

#[test]
fn mismatched_pairs_are_rejected_not_truncated() {
    let err = Series::line("bad", vec![1.0, 2.0, 3.0], vec![1.0, 2.0], Color::BLACK)
        .expect_err("mismatch");
    assert!(matches!(err, FigureError::LengthMismatch { field: "y", .. }));

    let series = Series::line("ok", vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], Color::BLACK)
        .expect("series");
    let err = series
        .with_y_error(ErrorBar::Asymmetric {
            lower: vec![0.1; 3],
            upper: vec![0.1; 2],
        })
        .expect_err("short upper extents");
    assert!(matches!(
        err,
        FigureError::LengthMismatch {
            field: "y_error.upper",
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn negative_error_extent_is_invalid() {
    let series =
        Series::line("ok", vec![1.0, 2.0], vec![1.0, 2.0], Color::BLACK).expect("series");
    let err = series
        .with_x_error(ErrorBar::Symmetric(vec![0.1, -0.1]))
        .expect_err("negative extent");
    assert!(matches!(err, FigureError::InvalidData(_)));
}

#[test]
fn every_published_dataset_builds() {
    let observations = observations();
    assert_eq!(observations.len(), 9);
    for observation in &observations {
        let series = observation
            .series(Color::GREY)
            .unwrap_or_else(|err| panic!("{}: {err}", observation.reference));
        assert_eq!(series.len(), observation.redshifts.len());
        assert_eq!(series.label(), None);
    }

    let curves = comparison_curves();
    let names: Vec<&str> = curves.iter().map(|curve| curve.name).collect();
    assert_eq!(names, vec!["Simba", "Magneticum", "IllustrisTNG"]);
    for curve in &curves {
        curve.series().expect("comparison curve");
    }

    let shuntov = shuntov22_z5();
    assert!(shuntov.efficiencies().iter().all(|value| *value > 0.0));
    shuntov.series(Color::BLUE, 2.0).expect("shuntov series");
}

#[test]
fn simulation_catalogue_keeps_catalogue_order() {
    let catalogue = simulation_catalogue();
    assert_eq!(catalogue.len(), 26);
    assert_eq!(catalogue.get_index(0).map(|(name, _)| *name), Some("EAGLE-Ref"));
    assert_eq!(catalogue.get_index(25).map(|(name, _)| *name), Some("CAMELS-2"));

    let starred: Vec<&str> = catalogue
        .iter()
        .filter(|(_, run)| run.starred)
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(starred, vec!["FLAMELS", "FLARES"]);

    let radiative: Vec<&str> = catalogue
        .iter()
        .filter(|(_, run)| run.radiative_transfer)
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(radiative, vec!["THESAN-1", "THESAN-2", "SPHINX"]);
}

#[test]
fn surveys_are_listed_at_redshift_seven() {
    let surveys = survey_catalogue();
    assert_eq!(surveys.len(), 5);
    assert!(surveys.iter().all(|survey| survey.redshift == 7.0));
    // Areas decrease down the list.
    assert!(
        surveys
            .windows(2)
            .all(|pair| pair[0].area > pair[1].area)
    );
}

#[test]
fn resolved_stellar_mass_is_one_hundred_elements() {
    assert!((stellar_mass_limit(1.0e6) - 8.0).abs() < 1e-12);
    let catalogue = simulation_catalogue();
    let eagle = &catalogue["EAGLE-Ref"];
    assert!((eagle.log_min_stellar_mass() - eagle.log_element_mass() - 2.0).abs() < 1e-12);
}
