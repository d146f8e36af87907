use approx::assert_relative_eq;
use galaxy_figures::core::Cosmology;
use proptest::prelude::*;

#[test]
fn expansion_rate_is_unity_today() {
    assert_relative_eq!(Cosmology::PLANCK15.e_of_z(0.0), 1.0, epsilon = 1e-12);
}

#[test]
fn comoving_distance_grows_with_redshift() {
    let cosmology = Cosmology::PLANCK15;
    let distances: Vec<f64> = [0.5, 1.0, 3.0, 7.0, 10.0]
        .iter()
        .map(|z| cosmology.comoving_distance(*z))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[1] > pair[0]));
    assert_eq!(cosmology.comoving_distance(0.0), 0.0);
}

#[test]
fn comoving_distance_to_redshift_seven_is_about_nine_gpc() {
    let distance = Cosmology::PLANCK15.comoving_distance(7.0);
    assert!(distance > 8_500.0 && distance < 9_200.0, "{distance}");
}

#[test]
fn slice_conversions_reject_bad_inputs() {
    let cosmology = Cosmology::PLANCK15;
    assert!(cosmology.volume_to_area(1.0e6, 0.0, 1.0).is_err());
    assert!(cosmology.volume_to_area(1.0e6, 7.0, 0.0).is_err());
    assert!(cosmology.volume_to_area(-1.0, 7.0, 1.0).is_err());
    assert!(cosmology.area_to_volume(f64::NAN, 7.0, 1.0).is_err());
}

proptest! {
    #[test]
    fn area_and_volume_conversions_invert(
        log_volume in 2.0f64..11.0,
        redshift in 0.5f64..12.0,
        delta_z in 0.1f64..2.0,
    ) {
        let cosmology = Cosmology::PLANCK15;
        let volume = 10f64.powf(log_volume);
        let area = cosmology.volume_to_area(volume, redshift, delta_z).expect("area");
        let back = cosmology.area_to_volume(area, redshift, delta_z).expect("volume");
        prop_assert!(((back - volume) / volume).abs() <= 1e-12);
    }
}
