use approx::assert_relative_eq;
use kacwalk::prelude::*;

#[test]
fn diffusion_norm_explodes_while_kac_stays_bounded() {
    let model = VelocityFieldModel::default();
    let curves = model.norm_curves(&Grid::norm_times().values());
    assert_eq!(curves.t.len(), 100);

    for w in curves.diffusion.windows(2) {
        assert!(w[1] > w[0]);
    }
    for &k in curves.kac.iter() {
        assert_relative_eq!(k, 4.0);
    }
    assert_relative_eq!(curves.diffusion[0], 1.0, epsilon = 1e-5);
    assert_relative_eq!(curves.diffusion[99], 100.0, max_relative = 1e-3);
}

#[test]
fn diffusion_norm_diverges_near_terminal_time() {
    let model = VelocityFieldModel::default();
    let near = [0.9, 0.99, 0.999, 0.9999];
    let values: Vec<f64> = near.iter().map(|&t| model.diffusion_velocity_norm(t)).collect();
    for (value, t) in values.iter().zip(near) {
        assert_relative_eq!(*value, 1.0 / (1.0 - t), max_relative = 2e-2);
    }
    assert!(values[3] > 9000.0);
}

#[test]
fn field_profiles_follow_closed_forms() {
    let model = VelocityFieldModel::default();
    let xs = Grid::profile_xs().values();
    let profiles = model.field_profiles(&xs, &[0.1, 0.5, 0.9]);
    assert_eq!(profiles.len(), 3);

    for profile in &profiles {
        assert_eq!(profile.x.len(), 50);
        for (i, &x) in profile.x.iter().enumerate() {
            assert_relative_eq!(
                profile.diffusion[i],
                -x / (1.0 - profile.t + 1e-6),
                max_relative = 1e-12
            );
            assert_relative_eq!(profile.kac[i], -4.0 * x, max_relative = 1e-12);
        }
    }
    // slope of the diffusion field steepens as t grows, the Kac field does not change
    assert!(profiles[2].diffusion[0] > profiles[0].diffusion[0]);
    assert_eq!(profiles[0].kac, profiles[2].kac);
}
