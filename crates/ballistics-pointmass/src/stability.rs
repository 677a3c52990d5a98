use ballistics_core::length::inch;
use ballistics_core::mass::grain;
use ballistics_core::pressure::inch_of_mercury;
use ballistics_core::thermodynamic_temperature::degree_fahrenheit;
use ballistics_core::velocity::foot_per_second;
use ballistics_core::{Atmosphere, Velocity};

use crate::{Projectile, Twist, TwistDirection};

/// Gyroscopic stability factor (Miller twist rule), corrected for muzzle
/// velocity and air density.
///
/// `None` when the projectile has no dimensions.
pub fn stability_coefficient(
    projectile: &Projectile,
    twist: &Twist,
    muzzle_velocity: Velocity,
    atmosphere: &Atmosphere,
) -> Option<f64> {
    let dims = projectile.dimensions()?;

    let weight = projectile.weight().get::<grain>();
    let diameter = dims.diameter.get::<inch>();
    let twist_calibers = twist.rate.get::<inch>() / diameter;
    let length_calibers = dims.length.get::<inch>() / diameter;

    let sd = 30.0 * weight
        / (twist_calibers.powi(2) * diameter.powi(3) * length_calibers * (1.0 + length_calibers.powi(2)));
    let fv = (muzzle_velocity.get::<foot_per_second>() / 2800.0).powf(1.0 / 3.0);

    let ft = atmosphere.temperature().get::<degree_fahrenheit>();
    let pt = atmosphere.pressure().get::<inch_of_mercury>();
    let ftp = ((ft + 460.0) / (59.0 + 460.0)) * (29.92 / pt);

    Some(sd * fv * ftp)
}

/// Litz spin drift [ft] after `time` seconds of flight.
pub fn spin_drift(stability: f64, time: f64, direction: TwistDirection) -> f64 {
    1.25 * (stability + 1.2) * time.powf(1.83) * direction.sign() / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ballistics_core::{Length, Mass};
    use ballistics_models::{BallisticCoefficient, DragFamily};

    fn bullet_308() -> Projectile {
        Projectile::with_dimensions(
            BallisticCoefficient::new(0.223, DragFamily::G7).unwrap(),
            Mass::new::<grain>(168.0),
            Length::new::<inch>(0.308),
            Length::new::<inch>(1.282),
        )
        .unwrap()
    }

    fn right_twist(rate_in: f64) -> Twist {
        Twist { direction: TwistDirection::Right, rate: Length::new::<inch>(rate_in) }
    }

    #[test]
    fn miller_stability_for_a_308_match_bullet() {
        let sg = stability_coefficient(
            &bullet_308(),
            &right_twist(11.24),
            Velocity::new::<foot_per_second>(2750.0),
            &Atmosphere::standard(),
        )
        .unwrap();
        assert_abs_diff_eq!(sg, 1.688, epsilon = 0.01);
    }

    #[test]
    fn faster_twist_is_more_stable() {
        let mv = Velocity::new::<foot_per_second>(2750.0);
        let atmo = Atmosphere::standard();
        let slow = stability_coefficient(&bullet_308(), &right_twist(12.0), mv, &atmo).unwrap();
        let fast = stability_coefficient(&bullet_308(), &right_twist(10.0), mv, &atmo).unwrap();
        assert!(fast > slow);
    }

    #[test]
    fn no_dimensions_no_stability() {
        let projectile = Projectile::new(
            BallisticCoefficient::new(0.223, DragFamily::G7).unwrap(),
            Mass::new::<grain>(168.0),
        )
        .unwrap();
        let sg = stability_coefficient(
            &projectile,
            &right_twist(11.24),
            Velocity::new::<foot_per_second>(2750.0),
            &Atmosphere::standard(),
        );
        assert!(sg.is_none());
    }

    #[test]
    fn drift_direction_follows_twist() {
        let right = spin_drift(1.7, 1.0, TwistDirection::Right);
        let left = spin_drift(1.7, 1.0, TwistDirection::Left);
        assert_abs_diff_eq!(right, 1.25 * 2.9 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(left, -right);
        assert_eq!(spin_drift(1.7, 0.0, TwistDirection::Right), 0.0);
    }
}
