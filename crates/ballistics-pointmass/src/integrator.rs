//! Distance-stepped point-mass integrator shared by the zero solver and the
//! trajectory sampler.

use nalgebra::Vector3;

use ballistics_models::BallisticCoefficient;

use crate::SolverConfig;

/// Integration step [ft] for a caller distance granularity [ft].
///
/// Half the granularity; if that exceeds `maximum_step_ft` it is divided by
/// the power of ten that brings it one order of magnitude below the cap's.
pub(crate) fn calculation_step(granularity_ft: f64, maximum_step_ft: f64) -> f64 {
    let step = granularity_ft / 2.0;
    if step > maximum_step_ft {
        let step_order = step.log10().floor();
        let maximum_order = maximum_step_ft.log10().floor();
        return step / 10f64.powf(step_order - maximum_order + 1.0);
    }
    step
}

/// Air properties at the projectile's position.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Air {
    pub density_ratio: f64,
    pub speed_of_sound_fps: f64,
}

/// x downrange, y drop, z windage [ft]; velocity [fps]; time [s].
#[derive(Clone, Copy, Debug)]
pub(crate) struct FlightState {
    pub range: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub time: f64,
    /// |velocity|
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Halt {
    TooSlow,
    TooLow,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Step {
    pub state: FlightState,
    pub halt: Option<Halt>,
}

pub(crate) struct Integrator<'a> {
    coefficient: &'a BallisticCoefficient,
    ballistic_factor: f64,
    step: f64,
    gravity: Vector3<f64>,
    minimum_velocity: f64,
    maximum_drop: f64,
}

impl<'a> Integrator<'a> {
    pub fn new(coefficient: &'a BallisticCoefficient, ballistic_coefficient: f64, step: f64, config: &SolverConfig) -> Self {
        Self {
            coefficient,
            ballistic_factor: 1.0 / ballistic_coefficient,
            step,
            gravity: Vector3::new(0.0, config.gravity_fps2, 0.0),
            minimum_velocity: config.minimum_velocity_fps,
            maximum_drop: config.maximum_drop_ft,
        }
    }

    pub fn step_length(&self) -> f64 {
        self.step
    }

    /// State at the muzzle: the bore sits `sight_height_ft` below the line of
    /// sight and points `elevation` [rad] above it.
    pub fn launch(&self, muzzle_velocity_fps: f64, sight_height_ft: f64, elevation: f64) -> FlightState {
        let azimuth: f64 = 0.0;
        FlightState {
            range: Vector3::new(0.0, -sight_height_ft, 0.0),
            velocity: Vector3::new(
                elevation.cos() * azimuth.cos(),
                elevation.sin(),
                elevation.cos() * azimuth.sin(),
            ) * muzzle_velocity_fps,
            time: 0.0,
            speed: muzzle_velocity_fps,
        }
    }

    pub fn check(&self, state: &FlightState) -> Option<Halt> {
        if state.speed < self.minimum_velocity {
            Some(Halt::TooSlow)
        } else if state.range.y < self.maximum_drop {
            Some(Halt::TooLow)
        } else {
            None
        }
    }

    /// Advance one step length downrange through `air` and `wind` [fps].
    pub fn advance(&self, state: &FlightState, air: Air, wind: &Vector3<f64>) -> Step {
        let dt = self.step / state.velocity.x;
        let relative = state.velocity - wind;
        let airspeed = relative.norm();
        let drag = self.ballistic_factor
            * air.density_ratio
            * airspeed
            * self.coefficient.drag(airspeed / air.speed_of_sound_fps);

        let velocity = state.velocity - (relative * drag - self.gravity) * dt;
        let delta = Vector3::new(self.step, velocity.y * dt, velocity.z * dt);
        let speed = velocity.norm();

        let next = FlightState {
            range: state.range + delta,
            velocity,
            time: state.time + delta.norm() / speed,
            speed,
        };
        Step { state: next, halt: self.check(&next) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ballistics_models::DragFamily;

    #[test]
    fn step_is_half_the_granularity_when_small() {
        assert_abs_diff_eq!(calculation_step(1.5, 1.0), 0.75);
        assert_abs_diff_eq!(calculation_step(2.0, 1.0), 1.0);
    }

    #[test]
    fn coarse_steps_are_scaled_below_the_cap() {
        // 100 yd and 10 yd both end up at 0.15 ft
        assert_abs_diff_eq!(calculation_step(300.0, 1.0), 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(calculation_step(30.0, 1.0), 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(calculation_step(2.5, 1.0), 0.125, epsilon = 1e-12);
        for granularity in [3.0, 17.0, 328.084, 1500.0, 9999.0] {
            assert!(calculation_step(granularity, 1.0) <= 1.0);
        }
    }

    fn integrator<'a>(coefficient: &'a BallisticCoefficient, config: &SolverConfig) -> Integrator<'a> {
        Integrator::new(coefficient, coefficient.value(), 0.15, config)
    }

    #[test]
    fn launch_places_bore_below_sight_line() {
        let bc = BallisticCoefficient::new(0.3, DragFamily::G1).unwrap();
        let config = SolverConfig::default();
        let s = integrator(&bc, &config).launch(2800.0, 0.2, 0.01);
        assert_abs_diff_eq!(s.range.y, -0.2);
        assert_abs_diff_eq!(s.velocity.norm(), 2800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.velocity.z, 0.0);
    }

    #[test]
    fn each_step_covers_a_fixed_horizontal_distance() {
        let bc = BallisticCoefficient::new(0.3, DragFamily::G1).unwrap();
        let config = SolverConfig::default();
        let it = integrator(&bc, &config);
        let air = Air { density_ratio: 1.0, speed_of_sound_fps: 1116.45 };
        let mut s = it.launch(2800.0, 0.2, 0.0);
        for n in 1..=100 {
            let step = it.advance(&s, air, &Vector3::zeros());
            assert!(step.halt.is_none());
            assert!(step.state.speed < s.speed);
            assert!(step.state.time > s.time);
            assert!(step.state.range.y < s.range.y);
            s = step.state;
            assert_abs_diff_eq!(s.range.x, f64::from(n) * it.step_length(), epsilon = 1e-9);
        }
    }

    #[test]
    fn crosswind_pushes_downwind() {
        let bc = BallisticCoefficient::new(0.3, DragFamily::G7).unwrap();
        let config = SolverConfig::default();
        let it = integrator(&bc, &config);
        let air = Air { density_ratio: 1.0, speed_of_sound_fps: 1116.45 };
        // wind vector along +z: air moving to the right
        let wind = Vector3::new(0.0, 0.0, 10.0);
        let mut s = it.launch(2800.0, 0.0, 0.0);
        for _ in 0..1000 {
            s = it.advance(&s, air, &wind).state;
        }
        assert!(s.range.z > 0.0);
    }

    #[test]
    fn slow_or_fallen_projectiles_halt() {
        let bc = BallisticCoefficient::new(0.3, DragFamily::G1).unwrap();
        let config = SolverConfig::default();
        let it = integrator(&bc, &config);
        let slow = it.launch(40.0, 0.0, 0.0);
        assert_eq!(it.check(&slow), Some(Halt::TooSlow));

        let mut fallen = it.launch(2000.0, 0.0, 0.0);
        fallen.range.y = -15_001.0;
        assert_eq!(it.check(&fallen), Some(Halt::TooLow));
    }
}
