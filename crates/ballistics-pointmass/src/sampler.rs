use tracing::debug;

use ballistics_core::angle::radian;
use ballistics_core::energy::foot_pound;
use ballistics_core::length::foot;
use ballistics_core::mass::{grain, pound};
use ballistics_core::time::second;
use ballistics_core::velocity::foot_per_second;
use ballistics_core::{Angle, Atmosphere, Energy, Length, Mass, Time, Velocity, WindSegment, WindSock};

use crate::integrator::{calculation_step, Air, FlightState, Integrator};
use crate::stability::{spin_drift, stability_coefficient};
use crate::{Ammunition, ShotParameters, SolverConfig, TrajectorySample, TwistDirection, Weapon};

/// Angle subtended by `offset` at `distance`; zero at the muzzle.
fn correction(distance: f64, offset: f64) -> f64 {
    if distance > 0.0 {
        (offset / distance).atan()
    } else {
        0.0
    }
}

/// Kinetic energy [ft·lb] from weight [gr] and velocity [fps].
fn energy(weight_gr: f64, velocity: f64) -> f64 {
    weight_gr * velocity * velocity / 450_400.0
}

/// Optimal game weight [lb] from weight [gr] and velocity [fps].
fn optimal_game_weight(weight_gr: f64, velocity: f64) -> f64 {
    weight_gr * weight_gr * velocity.powi(3) * 1.5e-12
}

pub(crate) fn run(
    config: &SolverConfig,
    ammunition: &Ammunition,
    weapon: &Weapon,
    atmosphere: &Atmosphere,
    shot: &ShotParameters,
    winds: &[WindSegment],
) -> Vec<TrajectorySample> {
    let projectile = &ammunition.projectile;
    let range_to = shot.maximum_distance().get::<foot>();
    let step = shot.step().get::<foot>();
    let calc_step = calculation_step(step, config.maximum_step_ft);
    let weight = projectile.weight().get::<grain>();

    let drift: Option<(f64, TwistDirection)> = weapon.twist.as_ref().and_then(|twist| {
        stability_coefficient(projectile, twist, ammunition.muzzle_velocity, atmosphere)
            .map(|sg| (sg, twist.direction))
    });

    // saturates for extreme range/step ratios
    let count = ((range_to / step).floor() as usize).saturating_add(1);
    let mut samples = Vec::new();

    let sight_angle = shot.sight_angle().get::<radian>();
    let elevation = sight_angle + shot.shot_angle().get::<radian>();
    let altitude = atmosphere.altitude().get::<foot>();
    let mut wind_sock = WindSock::new(winds, sight_angle, shot.cant_angle().get::<radian>());

    let integrator = Integrator::new(projectile.coefficient(), projectile.ballistic_coefficient(), calc_step, config);
    let mut state = integrator.launch(
        ammunition.muzzle_velocity.get::<foot_per_second>(),
        weapon.sight_height.get::<foot>(),
        elevation,
    );
    let mut halt = integrator.check(&state);
    let mut next_range = 0.0;

    while halt.is_none() && state.range.x <= range_to + calc_step {
        let (density_ratio, speed_of_sound_fps) = atmosphere.density_ratio_and_mach_at(altitude + state.range.y);
        let wind = wind_sock.wind_at(state.range.x);

        if state.range.x >= next_range {
            samples.push(sample(&state, speed_of_sound_fps, weight, drift));
            next_range += step;
            if samples.len() == count {
                break;
            }
        }

        let next = integrator.advance(&state, Air { density_ratio, speed_of_sound_fps }, &wind);
        state = next.state;
        halt = next.halt;
    }

    if let Some(halt) = halt {
        debug!(
            ?halt,
            range_ft = state.range.x,
            samples = samples.len(),
            requested = count,
            "trajectory ended early"
        );
    }
    samples
}

fn sample(state: &FlightState, speed_of_sound_fps: f64, weight_gr: f64, drift: Option<(f64, TwistDirection)>) -> TrajectorySample {
    let mut windage = state.range.z;
    if let Some((stability, direction)) = drift {
        windage += spin_drift(stability, state.time, direction);
    }
    let distance = state.range.x;
    let velocity = state.speed;

    TrajectorySample {
        time: Time::new::<second>(state.time),
        travel_distance: Length::new::<foot>(distance),
        velocity: Velocity::new::<foot_per_second>(velocity),
        mach: velocity / speed_of_sound_fps,
        drop: Length::new::<foot>(state.range.y),
        drop_adjustment: Angle::new::<radian>(correction(distance, state.range.y)),
        windage: Length::new::<foot>(windage),
        windage_adjustment: Angle::new::<radian>(correction(distance, windage)),
        energy: Energy::new::<foot_pound>(energy(weight_gr, velocity)),
        optimal_game_weight: Mass::new::<pound>(optimal_game_weight(weight_gr, velocity)),
    }
}
