use nalgebra::Vector3;
use tracing::{debug, warn};

use ballistics_core::angle::radian;
use ballistics_core::length::foot;
use ballistics_core::velocity::foot_per_second;
use ballistics_core::{Angle, Atmosphere};

use crate::integrator::{calculation_step, Air, Integrator};
use crate::{Ammunition, SolverConfig, Weapon};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroStatus {
    /// |drop| at the zero distance fell below the configured accuracy.
    Converged,
    /// Iteration budget spent; the angle is the best estimate so far.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZeroSolution {
    /// Barrel elevation relative to the line of sight.
    pub angle: Angle,
    pub iterations: usize,
    /// |drop| [ft] at the zero distance on the last pass that reached it.
    pub residual_ft: f64,
    pub status: ZeroStatus,
}

/// Fixed-point search for the barrel elevation that puts the projectile on
/// the line of sight at the weapon's zero distance.
///
/// Each pass flies from the muzzle with the current elevation in still air at
/// the site's density and speed of sound, stops at the first step within half
/// a step of the zero distance and corrects the elevation by `drop / range`.
pub(crate) fn solve(config: &SolverConfig, ammunition: &Ammunition, weapon: &Weapon, atmosphere: &Atmosphere) -> ZeroSolution {
    let projectile = &ammunition.projectile;
    let integrator = Integrator::new(
        projectile.coefficient(),
        projectile.ballistic_coefficient(),
        calculation_step(config.zero_step_granularity_ft, config.maximum_step_ft),
        config,
    );
    let step = integrator.step_length();

    let air = Air {
        density_ratio: atmosphere.density_ratio(),
        speed_of_sound_fps: atmosphere.speed_of_sound_fps(),
    };
    let calm = Vector3::zeros();
    let muzzle_velocity = ammunition.muzzle_velocity.get::<foot_per_second>();
    let sight_height = weapon.sight_height.get::<foot>();
    let zero_distance = weapon.zero.distance.get::<foot>();
    let maximum_range = zero_distance + step;

    let mut elevation = 0.0;
    let mut residual = config.zero_accuracy_ft * 2.0;
    let mut iterations = 0;

    while residual > config.zero_accuracy_ft && iterations < config.max_zero_iterations {
        let mut state = integrator.launch(muzzle_velocity, sight_height, elevation);
        let mut halt = integrator.check(&state);

        while halt.is_none() && state.range.x <= maximum_range {
            let next = integrator.advance(&state, air, &calm);
            state = next.state;
            halt = next.halt;

            if (state.range.x - zero_distance).abs() < 0.5 * step {
                residual = state.range.y.abs();
                elevation -= state.range.y / state.range.x;
                break;
            }
        }

        iterations += 1;
        debug!(iterations, elevation, residual_ft = residual, ?halt, "zero pass");
    }

    let status = if residual > config.zero_accuracy_ft {
        warn!(
            iterations,
            residual_ft = residual,
            "zero solve did not converge, returning approximate elevation"
        );
        ZeroStatus::Exhausted
    } else {
        ZeroStatus::Converged
    };

    ZeroSolution {
        angle: Angle::new::<radian>(elevation),
        iterations,
        residual_ft: residual,
        status,
    }
}
