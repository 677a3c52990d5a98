//! ballistics-pointmass
//!
//! Point-mass trajectory solver stepping a fixed horizontal distance per step.
//! - Drag comes from a tabulated drag curve (`ballistics-models`) at the local Mach number.
//! - Scales by air-density ratio (re-evaluated at the projectile's altitude) and BC.
//! - 3D integration (x downrange, y up, z right) with segmented wind and spin drift.
//! - Zero-solve by fixed-point correction of the barrel elevation.
//! - Produces range-spaced samples: TOF, velocity, Mach, drop, windage,
//!   their correction angles, energy and optimal game weight.
//!
//! Maths (imperial working units):
//!   drag = (1/BC) * (ρ/ρ₀) * |v_rel| * cd(M) * πρ      (per unit of v_rel)
//!   v'   = v - (v_rel * drag - g) * dt,   dt = step / v.x
//!
//! Conventions:
//! - Wind angle: 0° = headwind, 90° = from the LEFT, -90°/270° = from the right.
//! - Positive drop is above the line of sight; positive windage is to the right.
//! - Spin drift goes right for a right-hand twist.
//!
//! Every public operation is a pure function of its inputs and safe to call
//! from several threads at once.

use ballistics_core::angle::radian;
use ballistics_core::length::{foot, inch};
use ballistics_core::mass::grain;
use ballistics_core::{angle_from, Angle, AngularUnit, Energy, Length, Mass, Time, Velocity};
use ballistics_models::CoefficientKind;
use thiserror::Error;

mod integrator;
mod sampler;
mod stability;
mod zero;

pub use ballistics_core::{Atmosphere, WindSegment};
pub use ballistics_models::{BallisticCoefficient, DragFamily, DragModel, DragPoint};
pub use stability::{spin_drift, stability_coefficient};
pub use zero::{ZeroSolution, ZeroStatus};

/* --------------------------------- inputs --------------------------------- */

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("a form-factor coefficient needs the projectile diameter")]
    FormFactorWithoutDimensions,
    #[error("projectile weight must be positive")]
    NonPositiveWeight,
    #[error("projectile diameter and length must be positive")]
    NonPositiveDimensions,
    #[error("sampling step must be positive and finite")]
    NonPositiveStep,
    #[error("maximum distance must not be negative")]
    NegativeDistance,
    #[error("maximum distance must be finite")]
    NonFiniteDistance,
}

/// Physical projectile size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub diameter: Length,
    pub length: Length,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    coefficient: BallisticCoefficient,
    weight: Mass,
    dimensions: Option<Dimensions>,
}

impl Projectile {
    pub fn new(coefficient: BallisticCoefficient, weight: Mass) -> Result<Self, InputError> {
        if coefficient.kind() == CoefficientKind::FormFactor {
            return Err(InputError::FormFactorWithoutDimensions);
        }
        Self::build(coefficient, weight, None)
    }

    pub fn with_dimensions(
        coefficient: BallisticCoefficient,
        weight: Mass,
        diameter: Length,
        length: Length,
    ) -> Result<Self, InputError> {
        if !(diameter.get::<inch>() > 0.0 && length.get::<inch>() > 0.0) {
            return Err(InputError::NonPositiveDimensions);
        }
        Self::build(coefficient, weight, Some(Dimensions { diameter, length }))
    }

    fn build(coefficient: BallisticCoefficient, weight: Mass, dimensions: Option<Dimensions>) -> Result<Self, InputError> {
        if !(weight.get::<grain>() > 0.0) {
            return Err(InputError::NonPositiveWeight);
        }
        Ok(Self { coefficient, weight, dimensions })
    }

    pub fn coefficient(&self) -> &BallisticCoefficient { &self.coefficient }
    pub fn weight(&self) -> Mass { self.weight }
    pub fn dimensions(&self) -> Option<Dimensions> { self.dimensions }

    pub fn has_dimensions(&self) -> bool {
        self.dimensions.is_some()
    }

    /// Ballistic coefficient against the coefficient's drag model.
    ///
    /// A form factor is converted as `weight[gr] / 7000 / diameter[in]² / ff`.
    pub fn ballistic_coefficient(&self) -> f64 {
        match (self.coefficient.kind(), self.dimensions) {
            (CoefficientKind::FormFactor, Some(dims)) => {
                let diameter = dims.diameter.get::<inch>();
                self.weight.get::<grain>() / 7000.0 / (diameter * diameter) / self.coefficient.value()
            }
            _ => self.coefficient.value(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ammunition {
    pub projectile: Projectile,
    pub muzzle_velocity: Velocity,
}

impl Ammunition {
    pub fn new(projectile: Projectile, muzzle_velocity: Velocity) -> Self {
        Self { projectile, muzzle_velocity }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwistDirection {
    Left,
    Right,
}

impl TwistDirection {
    /// +1 for right-hand twist (drift to the right), -1 for left.
    pub fn sign(self) -> f64 {
        match self {
            TwistDirection::Left => -1.0,
            TwistDirection::Right => 1.0,
        }
    }
}

/// Rifling twist: one turn per `rate` of barrel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Twist {
    pub direction: TwistDirection,
    pub rate: Length,
}

/// Zeroing conditions.
///
/// The ammunition and atmosphere overrides are carried for callers that keep
/// zero conditions apart from shot conditions; the zero solver itself uses the
/// ammunition and atmosphere it is handed.
#[derive(Clone, Debug)]
pub struct ZeroInfo {
    pub distance: Length,
    pub ammunition: Option<Ammunition>,
    pub atmosphere: Option<Atmosphere>,
}

impl ZeroInfo {
    pub fn new(distance: Length) -> Self {
        Self { distance, ammunition: None, atmosphere: None }
    }

    pub fn with_ammunition(mut self, ammunition: Ammunition) -> Self {
        self.ammunition = Some(ammunition);
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Weapon {
    pub sight_height: Length,
    pub zero: ZeroInfo,
    pub twist: Option<Twist>,
    /// Angular value of one scope click.
    pub click_value: Angle,
}

impl Weapon {
    /// Weapon without rifling twist and a 0.1 MIL click.
    pub fn new(sight_height: Length, zero: ZeroInfo) -> Self {
        Self {
            sight_height,
            zero,
            twist: None,
            click_value: angle_from(0.1, AngularUnit::Mil),
        }
    }

    pub fn with_twist(mut self, twist: Twist) -> Self {
        self.twist = Some(twist);
        self
    }

    pub fn with_click_value(mut self, click_value: Angle) -> Self {
        self.click_value = click_value;
        self
    }

    /// Number of scope clicks that cover `correction`.
    pub fn clicks(&self, correction: Angle) -> f64 {
        correction.get::<radian>() / self.click_value.get::<radian>()
    }
}

/// What to compute for one shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotParameters {
    sight_angle: Angle,
    shot_angle: Angle,
    cant_angle: Angle,
    maximum_distance: Length,
    step: Length,
}

impl ShotParameters {
    /// Level shot, no cant.
    pub fn new(sight_angle: Angle, maximum_distance: Length, step: Length) -> Result<Self, InputError> {
        let level = Angle::new::<radian>(0.0);
        Self::with_angles(sight_angle, level, level, maximum_distance, step)
    }

    pub fn with_angles(
        sight_angle: Angle,
        shot_angle: Angle,
        cant_angle: Angle,
        maximum_distance: Length,
        step: Length,
    ) -> Result<Self, InputError> {
        let step_ft = step.get::<foot>();
        if !step_ft.is_finite() || step_ft <= 0.0 {
            return Err(InputError::NonPositiveStep);
        }
        let distance_ft = maximum_distance.get::<foot>();
        if !distance_ft.is_finite() {
            return Err(InputError::NonFiniteDistance);
        }
        if distance_ft < 0.0 {
            return Err(InputError::NegativeDistance);
        }
        Ok(Self { sight_angle, shot_angle, cant_angle, maximum_distance, step })
    }

    pub fn sight_angle(&self) -> Angle { self.sight_angle }
    /// Incline of the line of sight.
    pub fn shot_angle(&self) -> Angle { self.shot_angle }
    pub fn cant_angle(&self) -> Angle { self.cant_angle }
    pub fn maximum_distance(&self) -> Length { self.maximum_distance }
    pub fn step(&self) -> Length { self.step }
}

/* ------------------------------ configuration ----------------------------- */

/// Solver tunables, in the solver's imperial working units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SolverConfig {
    /// The zero solve stops once |drop| at the zero distance is below this [ft].
    pub zero_accuracy_ft: f64,
    pub max_zero_iterations: usize,
    /// Integration stops below this speed [fps].
    pub minimum_velocity_fps: f64,
    /// Integration stops below this drop [ft].
    pub maximum_drop_ft: f64,
    /// Cap for the integration step length [ft].
    pub maximum_step_ft: f64,
    /// Gravitational acceleration along y [ft/s²].
    pub gravity_fps2: f64,
    /// Distance granularity the zero search derives its step from [ft].
    pub zero_step_granularity_ft: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_accuracy_ft: 5e-6,
            max_zero_iterations: 10,
            minimum_velocity_fps: 50.0,
            maximum_drop_ft: -15_000.0,
            maximum_step_ft: 1.0,
            gravity_fps2: -32.174_05,
            zero_step_granularity_ft: 30.0,
        }
    }
}

/* --------------------------------- output --------------------------------- */

/// One range-spaced point of a computed trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectorySample {
    /// Time since the shot.
    pub time: Time,
    /// Distance from the muzzle along the line of sight.
    pub travel_distance: Length,
    pub velocity: Velocity,
    /// Velocity over the local speed of sound.
    pub mach: f64,
    /// Offset from the line of sight; negative is below it.
    pub drop: Length,
    /// Angle from the line of sight to the projectile, vertical plane.
    pub drop_adjustment: Angle,
    /// Lateral offset from wind and spin drift; positive is right.
    pub windage: Length,
    /// Angle from the line of sight to the projectile, horizontal plane.
    pub windage_adjustment: Angle,
    pub energy: Energy,
    /// Game weight a kill shot is probable on with this energy.
    pub optimal_game_weight: Mass,
}

impl TrajectorySample {
    pub fn drop_adjustment_in(&self, unit: AngularUnit) -> f64 {
        unit.from_radians(self.drop_adjustment.get::<radian>())
    }

    pub fn windage_adjustment_in(&self, unit: AngularUnit) -> f64 {
        unit.from_radians(self.windage_adjustment.get::<radian>())
    }
}

/* ---------------------------------- API ---------------------------------- */

/// Zero and trajectory solver with a fixed configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct BallisticCalculator {
    config: SolverConfig,
}

impl BallisticCalculator {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Barrel elevation that zeroes `weapon` at its zero distance, with the
    /// iteration count and whether the solve converged.
    pub fn solve_zero(&self, ammunition: &Ammunition, weapon: &Weapon, atmosphere: &Atmosphere) -> ZeroSolution {
        zero::solve(&self.config, ammunition, weapon, atmosphere)
    }

    /// Sight angle to feed into [`ShotParameters`]. Approximate if the solve
    /// exhausted its iterations.
    pub fn zero_angle(&self, ammunition: &Ammunition, weapon: &Weapon, atmosphere: &Atmosphere) -> Angle {
        self.solve_zero(ammunition, weapon, atmosphere).angle
    }

    /// Samples every `shot.step()` from the muzzle to `shot.maximum_distance()`.
    ///
    /// Returns fewer than `floor(max / step) + 1` samples when the projectile
    /// slows below the minimum velocity or falls past the maximum drop first.
    pub fn trajectory(
        &self,
        ammunition: &Ammunition,
        weapon: &Weapon,
        atmosphere: &Atmosphere,
        shot: &ShotParameters,
        winds: &[WindSegment],
    ) -> Vec<TrajectorySample> {
        sampler::run(&self.config, ammunition, weapon, atmosphere, shot, winds)
    }
}

/// [`BallisticCalculator::zero_angle`] with the default configuration.
pub fn compute_zero_angle(ammunition: &Ammunition, weapon: &Weapon, atmosphere: &Atmosphere) -> Angle {
    BallisticCalculator::default().zero_angle(ammunition, weapon, atmosphere)
}

/// [`BallisticCalculator::trajectory`] with the default configuration.
pub fn compute_trajectory(
    ammunition: &Ammunition,
    weapon: &Weapon,
    atmosphere: &Atmosphere,
    shot: &ShotParameters,
    winds: &[WindSegment],
) -> Vec<TrajectorySample> {
    BallisticCalculator::default().trajectory(ammunition, weapon, atmosphere, shot, winds)
}

/* ----------------------------------- tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ballistics_core::length::yard;

    fn g7(value: f64) -> BallisticCoefficient {
        BallisticCoefficient::new(value, DragFamily::G7).unwrap()
    }

    #[test]
    fn plain_bc_is_returned_as_is() {
        let projectile = Projectile::new(g7(0.223), Mass::new::<grain>(69.0)).unwrap();
        assert!(!projectile.has_dimensions());
        assert_abs_diff_eq!(projectile.ballistic_coefficient(), 0.223, epsilon = 5e-4);
    }

    #[test]
    fn form_factor_converts_to_bc() {
        let ff = BallisticCoefficient::form_factor(1.184, DragFamily::G1).unwrap();
        let projectile = Projectile::with_dimensions(
            ff,
            Mass::new::<grain>(40.0),
            Length::new::<inch>(0.204),
            Length::new::<inch>(1.0),
        )
        .unwrap();
        assert!(projectile.has_dimensions());
        assert_abs_diff_eq!(projectile.ballistic_coefficient(), 0.116, epsilon = 5e-4);
    }

    #[test]
    fn form_factor_without_dimensions_is_rejected() {
        let ff = BallisticCoefficient::form_factor(1.0, DragFamily::G1).unwrap();
        assert_eq!(
            Projectile::new(ff, Mass::new::<grain>(40.0)).unwrap_err(),
            InputError::FormFactorWithoutDimensions
        );
    }

    #[test]
    fn projectile_validation() {
        assert_eq!(
            Projectile::new(g7(0.3), Mass::new::<grain>(0.0)).unwrap_err(),
            InputError::NonPositiveWeight
        );
        assert_eq!(
            Projectile::with_dimensions(g7(0.3), Mass::new::<grain>(150.0), Length::new::<inch>(0.0), Length::new::<inch>(1.2))
                .unwrap_err(),
            InputError::NonPositiveDimensions
        );
    }

    #[test]
    fn shot_parameters_validation() {
        let zero = Angle::new::<radian>(0.0);
        let max = Length::new::<yard>(1000.0);
        assert_eq!(
            ShotParameters::new(zero, max, Length::new::<yard>(0.0)).unwrap_err(),
            InputError::NonPositiveStep
        );
        assert_eq!(
            ShotParameters::new(zero, Length::new::<yard>(-1.0), Length::new::<yard>(100.0)).unwrap_err(),
            InputError::NegativeDistance
        );
        assert_eq!(
            ShotParameters::new(zero, Length::new::<yard>(f64::INFINITY), Length::new::<yard>(100.0)).unwrap_err(),
            InputError::NonFiniteDistance
        );
        assert_eq!(
            ShotParameters::new(zero, Length::new::<yard>(f64::NAN), Length::new::<yard>(100.0)).unwrap_err(),
            InputError::NonFiniteDistance
        );
        let shot = ShotParameters::new(zero, max, Length::new::<yard>(100.0)).unwrap();
        assert_eq!(shot.cant_angle(), zero);
        assert_eq!(shot.shot_angle(), zero);
    }

    #[test]
    fn weapon_defaults_and_clicks() {
        let weapon = Weapon::new(Length::new::<inch>(2.0), ZeroInfo::new(Length::new::<yard>(100.0)));
        assert!(weapon.twist.is_none());
        assert_abs_diff_eq!(weapon.clicks(angle_from(1.0, AngularUnit::Mil)), 10.0, epsilon = 1e-9);

        let weapon = weapon.with_click_value(angle_from(0.25, AngularUnit::Moa));
        assert_abs_diff_eq!(weapon.clicks(angle_from(4.221, AngularUnit::Moa)), 16.884, epsilon = 1e-9);
    }

    #[test]
    fn zero_info_carries_overrides() {
        let zero = ZeroInfo::new(Length::new::<yard>(100.0)).with_atmosphere(Atmosphere::standard());
        assert!(zero.atmosphere.is_some());
        assert!(zero.ammunition.is_none());
    }

    #[test]
    fn default_config_matches_reference_constants() {
        let config = SolverConfig::default();
        assert_eq!(config.max_zero_iterations, 10);
        assert_abs_diff_eq!(config.zero_accuracy_ft, 5e-6);
        assert_abs_diff_eq!(config.minimum_velocity_fps, 50.0);
        assert_abs_diff_eq!(config.maximum_drop_ft, -15_000.0);
        assert_eq!(BallisticCalculator::default().config(), &config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_in_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{ "max_zero_iterations": 25 }"#).unwrap();
        assert_eq!(config.max_zero_iterations, 25);
        assert_abs_diff_eq!(config.minimum_velocity_fps, 50.0);
    }
}
