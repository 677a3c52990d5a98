//! Core ballistics utilities
//!
//! Includes:
//! - Units & conversions (uom quantities plus sight-adjustment angular units)
//! - Standard atmosphere (ICAO approximation, imperial working units)
//! - Wind segments resolved into the shot frame
//!
//! Every quantity that crosses a crate boundary is a `uom` f64 quantity. The
//! solver works internally in feet, feet per second, grains, inches of mercury
//! and degrees Fahrenheit, and only ever reaches those through `get::<unit>()`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use thiserror::Error;

pub use uom::si::f64::{
    Angle, Energy, Length, Mass, Pressure, ThermodynamicTemperature, Time, Velocity,
};
pub use uom::si::{angle, energy, length, mass, pressure, thermodynamic_temperature, time, velocity};

use uom::si::angle::radian;
use uom::si::length::{foot, kilometer};
use uom::si::pressure::inch_of_mercury;
use uom::si::thermodynamic_temperature::degree_fahrenheit;
use uom::si::velocity::foot_per_second;

/// -------------------------
/// Units & Conversions
/// -------------------------

/// Angular units used for sight adjustments.
///
/// `uom` covers radians and degrees; the scope units are defined here. The
/// two "per 100" units are geometric (an offset at a reference distance) and
/// therefore not linear in the angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AngularUnit {
    Radian,
    Degree,
    /// Minute of angle, 1/60 of a degree.
    Moa,
    /// NATO mil, 1/6400 of a turn.
    Mil,
    MilliRadian,
    /// Centimeters of offset at 100 meters.
    CmPer100m,
    /// Inches of offset at 100 yards.
    InchPer100Yd,
}

impl AngularUnit {
    pub const ALL: [AngularUnit; 7] = [
        AngularUnit::Radian,
        AngularUnit::Degree,
        AngularUnit::Moa,
        AngularUnit::Mil,
        AngularUnit::MilliRadian,
        AngularUnit::CmPer100m,
        AngularUnit::InchPer100Yd,
    ];

    /// Value expressed in this unit -> radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngularUnit::Radian => value,
            AngularUnit::Degree => value.to_radians(),
            AngularUnit::Moa => value * PI / 10_800.0,
            AngularUnit::Mil => value * PI / 3_200.0,
            AngularUnit::MilliRadian => value / 1_000.0,
            AngularUnit::CmPer100m => (value / 10_000.0).atan(),
            AngularUnit::InchPer100Yd => (value / 3_600.0).atan(),
        }
    }

    /// Radians -> value expressed in this unit.
    pub fn from_radians(self, rad: f64) -> f64 {
        match self {
            AngularUnit::Radian => rad,
            AngularUnit::Degree => rad.to_degrees(),
            AngularUnit::Moa => rad * 10_800.0 / PI,
            AngularUnit::Mil => rad * 3_200.0 / PI,
            AngularUnit::MilliRadian => rad * 1_000.0,
            AngularUnit::CmPer100m => rad.tan() * 10_000.0,
            AngularUnit::InchPer100Yd => rad.tan() * 3_600.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AngularUnit::Radian => "rad",
            AngularUnit::Degree => "deg",
            AngularUnit::Moa => "moa",
            AngularUnit::Mil => "mil",
            AngularUnit::MilliRadian => "mrad",
            AngularUnit::CmPer100m => "cm/100m",
            AngularUnit::InchPer100Yd => "in/100yd",
        }
    }
}

impl fmt::Display for AngularUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("unknown angular unit `{0}`")]
    UnknownAngularUnit(String),
}

impl FromStr for AngularUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(AngularUnit::Radian),
            "deg" | "degree" | "degrees" => Ok(AngularUnit::Degree),
            "moa" => Ok(AngularUnit::Moa),
            "mil" | "mils" => Ok(AngularUnit::Mil),
            "mrad" | "milliradian" | "milliradians" => Ok(AngularUnit::MilliRadian),
            "cm/100m" => Ok(AngularUnit::CmPer100m),
            "in/100yd" => Ok(AngularUnit::InchPer100Yd),
            _ => Err(UnitError::UnknownAngularUnit(s.to_owned())),
        }
    }
}

/// Build an `Angle` from a value in any angular unit.
pub fn angle_from(value: f64, unit: AngularUnit) -> Angle {
    Angle::new::<radian>(unit.to_radians(value))
}

/// Express an `Angle` in any angular unit.
pub fn angle_in(angle: Angle, unit: AngularUnit) -> f64 {
    unit.from_radians(angle.get::<radian>())
}

/// -------------------------
/// Atmosphere
/// -------------------------

const ICAO_STANDARD_TEMPERATURE_R: f64 = 518.67;
const ICAO_FREEZING_POINT_TEMPERATURE_R: f64 = 459.67;
/// °F per foot.
const TEMPERATURE_GRADIENT: f64 = -3.566_16e-3;
const PRESSURE_EXPONENT: f64 = -5.255_876;
const SPEED_OF_SOUND_COEFFICIENT: f64 = 49.0223;
/// Vapor-pressure polynomial coefficients.
const A0: f64 = 1.248_71;
const A1: f64 = 0.098_843_8;
const A2: f64 = 0.001_529_07;
const A3: f64 = -3.070_31e-6;
const A4: f64 = 4.213_29e-7;
const A5: f64 = 3.342e-4;

pub const STANDARD_TEMPERATURE_F: f64 = 59.0;
pub const STANDARD_PRESSURE_INHG: f64 = 29.92;
/// Sea level, 59 °F, 29.92 inHg, dry air [lb/ft³].
pub const STANDARD_DENSITY: f64 = 0.076_474;
pub const STANDARD_HUMIDITY: f64 = 0.78;

/// Below this separation from the reference altitude the cached values are reused.
const ALTITUDE_REUSE_WINDOW_FT: f64 = 30.0;

/// Air density [lb/ft³] and speed of sound [fps] from temperature [°F],
/// pressure [inHg] and relative humidity (0..1).
///
/// Humidity outside 0..1 is accepted as-is.
pub fn air_density_and_speed_of_sound(temperature_f: f64, pressure_inhg: f64, humidity: f64) -> (f64, f64) {
    let t = temperature_f;
    let hc = if t > 0.0 {
        let et0 = A0 + t * (A1 + t * (A2 + t * (A3 + t * A4)));
        let et = A5 * humidity * et0;
        (pressure_inhg - 0.3783 * et) / STANDARD_PRESSURE_INHG
    } else {
        1.0
    };

    let density = STANDARD_DENSITY * (ICAO_STANDARD_TEMPERATURE_R / (t + ICAO_FREEZING_POINT_TEMPERATURE_R)) * hc;
    let speed_of_sound = (t + ICAO_FREEZING_POINT_TEMPERATURE_R).sqrt() * SPEED_OF_SOUND_COEFFICIENT;
    (density, speed_of_sound)
}

/// Shooter-site atmosphere with density and local speed of sound precomputed.
#[derive(Clone, Copy, Debug)]
pub struct Atmosphere {
    altitude: Length,
    pressure: Pressure,
    temperature: ThermodynamicTemperature,
    humidity: f64,
    // cached working-unit values
    altitude_ft: f64,
    pressure_inhg: f64,
    temperature_f: f64,
    density: f64,
    speed_of_sound_fps: f64,
}

impl Atmosphere {
    pub fn new(altitude: Length, pressure: Pressure, temperature: ThermodynamicTemperature, humidity: f64) -> Self {
        let altitude_ft = altitude.get::<foot>();
        let pressure_inhg = pressure.get::<inch_of_mercury>();
        let temperature_f = temperature.get::<degree_fahrenheit>();
        let (density, speed_of_sound_fps) = air_density_and_speed_of_sound(temperature_f, pressure_inhg, humidity);

        Self {
            altitude,
            pressure,
            temperature,
            humidity,
            altitude_ft,
            pressure_inhg,
            temperature_f,
            density,
            speed_of_sound_fps,
        }
    }

    /// Sea level, 29.92 inHg, 59 °F, 78 % humidity.
    pub fn standard() -> Self {
        Self::new(
            Length::new::<foot>(0.0),
            Pressure::new::<inch_of_mercury>(STANDARD_PRESSURE_INHG),
            ThermodynamicTemperature::new::<degree_fahrenheit>(STANDARD_TEMPERATURE_F),
            STANDARD_HUMIDITY,
        )
    }

    pub fn altitude(&self) -> Length { self.altitude }
    pub fn pressure(&self) -> Pressure { self.pressure }
    pub fn temperature(&self) -> ThermodynamicTemperature { self.temperature }
    pub fn humidity(&self) -> f64 { self.humidity }

    /// Air density [lb/ft³].
    pub fn density(&self) -> f64 { self.density }

    /// Density relative to the standard sea-level density.
    pub fn density_ratio(&self) -> f64 {
        self.density / STANDARD_DENSITY
    }

    pub fn speed_of_sound(&self) -> Velocity {
        Velocity::new::<foot_per_second>(self.speed_of_sound_fps)
    }

    pub fn speed_of_sound_fps(&self) -> f64 { self.speed_of_sound_fps }

    /// Density ratio and speed of sound [fps] at `altitude_ft`.
    ///
    /// Within 30 ft of the reference altitude the cached values are returned.
    /// Otherwise temperature is shifted by the standard lapse rate between the
    /// two altitudes, pressure is rescaled with the ICAO exponent and the
    /// density formula is re-run.
    pub fn density_ratio_and_mach_at(&self, altitude_ft: f64) -> (f64, f64) {
        if (self.altitude_ft - altitude_ft).abs() < ALTITUDE_REUSE_WINDOW_FT {
            return (self.density_ratio(), self.speed_of_sound_fps);
        }

        let t0 = self.temperature_f;
        let ta = ICAO_STANDARD_TEMPERATURE_R + self.altitude_ft * TEMPERATURE_GRADIENT - ICAO_FREEZING_POINT_TEMPERATURE_R;
        let tb = ICAO_STANDARD_TEMPERATURE_R + altitude_ft * TEMPERATURE_GRADIENT - ICAO_FREEZING_POINT_TEMPERATURE_R;
        let t = t0 + ta - tb;
        let p = self.pressure_inhg * (t0 / t).powf(PRESSURE_EXPONENT);

        let (density, mach) = air_density_and_speed_of_sound(t, p, self.humidity);
        (density / STANDARD_DENSITY, mach)
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

/// -------------------------
/// Wind
/// -------------------------

/// Wind blowing up to `until_distance` from the shooter.
///
/// Direction: 0° = headwind (into the shooter's face), 90° = from the left,
/// -90°/270° = from the right, 180° = tailwind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindSegment {
    pub velocity: Velocity,
    pub direction: Angle,
    pub until_distance: Length,
}

impl WindSegment {
    /// A segment covering the whole range (9999 km).
    pub fn new(velocity: Velocity, direction: Angle) -> Self {
        Self {
            velocity,
            direction,
            until_distance: Length::new::<kilometer>(9999.0),
        }
    }

    pub fn until(mut self, distance: Length) -> Self {
        self.until_distance = distance;
        self
    }

    /// Component along the line of fire, positive towards the shooter [fps].
    pub fn headwind(&self) -> f64 {
        self.velocity.get::<foot_per_second>() * self.direction.get::<radian>().cos()
    }

    /// Component across the line of fire, positive from the left [fps].
    pub fn crosswind(&self) -> f64 {
        self.velocity.get::<foot_per_second>() * self.direction.get::<radian>().sin()
    }

    /// Wind vector [fps] in the shot frame (x downrange, y up, z right),
    /// tilted by the sight angle and rotated by the cant angle [rad].
    pub fn to_vector(&self, sight_angle: f64, cant_angle: f64) -> Vector3<f64> {
        let (sight_sin, sight_cos) = sight_angle.sin_cos();
        let (cant_sin, cant_cos) = cant_angle.sin_cos();
        let range_velocity = self.headwind();
        let cross = self.crosswind();
        let range_factor = -range_velocity * sight_sin;

        Vector3::new(
            range_velocity * sight_cos,
            range_factor * cant_cos + cross * cant_sin,
            cross * cant_cos - range_factor * cant_sin,
        )
    }
}

/// Walks wind segments in increasing distance order as the projectile moves
/// downrange. The last segment extends to infinity.
#[derive(Clone, Debug)]
pub struct WindSock {
    segments: Vec<WindSegment>,
    sight_angle: f64,
    cant_angle: f64,
    current: usize,
    next_range_ft: f64,
    vector: Vector3<f64>,
}

impl WindSock {
    pub fn new(segments: &[WindSegment], sight_angle: f64, cant_angle: f64) -> Self {
        let mut segments = segments.to_vec();
        segments.sort_by(|a, b| {
            a.until_distance
                .get::<foot>()
                .total_cmp(&b.until_distance.get::<foot>())
        });

        let (next_range_ft, vector) = match segments.first() {
            None => (f64::INFINITY, Vector3::zeros()),
            Some(first) => {
                let next = if segments.len() > 1 {
                    first.until_distance.get::<foot>()
                } else {
                    f64::INFINITY
                };
                (next, first.to_vector(sight_angle, cant_angle))
            }
        };

        Self {
            segments,
            sight_angle,
            cant_angle,
            current: 0,
            next_range_ft,
            vector,
        }
    }

    /// Wind vector [fps] in effect at `range_ft` downrange.
    ///
    /// Ranges must be queried in non-decreasing order.
    pub fn wind_at(&mut self, range_ft: f64) -> Vector3<f64> {
        while range_ft >= self.next_range_ft {
            self.current += 1;
            let segment = self.segments[self.current];
            self.vector = segment.to_vector(self.sight_angle, self.cant_angle);
            self.next_range_ft = if self.current == self.segments.len() - 1 {
                f64::INFINITY
            } else {
                segment.until_distance.get::<foot>()
            };
        }
        self.vector
    }

    pub fn current_segment(&self) -> Option<&WindSegment> {
        self.segments.get(self.current)
    }
}

/* ----------------------------------- tests ---------------------------------- */
