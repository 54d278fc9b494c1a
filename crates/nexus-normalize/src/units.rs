//! Scalar unit conversions for terrestrial and astronomical quantities.
//!
//! Every function has an exact inverse partner. Values are converted as-is:
//! negative masses or temperatures below absolute zero pass through, and
//! overflow to infinity is not trapped.

/// Kilometres per statute mile.
pub const KM_PER_MILE: f64 = 1.60934;
/// Kilometres per astronomical unit.
pub const KM_PER_AU: f64 = 149_597_870.7;
/// Kilometres per light-year.
pub const KM_PER_LIGHT_YEAR: f64 = 9.461e12;
/// Kilometres per parsec.
pub const KM_PER_PARSEC: f64 = 3.086e13;

/// Kilograms per solar mass.
pub const KG_PER_SOLAR_MASS: f64 = 1.989e30;
/// Kilograms per Earth mass.
pub const KG_PER_EARTH_MASS: f64 = 5.972e24;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Joules per electronvolt.
pub const JOULES_PER_EV: f64 = 1.602e-19;

// Distance

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

pub fn km_to_au(km: f64) -> f64 {
    km / KM_PER_AU
}

pub fn au_to_km(au: f64) -> f64 {
    au * KM_PER_AU
}

pub fn km_to_lightyears(km: f64) -> f64 {
    km / KM_PER_LIGHT_YEAR
}

pub fn lightyears_to_km(ly: f64) -> f64 {
    ly * KM_PER_LIGHT_YEAR
}

pub fn km_to_parsecs(km: f64) -> f64 {
    km / KM_PER_PARSEC
}

pub fn parsecs_to_km(pc: f64) -> f64 {
    pc * KM_PER_PARSEC
}

// Mass

pub fn kg_to_solar_masses(kg: f64) -> f64 {
    kg / KG_PER_SOLAR_MASS
}

pub fn solar_masses_to_kg(msun: f64) -> f64 {
    msun * KG_PER_SOLAR_MASS
}

pub fn kg_to_earth_masses(kg: f64) -> f64 {
    kg / KG_PER_EARTH_MASS
}

pub fn earth_masses_to_kg(mearth: f64) -> f64 {
    mearth * KG_PER_EARTH_MASS
}

// Temperature

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    (c * 9.0 / 5.0) + 32.0
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

pub fn fahrenheit_to_kelvin(f: f64) -> f64 {
    celsius_to_kelvin(fahrenheit_to_celsius(f))
}

pub fn kelvin_to_fahrenheit(k: f64) -> f64 {
    celsius_to_fahrenheit(kelvin_to_celsius(k))
}

// Energy

pub fn joules_to_ev(j: f64) -> f64 {
    j / JOULES_PER_EV
}

pub fn ev_to_joules(ev: f64) -> f64 {
    ev * JOULES_PER_EV
}
