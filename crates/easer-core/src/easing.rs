//! Easing curves
//!
//! Pure functions mapping normalized progress in [0, 1] to a curve value,
//! plus the fixed name table used to resolve curves given as strings.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{Error, Result};

/// Plain easing curve
pub type EasingFn = fn(f64) -> f64;

/// Resolved easing curve as stored by a controller
pub type BoxedEasing = Box<dyn Fn(f64) -> f64>;

/// Named curves, in the order they are listed to users
const CURVES: &[(&str, EasingFn)] = &[
    ("linear", linear),
    ("easeInQuad", ease_in_quad),
    ("easeOutQuad", ease_out_quad),
    ("easeInOutQuad", ease_in_out_quad),
    ("easeInCubic", ease_in_cubic),
    ("easeOutCubic", ease_out_cubic),
    ("easeInOutCubic", ease_in_out_cubic),
    ("easeInQuart", ease_in_quart),
    ("easeOutQuart", ease_out_quart),
    ("easeInOutQuart", ease_in_out_quart),
    ("easeInQuint", ease_in_quint),
    ("easeOutQuint", ease_out_quint),
    ("easeInOutQuint", ease_in_out_quint),
    ("easeInSine", ease_in_sine),
    ("easeOutSine", ease_out_sine),
    ("easeInOutSine", ease_in_out_sine),
    ("easeInExpo", ease_in_expo),
    ("easeOutExpo", ease_out_expo),
    ("easeInOutExpo", ease_in_out_expo),
    ("easeInCirc", ease_in_circ),
    ("easeOutCirc", ease_out_circ),
    ("easeInOutCirc", ease_in_out_circ),
    ("easeInBack", ease_in_back),
    ("easeOutBack", ease_out_back),
    ("easeInOutBack", ease_in_out_back),
    ("easeInElastic", ease_in_elastic),
    ("easeOutElastic", ease_out_elastic),
    ("easeInOutElastic", ease_in_out_elastic),
    ("easeInBounce", ease_in_bounce),
    ("easeOutBounce", ease_out_bounce),
    ("easeInOutBounce", ease_in_out_bounce),
];

/// Names of every curve in the table
pub fn names() -> impl Iterator<Item = &'static str> {
    CURVES.iter().map(|(name, _)| *name)
}

/// Find a named curve
///
/// # Errors
/// Returns [`Error::UnknownEasing`] listing every valid name when `name`
/// is not in the table.
pub fn lookup(name: &str) -> Result<EasingFn> {
    CURVES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, curve)| *curve)
        .ok_or_else(|| Error::UnknownEasing {
            name: name.to_string(),
            available: names().collect::<Vec<_>>().join(", "),
        })
}

/// Easing given to a controller: a curve name or a function
pub enum Easing {
    Named(String),
    Custom(BoxedEasing),
}

impl Easing {
    /// Wrap an arbitrary function
    pub fn custom<F>(curve: F) -> Self
    where
        F: Fn(f64) -> f64 + 'static,
    {
        Easing::Custom(Box::new(curve))
    }

    /// Resolve into a callable curve, looking names up in the table
    pub fn resolve(self) -> Result<BoxedEasing> {
        match self {
            Easing::Named(name) => lookup(&name).map(|curve| Box::new(curve) as BoxedEasing),
            Easing::Custom(curve) => Ok(curve),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Easing::Named(name.to_string())
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Easing::Named(name)
    }
}

impl From<EasingFn> for Easing {
    fn from(curve: EasingFn) -> Self {
        Easing::Custom(Box::new(curve))
    }
}

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

#[inline]
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[inline]
pub fn ease_in_cubic(t: f64) -> f64 {
    t.powi(3)
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn ease_in_quart(t: f64) -> f64 {
    t.powi(4)
}

#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

#[inline]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

#[inline]
pub fn ease_in_quint(t: f64) -> f64 {
    t.powi(5)
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

#[inline]
pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

#[inline]
pub fn ease_in_sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

#[inline]
pub fn ease_out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

#[inline]
pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[inline]
pub fn ease_in_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f64.powf(10.0 * t - 10.0)
    }
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[inline]
pub fn ease_in_out_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

#[inline]
pub fn ease_in_circ(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

#[inline]
pub fn ease_out_circ(t: f64) -> f64 {
    (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt()
}

#[inline]
pub fn ease_in_out_circ(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
    }
}

const BACK_OVERSHOOT: f64 = 1.70158;

/// Overshoots below 0 before heading to 1
#[inline]
pub fn ease_in_back(t: f64) -> f64 {
    let c3 = BACK_OVERSHOOT + 1.0;
    c3 * t.powi(3) - BACK_OVERSHOOT * t * t
}

/// Overshoots above 1 before settling
#[inline]
pub fn ease_out_back(t: f64) -> f64 {
    let c3 = BACK_OVERSHOOT + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + BACK_OVERSHOOT * (t - 1.0).powi(2)
}

#[inline]
pub fn ease_in_out_back(t: f64) -> f64 {
    let c2 = BACK_OVERSHOOT * 1.525;
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
    }
}

#[inline]
pub fn ease_in_elastic(t: f64) -> f64 {
    let c4 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2.0_f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
    }
}

#[inline]
pub fn ease_out_elastic(t: f64) -> f64 {
    let c4 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

#[inline]
pub fn ease_in_out_elastic(t: f64) -> f64 {
    let c5 = (2.0 * PI) / 4.5;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        -(2.0_f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
    } else {
        (2.0_f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0 + 1.0
    }
}

#[inline]
pub fn ease_in_bounce(t: f64) -> f64 {
    1.0 - ease_out_bounce(1.0 - t)
}

pub fn ease_out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[inline]
pub fn ease_in_out_bounce(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - ease_out_bounce(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + ease_out_bounce(2.0 * t - 1.0)) / 2.0
    }
}
