//! Instantaneous firing rates used to thin a homogeneous Poisson process.
//!
//! Every rate is evaluated as `rate(t, t_prev)`, where `t` is the time of the candidate spike and
//! `t_prev` the time of the preceding candidate. Rates without memory simply ignore `t_prev`.
use derivative::Derivative;

use crate::MS_PER_SECOND;

/// A (possibly history dependent) firing rate, in Hz.
pub trait RateFunction {
    /// Returns the firing rate at time `t`, given the previous candidate spike time `t_prev`.
    fn rate(&self, t: f64, t_prev: f64) -> f64;
}

impl<F> RateFunction for F
where
    F: Fn(f64, f64) -> f64,
{
    fn rate(&self, t: f64, t_prev: f64) -> f64 {
        self(t, t_prev)
    }
}

/// A firing rate recovering exponentially toward its maximum after each spike.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RefractoryRate {
    /// The asymptotic firing rate, in Hz.
    max_rate: f64,
    /// The recovery time constant, in milliseconds.
    recovery_time: f64,
}

impl RefractoryRate {
    /// Create a refractory rate with the given maximum firing rate (in Hz) and recovery time (in milliseconds).
    pub fn new(max_rate: f64, recovery_time: f64) -> Self {
        RefractoryRate {
            max_rate,
            recovery_time,
        }
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    pub fn recovery_time(&self) -> f64 {
        self.recovery_time
    }
}

impl RateFunction for RefractoryRate {
    fn rate(&self, t: f64, t_prev: f64) -> f64 {
        self.max_rate * (1.0 - (-(t - t_prev) * MS_PER_SECOND / self.recovery_time).exp())
    }
}

/// A firing rate depending on absolute time only.
#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
pub struct TimeVaryingRate<F> {
    #[derivative(Debug = "ignore")]
    rate_fn: F,
}

impl<F> TimeVaryingRate<F>
where
    F: Fn(f64) -> f64,
{
    /// Create a rate from a function mapping time (in seconds) to a firing rate (in Hz).
    pub fn new(rate_fn: F) -> Self {
        TimeVaryingRate { rate_fn }
    }
}

impl<F> RateFunction for TimeVaryingRate<F>
where
    F: Fn(f64) -> f64,
{
    fn rate(&self, t: f64, _t_prev: f64) -> f64 {
        (self.rate_fn)(t)
    }
}
