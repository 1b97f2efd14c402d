//! Poisson spike train generators.
//!
//! Every generator owns its random number generator, so that independently constructed generators never
//! interfere and seeded generators are reproducible.
//!
//! # Examples
//!
//! ```rust
//! use rusty_poisson::generator::{HomogeneousPoissonGenerator, SpikeGenerator};
//!
//! // A neuron firing at 100 Hz for 10 seconds
//! let mut generator = HomogeneousPoissonGenerator::with_seed(100.0, 42).unwrap();
//! let spike_train = generator.generate(10.0).unwrap();
//!
//! assert_eq!(spike_train.duration(), 10.0);
//! assert!(spike_train.num_spikes() > 0);
//! ```
use derivative::Derivative;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PoissonError;
use crate::rate::{RefractoryRate, TimeVaryingRate};
use crate::sampler::{sample_constant_rate, sample_time_dependent_rate};
use crate::spike_train::SpikeTrain;
use crate::utils::check_positive;

/// A source of spike trains.
pub trait SpikeGenerator {
    /// Returns a new spike train over `[0, duration)`, with `duration` in seconds.
    /// Successive calls return independent samples.
    fn generate(&mut self, duration: f64) -> Result<SpikeTrain, PoissonError>;
}

/// A generator of homogeneous Poisson spike trains.
#[derive(Debug, Clone)]
pub struct HomogeneousPoissonGenerator<R = StdRng> {
    /// The firing rate, in Hz.
    rate: f64,
    rng: R,
}

impl HomogeneousPoissonGenerator<StdRng> {
    /// Create a generator with the given firing rate (in Hz), seeded from system entropy.
    pub fn new(rate: f64) -> Result<Self, PoissonError> {
        Self::with_rng(rate, StdRng::from_entropy())
    }

    /// Create a reproducible generator with the given firing rate (in Hz).
    pub fn with_seed(rate: f64, seed: u64) -> Result<Self, PoissonError> {
        Self::with_rng(rate, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HomogeneousPoissonGenerator<R> {
    /// Create a generator with the given firing rate (in Hz) drawing from the provided random number generator.
    pub fn with_rng(rate: f64, rng: R) -> Result<Self, PoissonError> {
        check_positive("rate", rate)?;
        Ok(HomogeneousPoissonGenerator { rate, rng })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl<R: Rng> SpikeGenerator for HomogeneousPoissonGenerator<R> {
    fn generate(&mut self, duration: f64) -> Result<SpikeTrain, PoissonError> {
        let spikes = sample_constant_rate(duration, self.rate, &mut self.rng)?;
        log::debug!(
            "Homogeneous Poisson spike train generated: {} spikes in {} s at {} Hz",
            spikes.len(),
            duration,
            self.rate
        );
        Ok(SpikeTrain::from_sorted(spikes, duration))
    }
}

/// A generator of Poisson spike trains whose firing rate recovers exponentially after each spike.
///
/// The instantaneous rate is `max_rate * (1 - exp(-(t - t_prev) / recovery_time))`, with times in milliseconds,
/// where `t_prev` is the previous candidate spike of the underlying homogeneous process at `max_rate`.
#[derive(Debug, Clone)]
pub struct RefractoryPoissonGenerator<R = StdRng> {
    rate_fn: RefractoryRate,
    rng: R,
}

impl RefractoryPoissonGenerator<StdRng> {
    /// Create a generator with the given maximum firing rate (in Hz) and recovery time (in milliseconds), seeded from system entropy.
    pub fn new(max_rate: f64, recovery_time: f64) -> Result<Self, PoissonError> {
        Self::with_rng(max_rate, recovery_time, StdRng::from_entropy())
    }

    /// Create a reproducible generator with the given maximum firing rate (in Hz) and recovery time (in milliseconds).
    pub fn with_seed(max_rate: f64, recovery_time: f64, seed: u64) -> Result<Self, PoissonError> {
        Self::with_rng(max_rate, recovery_time, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RefractoryPoissonGenerator<R> {
    /// Create a generator with the given maximum firing rate (in Hz) and recovery time (in milliseconds) drawing from the provided random number generator.
    pub fn with_rng(max_rate: f64, recovery_time: f64, rng: R) -> Result<Self, PoissonError> {
        check_positive("maximum rate", max_rate)?;
        check_positive("recovery time", recovery_time)?;
        Ok(RefractoryPoissonGenerator {
            rate_fn: RefractoryRate::new(max_rate, recovery_time),
            rng,
        })
    }

    pub fn max_rate(&self) -> f64 {
        self.rate_fn.max_rate()
    }

    pub fn recovery_time(&self) -> f64 {
        self.rate_fn.recovery_time()
    }
}

impl<R: Rng> SpikeGenerator for RefractoryPoissonGenerator<R> {
    fn generate(&mut self, duration: f64) -> Result<SpikeTrain, PoissonError> {
        let spikes = sample_time_dependent_rate(
            duration,
            &self.rate_fn,
            self.rate_fn.max_rate(),
            &mut self.rng,
        )?;
        log::debug!(
            "Refractory Poisson spike train generated: {} spikes in {} s (max rate {} Hz, recovery time {} ms)",
            spikes.len(),
            duration,
            self.rate_fn.max_rate(),
            self.rate_fn.recovery_time()
        );
        Ok(SpikeTrain::from_sorted(spikes, duration))
    }
}

/// A generator of Poisson spike trains with an arbitrary time-varying firing rate.
///
/// The rate function must never exceed `max_rate` over the generated window.
#[derive(Derivative)]
#[derivative(Debug(bound = "R: std::fmt::Debug"))]
pub struct VariableRatePoissonGenerator<F, R = StdRng> {
    max_rate: f64,
    rate_fn: TimeVaryingRate<F>,
    rng: R,
}

impl<F> VariableRatePoissonGenerator<F, StdRng>
where
    F: Fn(f64) -> f64,
{
    /// Create a generator with the given maximum firing rate (in Hz) and rate function (time in seconds to rate in Hz), seeded from system entropy.
    pub fn new(max_rate: f64, rate_fn: F) -> Result<Self, PoissonError> {
        Self::with_rng(max_rate, rate_fn, StdRng::from_entropy())
    }

    /// Create a reproducible generator with the given maximum firing rate (in Hz) and rate function.
    pub fn with_seed(max_rate: f64, rate_fn: F, seed: u64) -> Result<Self, PoissonError> {
        Self::with_rng(max_rate, rate_fn, StdRng::seed_from_u64(seed))
    }
}

impl<F, R> VariableRatePoissonGenerator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    /// Create a generator with the given maximum firing rate (in Hz) and rate function drawing from the provided random number generator.
    pub fn with_rng(max_rate: f64, rate_fn: F, rng: R) -> Result<Self, PoissonError> {
        check_positive("maximum rate", max_rate)?;
        Ok(VariableRatePoissonGenerator {
            max_rate,
            rate_fn: TimeVaryingRate::new(rate_fn),
            rng,
        })
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }
}

impl<F, R> SpikeGenerator for VariableRatePoissonGenerator<F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    fn generate(&mut self, duration: f64) -> Result<SpikeTrain, PoissonError> {
        let spikes =
            sample_time_dependent_rate(duration, &self.rate_fn, self.max_rate, &mut self.rng)?;
        log::debug!(
            "Variable rate Poisson spike train generated: {} spikes in {} s (max rate {} Hz)",
            spikes.len(),
            duration,
            self.max_rate
        );
        Ok(SpikeTrain::from_sorted(spikes, duration))
    }
}
