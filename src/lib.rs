//! This crate provides tools for simulating neuronal spike trains as Poisson point processes in Rust,
//! and for computing their descriptive statistics.
//!
//! # Generating Spike Trains
//!
//! ## Homogeneous Poisson Process
//!
//! ```rust
//! use rusty_poisson::generator::{HomogeneousPoissonGenerator, SpikeGenerator};
//!
//! // A neuron firing at 100 Hz, observed for 10 seconds
//! let mut generator = HomogeneousPoissonGenerator::with_seed(100.0, 42).unwrap();
//! let spike_train = generator.generate(10.0).unwrap();
//!
//! // The coefficient of variation of a Poisson process is close to one
//! let cv = spike_train.coefficient_variation().unwrap();
//! assert!((cv - 1.0).abs() < 0.2);
//! ```
//!
//! ## With Refractoriness
//!
//! ```rust
//! use rusty_poisson::generator::{RefractoryPoissonGenerator, SpikeGenerator};
//!
//! // The firing rate recovers toward 100 Hz with a time constant of 10 ms after each spike
//! let mut generator = RefractoryPoissonGenerator::with_seed(100.0, 10.0, 42).unwrap();
//! let spike_train = generator.generate(10.0).unwrap();
//!
//! assert!(spike_train.firing_rate() < 100.0);
//! ```
//!
//! ## With a Time-Varying Rate
//!
//! ```rust
//! use rusty_poisson::generator::{VariableRatePoissonGenerator, SpikeGenerator};
//!
//! // A rate oscillating between 0 and 100 Hz at 2 Hz
//! let rate_fn = |t: f64| 50.0 * (1.0 + (2.0 * std::f64::consts::PI * 2.0 * t).sin());
//! let mut generator = VariableRatePoissonGenerator::with_seed(100.0, rate_fn, 42).unwrap();
//! let spike_train = generator.generate(10.0).unwrap();
//!
//! assert!(spike_train.num_spikes() > 0);
//! ```
//!
//! # Analyzing Spike Trains
//!
//! ```rust
//! use rusty_poisson::spike_train::SpikeTrain;
//!
//! let spike_train = SpikeTrain::build(vec![0.05, 0.15, 0.25], 0.3).unwrap();
//!
//! // Spike counts in bins of 100 ms
//! assert_eq!(spike_train.spike_counts(100.0).unwrap(), vec![1, 1, 1]);
//!
//! // Autocorrelation histogram over 10 bins of 10 ms
//! let (x, y) = spike_train.autocorrelation(0.01, 10).unwrap();
//! assert_eq!(x.len(), 10);
//! assert!(y[0] > 0.0);
//! ```

pub mod error;
pub mod generator;
pub mod rate;
pub mod sampler;
pub mod spike_train;
pub mod trials;
pub mod utils;

/// The number of milliseconds in a second, used to convert counting intervals, bin edges and recovery times.
pub const MS_PER_SECOND: f64 = 1000.0;
/// Minimum number of trials to consider parallel processing.
pub const MIN_PARALLEL_TRIALS: usize = 16;
