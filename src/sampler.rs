//! Samplers of Poisson point processes.
//!
//! - [`sample_constant_rate`] draws a homogeneous process by accumulating exponential interarrival times.
//! - [`sample_time_dependent_rate`] thins a homogeneous process at `max_rate` down to a time-dependent rate.
use rand::Rng;
use rand_distr::{Distribution, Exp};

use crate::error::PoissonError;
use crate::rate::RateFunction;
use crate::utils::check_positive;

/// Maximum number of spike times preallocated by the samplers.
const MAX_CAPACITY_HINT: usize = 1 << 20;

/// Returns the number of spike times to preallocate for the expected number of spikes.
fn capacity_hint(duration: f64, rate: f64) -> usize {
    // saturating conversion, infinite products map to usize::MAX
    ((duration * rate).ceil() as usize).min(MAX_CAPACITY_HINT)
}

/// Returns the (sorted) spike times of a homogeneous Poisson process with the given rate on `[0, duration)`.
///
/// # Parameters
/// - `duration`: The length of the observation window, in seconds.
/// - `rate`: The expected number of spikes per second, in Hz.
/// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
///
/// # Returns
/// The spike times, strictly increasing. The sequence may be empty.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rusty_poisson::sampler::sample_constant_rate;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let times = sample_constant_rate(10.0, 20.0, &mut rng).unwrap();
///
/// assert!(times.windows(2).all(|ts| ts[0] < ts[1]));
/// assert!(times.iter().all(|&t| t >= 0.0 && t < 10.0));
/// ```
pub fn sample_constant_rate<R: Rng + ?Sized>(
    duration: f64,
    rate: f64,
    rng: &mut R,
) -> Result<Vec<f64>, PoissonError> {
    check_positive("duration", duration)?;
    check_positive("rate", rate)?;

    let interval = Exp::new(rate).map_err(|e| PoissonError::InvalidParameter(e.to_string()))?;

    let mut times = Vec::with_capacity(capacity_hint(duration, rate));
    let mut time = 0.0;
    loop {
        time += interval.sample(rng);
        if time >= duration {
            break;
        }
        times.push(time);
    }

    log::trace!(
        "{} spikes sampled on [0, {}) at constant rate {} Hz",
        times.len(),
        duration,
        rate
    );

    Ok(times)
}

/// Returns the (sorted) spike times of a Poisson process with time-dependent rate on `[0, duration)`.
///
/// Candidates are first sampled at the constant rate `max_rate`. The first candidate is always kept;
/// every subsequent candidate `t_i` is kept with probability `rate_fn.rate(t_i, t_{i-1}) / max_rate`,
/// where `t_{i-1}` is the preceding candidate, whether or not it was kept.
///
/// The rate function must stay within `[0, max_rate]` at every evaluated candidate; otherwise an error is
/// returned.
pub fn sample_time_dependent_rate<F, R>(
    duration: f64,
    rate_fn: &F,
    max_rate: f64,
    rng: &mut R,
) -> Result<Vec<f64>, PoissonError>
where
    F: RateFunction + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = sample_constant_rate(duration, max_rate, rng)?;

    let Some(&first) = candidates.first() else {
        return Ok(vec![]);
    };

    let mut times = Vec::with_capacity(candidates.len());
    times.push(first);

    for ts in candidates.windows(2) {
        let (prev_t, t) = (ts[0], ts[1]);
        let rate = rate_fn.rate(t, prev_t);
        let ratio = rate / max_rate;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(PoissonError::InvalidParameter(format!(
                "Invalid rate function: rate {} at time {} (previous candidate at {}) is outside [0, {}]",
                rate, t, prev_t, max_rate
            )));
        }
        if ratio >= rng.gen::<f64>() {
            times.push(t);
        }
    }

    log::trace!(
        "{} out of {} candidate spikes retained on [0, {}) (max rate {} Hz)",
        times.len(),
        candidates.len(),
        duration,
        max_rate
    );

    Ok(times)
}
