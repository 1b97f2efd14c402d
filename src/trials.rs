//! Repeated, independent trials of a spike train generator.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::PoissonError;
use crate::generator::SpikeGenerator;
use crate::spike_train::SpikeTrain;
use crate::MIN_PARALLEL_TRIALS;

/// Returns `num_trials` independent spike trains of the given duration (in seconds).
///
/// For every trial, a generator is built by `build` from its own random number generator, seeded with `seed`
/// and set to the trial stream. The result is reproducible and does not depend on whether the trials run in
/// parallel (from `MIN_PARALLEL_TRIALS` trials on) or not.
///
/// # Examples
///
/// ```rust
/// use rusty_poisson::generator::HomogeneousPoissonGenerator;
/// use rusty_poisson::trials::generate_trials;
///
/// let spike_trains = generate_trials(
///     |rng| HomogeneousPoissonGenerator::with_rng(20.0, rng),
///     5.0,
///     10,
///     42,
/// )
/// .unwrap();
///
/// assert_eq!(spike_trains.len(), 10);
/// ```
pub fn generate_trials<G, F>(
    build: F,
    duration: f64,
    num_trials: usize,
    seed: u64,
) -> Result<Vec<SpikeTrain>, PoissonError>
where
    G: SpikeGenerator,
    F: Fn(ChaCha8Rng) -> Result<G, PoissonError> + Sync,
{
    let run_trial = |trial: usize| -> Result<SpikeTrain, PoissonError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(trial as u64);
        build(rng)?.generate(duration)
    };

    let spike_trains = if num_trials < MIN_PARALLEL_TRIALS {
        (0..num_trials)
            .map(run_trial)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        (0..num_trials)
            .into_par_iter()
            .map(run_trial)
            .collect::<Result<Vec<_>, _>>()?
    };

    log::debug!(
        "{} trials generated: {} spikes in total over {} s each",
        num_trials,
        spike_trains
            .iter()
            .map(|spike_train| spike_train.num_spikes())
            .sum::<usize>(),
        duration
    );

    Ok(spike_trains)
}
