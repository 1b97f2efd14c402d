use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rusty_poisson::error::PoissonError;
use rusty_poisson::generator::{
    HomogeneousPoissonGenerator, RefractoryPoissonGenerator, SpikeGenerator,
    VariableRatePoissonGenerator,
};
use rusty_poisson::sampler::{sample_constant_rate, sample_time_dependent_rate};
use rusty_poisson::spike_train::SpikeTrain;
use rusty_poisson::trials::generate_trials;

const SEED: u64 = 42;

fn fraction_below(intervals: &[f64], threshold: f64) -> f64 {
    intervals.iter().filter(|&&dt| dt < threshold).count() as f64 / intervals.len() as f64
}

#[test]
fn test_constant_rate_mean_interval() {
    let mut generator = HomogeneousPoissonGenerator::with_seed(50.0, SEED).unwrap();
    let spike_train = generator.generate(1000.0).unwrap();

    let intervals = spike_train.interspike_intervals();
    let mean_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    assert_relative_eq!(mean_interval, 0.02, max_relative = 0.1);
}

#[test]
fn test_homogeneous_poisson_statistics() {
    let mut generator = HomogeneousPoissonGenerator::with_seed(50.0, SEED).unwrap();
    let spike_train = generator.generate(100.0).unwrap();

    // both the coefficient of variation and the Fano factor of a Poisson process are one
    assert_relative_eq!(spike_train.coefficient_variation().unwrap(), 1.0, epsilon = 0.1);
    for fano in spike_train.fano_factor(&[20.0, 100.0, 250.0]).unwrap() {
        assert_relative_eq!(fano, 1.0, epsilon = 0.25);
    }

    // the interspike interval histogram follows an exponential distribution
    let edges = (1..=100).map(|t| t as f64).collect::<Vec<f64>>();
    let hist = spike_train.interspike_interval_histogram(&edges).unwrap();
    assert_eq!(hist.len(), 100);
    assert!(hist.iter().sum::<f64>() <= 1.0 + 1e-12);
    assert_relative_eq!(hist[..10].iter().sum::<f64>(), 1.0 - (-0.5_f64).exp(), epsilon = 0.05);
    assert!(hist[0] > hist[50]);
}

#[test]
fn test_saturated_thinning_matches_constant_rate() {
    let mut rng = StdRng::seed_from_u64(SEED);

    let times = sample_time_dependent_rate(500.0, &|_t: f64, _prev_t: f64| 40.0, 40.0, &mut rng)
        .unwrap();
    let mean_interval =
        times.windows(2).map(|ts| ts[1] - ts[0]).sum::<f64>() / (times.len() - 1) as f64;
    assert_relative_eq!(mean_interval, 1.0 / 40.0, max_relative = 0.1);

    let times = sample_constant_rate(500.0, 40.0, &mut rng).unwrap();
    assert_relative_eq!(times.len() as f64, 20000.0, max_relative = 0.05);
}

#[test]
fn test_refractory_lengthens_intervals() {
    let mut homogeneous = HomogeneousPoissonGenerator::with_seed(100.0, SEED).unwrap();
    let mut refractory = RefractoryPoissonGenerator::with_seed(100.0, 50.0, SEED).unwrap();

    let homogeneous_intervals = homogeneous.generate(100.0).unwrap().interspike_intervals();
    let refractory_intervals = refractory.generate(100.0).unwrap().interspike_intervals();

    // fewer short intervals under refractoriness
    let short = 0.005;
    assert!(
        fraction_below(&refractory_intervals, short)
            < 0.5 * fraction_below(&homogeneous_intervals, short)
    );

    let mean = |intervals: &[f64]| intervals.iter().sum::<f64>() / intervals.len() as f64;
    assert!(mean(&refractory_intervals) > mean(&homogeneous_intervals));
}

#[test]
fn test_variable_rate_follows_rate_function() {
    // 10 Hz during odd seconds, 90 Hz during even seconds
    let rate_fn = |t: f64| if (t as usize) % 2 == 0 { 90.0 } else { 10.0 };
    let mut generator = VariableRatePoissonGenerator::with_seed(90.0, rate_fn, SEED).unwrap();
    let spike_train = generator.generate(200.0).unwrap();

    let counts = spike_train.spike_counts(1000.0).unwrap();
    assert_eq!(counts.len(), 200);

    let even = counts.iter().step_by(2).sum::<usize>() as f64 / 100.0;
    let odd = counts.iter().skip(1).step_by(2).sum::<usize>() as f64 / 100.0;
    assert_relative_eq!(even, 90.0, max_relative = 0.1);
    assert_relative_eq!(odd, 10.0, max_relative = 0.2);
}

#[test]
fn test_autocorrelation_of_poisson_process() {
    let mut generator = HomogeneousPoissonGenerator::with_seed(20.0, SEED).unwrap();
    let spike_train = generator.generate(200.0).unwrap();

    let num_spikes = spike_train.num_spikes() as f64;
    let bin_size = 0.01;
    let bias = num_spikes.powi(2) * bin_size / 200.0_f64.powi(2);

    let (x, y) = spike_train.autocorrelation(bin_size, 50).unwrap();
    assert_eq!(x.len(), 50);
    assert_relative_eq!(x[49], 490.0, epsilon = 1e-9);

    // the zero lag bin holds every spike paired with itself
    assert!(y[0] + bias >= num_spikes / 200.0);

    // no residual rhythmicity
    let mean = y[1..].iter().sum::<f64>() / 49.0;
    assert!(mean.abs() < 0.05 * bias);
}

#[test]
fn test_boundary_spike_trains() {
    for spikes in [vec![], vec![0.5]] {
        let spike_train = SpikeTrain::build(spikes, 1.0).unwrap();

        assert!(spike_train.interspike_intervals().is_empty());
        assert!(matches!(
            spike_train.coefficient_variation(),
            Err(PoissonError::InsufficientData(_))
        ));
        assert!(matches!(
            spike_train.fano_factor(&[100.0]),
            Err(PoissonError::InsufficientData(_))
        ));
        assert!(matches!(
            spike_train.interspike_interval_histogram(&[1.0, 2.0]),
            Err(PoissonError::InsufficientData(_))
        ));
        assert_eq!(spike_train.spike_counts(100.0).unwrap().len(), 10);

        let (x, y) = spike_train.autocorrelation(0.1, 5).unwrap();
        assert_eq!(x.len(), 5);
        assert!(y.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_trials_statistics() {
    let spike_trains = generate_trials(
        |rng| HomogeneousPoissonGenerator::with_rng(30.0, rng),
        10.0,
        40,
        SEED,
    )
    .unwrap();

    let mean_num_spikes = spike_trains
        .iter()
        .map(|spike_train| spike_train.num_spikes() as f64)
        .sum::<f64>()
        / 40.0;
    assert_relative_eq!(mean_num_spikes, 300.0, max_relative = 0.05);
}
