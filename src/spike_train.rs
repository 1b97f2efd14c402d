//! Module implementing the concept of a spike train and its descriptive statistics.
//!
//! All times are expressed in seconds, except for the counting intervals and histogram bin edges, which
//! are expressed in milliseconds.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::PoissonError;
use crate::utils::{check_positive, mean, variance};
use crate::MS_PER_SECOND;

/// Relative tolerance used when counting the number of full bins fitting in a spike train.
const BIN_COUNT_TOL: f64 = 1e-9;
/// Maximum number of bins for spike counts.
pub const MAX_NUM_BINS: usize = 1 << 24;

/// Represents the spikes emitted by a single neuron over a finite observation window.
/// Deserialized spike trains go through [`SpikeTrain::build`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSpikeTrain")]
pub struct SpikeTrain {
    /// The (sorted) spike times, in seconds.
    spikes: Vec<f64>,
    /// The length of the observation window, in seconds.
    duration: f64,
}

/// Unchecked spike train data, as read by serde.
#[derive(Deserialize)]
struct RawSpikeTrain {
    spikes: Vec<f64>,
    duration: f64,
}

impl TryFrom<RawSpikeTrain> for SpikeTrain {
    type Error = PoissonError;

    fn try_from(raw: RawSpikeTrain) -> Result<Self, Self::Error> {
        SpikeTrain::build(raw.spikes, raw.duration)
    }
}

impl SpikeTrain {
    /// Create a spike train with the specified parameters.
    /// If necessary, the spike times are sorted.
    /// The function returns an error for an invalid duration or spike times outside `[0, duration)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rusty_poisson::spike_train::SpikeTrain;
    ///
    /// let spike_train = SpikeTrain::build(vec![0.7, 0.1, 0.3], 1.0).unwrap();
    /// assert_eq!(spike_train.spikes(), &[0.1, 0.3, 0.7]);
    /// assert_eq!(spike_train.interspike_intervals().len(), 2);
    ///
    /// assert!(SpikeTrain::build(vec![0.1, 1.5], 1.0).is_err());
    /// ```
    pub fn build(mut spikes: Vec<f64>, duration: f64) -> Result<Self, PoissonError> {
        check_positive("duration", duration)?;

        if let Some(t) = spikes.iter().find(|&&t| !(0.0..duration).contains(&t)) {
            return Err(PoissonError::InvalidParameter(format!(
                "Invalid spike time {}: all spike times must be in [0, {})",
                t, duration
            )));
        }

        spikes.sort_by(|t1, t2| {
            t1.partial_cmp(t2)
                .unwrap_or_else(|| panic!("Comparison failed: NaN values should have been caught earlier"))
        });

        Ok(SpikeTrain { spikes, duration })
    }

    /// Wraps sampled spike times, which are sorted and within `[0, duration)` by construction.
    pub(crate) fn from_sorted(spikes: Vec<f64>, duration: f64) -> Self {
        debug_assert!(spikes.windows(2).all(|ts| ts[0] <= ts[1]));
        SpikeTrain { spikes, duration }
    }

    /// Returns the spike times, in seconds.
    pub fn spikes(&self) -> &[f64] {
        &self.spikes[..]
    }

    /// Returns the length of the observation window, in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the number of spikes.
    pub fn num_spikes(&self) -> usize {
        self.spikes.len()
    }

    /// Returns the mean firing rate over the observation window, in Hz.
    pub fn firing_rate(&self) -> f64 {
        self.spikes.len() as f64 / self.duration
    }

    /// Returns the time between consecutive spikes, in seconds.
    /// The result is empty if there are less than two spikes.
    pub fn interspike_intervals(&self) -> Vec<f64> {
        self.spikes
            .iter()
            .tuple_windows()
            .map(|(t1, t2)| t2 - t1)
            .collect()
    }

    /// Returns the coefficient of variation of the interspike intervals, i.e., their standard deviation over their mean.
    /// The function returns an error if there are less than two intervals.
    pub fn coefficient_variation(&self) -> Result<f64, PoissonError> {
        let intervals = self.interspike_intervals();
        if intervals.len() < 2 {
            return Err(PoissonError::InsufficientData(format!(
                "The coefficient of variation requires at least two interspike intervals (got {})",
                intervals.len()
            )));
        }

        match (mean(&intervals), variance(&intervals)) {
            (Some(mean), Some(variance)) if mean > 0.0 => Ok(variance.sqrt() / mean),
            _ => Err(PoissonError::InsufficientData(
                "The coefficient of variation is undefined for a zero mean interspike interval"
                    .to_string(),
            )),
        }
    }

    /// Returns the number of spikes in consecutive bins of `interval` milliseconds, starting at time 0.
    ///
    /// The bins are half-open, i.e., `[k * interval, (k + 1) * interval)`, and only the bins fully
    /// contained in the observation window are counted. The number of bins `duration / interval` is
    /// rounded down with a relative tolerance of `1e-9`, so that the last bin may end slightly past the
    /// duration when the quotient is just below an integer (e.g., three bins of 100 ms in 0.3 s).
    ///
    /// The function returns an error if the interval is not positive, or if it would yield more than
    /// `MAX_NUM_BINS` bins.
    pub fn spike_counts(&self, interval: f64) -> Result<Vec<usize>, PoissonError> {
        check_positive("counting interval", interval)?;
        let interval_sec = interval / MS_PER_SECOND;

        let num_bins = (self.duration / interval_sec * (1.0 + BIN_COUNT_TOL)).floor();
        if !num_bins.is_finite() || num_bins > MAX_NUM_BINS as f64 {
            return Err(PoissonError::InvalidParameter(format!(
                "Invalid counting interval {} ms: more than {} bins over {} s",
                interval, MAX_NUM_BINS, self.duration
            )));
        }
        let num_bins = num_bins as usize;

        Ok((0..=num_bins)
            .map(|k| self.num_spikes_before(k as f64 * interval_sec))
            .tuple_windows()
            .map(|(n1, n2)| n2 - n1)
            .collect())
    }

    /// Returns the Fano factor, i.e., the variance of the spike counts over their mean, for every counting interval (in milliseconds).
    /// The function returns an error if there are less than two spikes, or if the spike counts are all zero for some interval.
    pub fn fano_factor(&self, counting_intervals: &[f64]) -> Result<Vec<f64>, PoissonError> {
        if self.spikes.len() < 2 {
            return Err(PoissonError::InsufficientData(format!(
                "The Fano factor requires at least two spikes (got {})",
                self.spikes.len()
            )));
        }

        counting_intervals
            .iter()
            .map(|&interval| {
                let counts = self
                    .spike_counts(interval)?
                    .into_iter()
                    .map(|n| n as f64)
                    .collect::<Vec<f64>>();

                match (mean(&counts), variance(&counts)) {
                    (Some(mean), Some(variance)) if mean > 0.0 => Ok(variance / mean),
                    _ => Err(PoissonError::InsufficientData(format!(
                        "The Fano factor is undefined for a counting interval of {} ms: no spike in any full bin",
                        interval
                    ))),
                }
            })
            .collect()
    }

    /// Returns the fraction of interspike intervals falling in each bin.
    ///
    /// The bins are delimited by the provided (sorted) edges, in milliseconds, with an implicit leading edge at 0,
    /// i.e., the i-th bin is `[edges[i-1], edges[i])`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rusty_poisson::spike_train::SpikeTrain;
    ///
    /// let spike_train = SpikeTrain::build(vec![0.0, 0.002, 0.007, 0.008], 1.0).unwrap();
    /// let hist = spike_train.interspike_interval_histogram(&[1.5, 3.0, 6.0]).unwrap();
    ///
    /// assert_eq!(hist.len(), 3);
    /// assert!((hist[0] - 1.0 / 3.0).abs() < 1e-12);
    /// assert!((hist[1] - 1.0 / 3.0).abs() < 1e-12);
    /// assert!((hist[2] - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn interspike_interval_histogram(&self, bin_edges: &[f64]) -> Result<Vec<f64>, PoissonError> {
        if let Some(edge) = bin_edges.iter().find(|edge| !edge.is_finite() || **edge < 0.0) {
            return Err(PoissonError::InvalidParameter(format!(
                "Invalid bin edge {}: must be non-negative and finite",
                edge
            )));
        }
        if let Some((e1, e2)) = bin_edges.iter().tuple_windows().find(|(e1, e2)| e1 > e2) {
            return Err(PoissonError::InvalidParameter(format!(
                "Invalid bin edges: {} is followed by {}, edges must be sorted",
                e1, e2
            )));
        }

        let mut intervals = self.interspike_intervals();
        if intervals.is_empty() {
            return Err(PoissonError::InsufficientData(
                "The interspike interval histogram requires at least two spikes".to_string(),
            ));
        }

        // intervals are finite since spike times are
        intervals.sort_by(|a, b| {
            a.partial_cmp(b)
                .unwrap_or_else(|| panic!("Comparison failed: NaN values should have been caught earlier"))
        });
        let total = intervals.len() as f64;

        Ok(std::iter::once(0.0)
            .chain(bin_edges.iter().copied())
            .map(|edge| intervals.partition_point(|&dt| dt < edge / MS_PER_SECOND))
            .tuple_windows()
            .map(|(n1, n2)| (n2 - n1) as f64 / total)
            .collect())
    }

    /// Returns the autocorrelation histogram of the spike train, corrected for the expectation under a uniform firing rate.
    ///
    /// Every temporally ordered pair of spikes `t1 <= t2`, including the pairs made of the same spike twice,
    /// contributes its lag `t2 - t1` to the bin `floor(lag / bin_size)`, as long as it is smaller than `bin_count`.
    /// All pairs are visited, so the cost is quadratic in the number of spikes.
    /// The counts are divided by the duration, then the constant `num_spikes^2 * bin_size / duration^2` is subtracted.
    ///
    /// # Parameters
    /// - `bin_size`: The width of the lag bins, in seconds.
    /// - `bin_count`: The number of lag bins.
    ///
    /// # Returns
    /// A pair `(x, y)` where `x` are the bin starts, in milliseconds, and `y` the corrected autocorrelation values.
    pub fn autocorrelation(
        &self,
        bin_size: f64,
        bin_count: usize,
    ) -> Result<(Vec<f64>, Vec<f64>), PoissonError> {
        check_positive("bin size", bin_size)?;

        let mut counts = vec![0_usize; bin_count];
        self.spikes
            .iter()
            .enumerate()
            .flat_map(|(i, t1)| self.spikes[i..].iter().map(move |t2| (t2 - t1).abs()))
            .map(|lag| (lag / bin_size).floor() as usize)
            .filter(|&k| k < bin_count)
            .for_each(|k| counts[k] += 1);

        let num_spikes = self.spikes.len() as f64;
        let bias = num_spikes.powi(2) * bin_size / self.duration.powi(2);

        let x = (0..bin_count)
            .map(|k| k as f64 * bin_size * MS_PER_SECOND)
            .collect();
        let y = counts
            .into_iter()
            .map(|n| n as f64 / self.duration - bias)
            .collect();

        Ok((x, y))
    }

    /// Returns the number of spikes strictly before the given time.
    fn num_spikes_before(&self, time: f64) -> usize {
        self.spikes.partition_point(|&t| t < time)
    }
}
