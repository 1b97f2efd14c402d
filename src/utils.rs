//! Utility functions shared by the samplers and the spike train statistics.
use crate::error::PoissonError;

/// Returns an error unless the value is finite and (strictly) positive.
pub fn check_positive(name: &str, value: f64) -> Result<(), PoissonError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PoissonError::InvalidParameter(format!(
            "Invalid {} value: must be positive and finite (got {})",
            name, value
        )));
    }
    Ok(())
}

/// Returns the arithmetic mean of the values, or `None` if there is none.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Returns the population variance (normalized by the number of values), or `None` if there is no value.
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_check_positive() {
        assert!(check_positive("rate", 1.0).is_ok());
        assert!(check_positive("rate", 1e-12).is_ok());
        assert!(matches!(
            check_positive("rate", 0.0),
            Err(PoissonError::InvalidParameter(_))
        ));
        assert!(check_positive("rate", -1.0).is_err());
        assert!(check_positive("rate", f64::NAN).is_err());
        assert!(check_positive("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_mean_variance() {
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[]), None);

        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 6.0]).unwrap(), 3.0);
        assert_relative_eq!(variance(&[1.0, 2.0, 3.0, 6.0]).unwrap(), 3.5);
        assert_relative_eq!(variance(&[4.0]).unwrap(), 0.0);
    }
}
