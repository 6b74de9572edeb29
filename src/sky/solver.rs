//! Batched Newton iteration for the time a body crosses an altitude.
//!
//! The derivative is a finite difference taken once at the initial guess
//! (a chord method). Each element iterates on its own and stops as soon as
//! it is within tolerance; the call as a whole fails if any element runs out
//! of iterations.

use qtty::{Days, Radians};

use super::body::CelestialBody;
use super::constants::DEFAULT_TIMESTEP;
use super::error::SkyError;
use super::location::EarthLocation;
use super::time::JulianDate;

/// Tuning for [`time_by_altitude`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Step of the finite-difference derivative.
    pub timestep: Days,
    /// Largest altitude error accepted as converged.
    pub tolerance: Radians,
    /// Newton updates allowed per element.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            tolerance: Radians::new(1.0e-4),
            max_iterations: 10,
        }
    }
}

/// Length of the broadcast of two batches: equal lengths, or one side of length 1
/// against a non-empty other side.
pub(crate) fn broadcast_len(left: usize, right: usize) -> Result<usize, SkyError> {
    match (left, right) {
        (l, r) if l == r => Ok(l),
        (1, r) if r > 0 => Ok(r),
        (l, 1) if l > 0 => Ok(l),
        (left, right) => Err(SkyError::LengthMismatch { left, right }),
    }
}

pub(crate) fn pick<T: Copy>(values: &[T], i: usize) -> T {
    if values.len() == 1 {
        values[0]
    } else {
        values[i]
    }
}

/// Times near `guesses` at which `body` stands at `altitudes`.
///
/// Either slice may have length 1, in which case it is repeated against the
/// other. Guesses must be close enough to pick the intended crossing (rise
/// rather than set).
///
/// # Errors
///
/// - `LengthMismatch` if the slices cannot be broadcast together
/// - `NotConverging` if any element is still off after `max_iterations` updates
pub fn time_by_altitude<B: CelestialBody>(
    body: &B,
    altitudes: &[Radians],
    guesses: &[JulianDate],
    location: &EarthLocation,
    config: &SolverConfig,
) -> Result<Vec<JulianDate>, SkyError> {
    let n = broadcast_len(altitudes.len(), guesses.len())?;
    let step = config.timestep;
    let tolerance = config.tolerance.value();

    let targets: Vec<f64> = (0..n).map(|i| pick(altitudes, i).value()).collect();
    let mut times: Vec<JulianDate> = Vec::with_capacity(n);
    let mut errors: Vec<f64> = Vec::with_capacity(n);
    let mut derivatives: Vec<f64> = Vec::with_capacity(n);

    for (i, target) in targets.iter().enumerate() {
        let guess = pick(guesses, i);
        let before = body.altitude(guess, location).value();
        let after_time = guess + step;
        let after = body.altitude(after_time, location).value();
        times.push(after_time);
        errors.push(after - target);
        derivatives.push((after - before) / step.value());
    }

    let converged = |err: f64| err.abs() <= tolerance;
    let mut iterations = vec![0usize; n];
    let mut pending: Vec<usize> = (0..n).filter(|&i| !converged(errors[i])).collect();

    while !pending.is_empty() {
        for &i in &pending {
            if iterations[i] >= config.max_iterations {
                log::warn!(
                    "{} crossing of {:.5} rad near {} did not converge in {} iterations",
                    B::NAME,
                    targets[i],
                    pick(guesses, i),
                    config.max_iterations
                );
                return Err(SkyError::NotConverging {
                    body: B::NAME,
                    iterations: config.max_iterations,
                });
            }
            times[i] = times[i] - Days::new(errors[i] / derivatives[i]);
            errors[i] = body.altitude(times[i], location).value() - targets[i];
            iterations[i] += 1;
        }
        pending.retain(|&i| !converged(errors[i]));
    }

    log::debug!(
        "{} altitude solve converged for {} element(s), at most {} iteration(s)",
        B::NAME,
        n,
        iterations.iter().max().copied().unwrap_or(0)
    );
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_rules() {
        assert_eq!(broadcast_len(3, 3), Ok(3));
        assert_eq!(broadcast_len(1, 4), Ok(4));
        assert_eq!(broadcast_len(4, 1), Ok(4));
        assert_eq!(broadcast_len(0, 0), Ok(0));
        assert_eq!(
            broadcast_len(2, 3),
            Err(SkyError::LengthMismatch { left: 2, right: 3 })
        );
        assert_eq!(
            broadcast_len(1, 0),
            Err(SkyError::LengthMismatch { left: 1, right: 0 })
        );
    }

    #[test]
    fn default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.timestep.value(), 0.002);
        assert_eq!(config.tolerance.value(), 1.0e-4);
        assert_eq!(config.max_iterations, 10);
    }
}
