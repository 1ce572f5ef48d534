//! Geometric Brownian Motion (GBM) step function.
//!
//! GBM is the fundamental model for asset price dynamics, described by:
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - mu = drift (the risk-free rate under the pricing measure)
//! - sigma = volatility
//! - dW = Wiener process increment
//!
//! ## Log-space formulation
//!
//! We use the exact solution over one interval rather than an Euler step, so
//! prices stay strictly positive for any finite shock:
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//!
//! Sequential and parallel simulators both call into [`GbmStep::advance`];
//! there is exactly one implementation of the update.

use num_traits::Float;

/// Precomputed coefficients for one GBM time step.
///
/// Holds `(mu - 0.5*sigma^2)*dt` and `sigma*sqrt(dt)` so the inner loop of a
/// path evaluates one multiply-add and one `exp` per shock.
///
/// Negative `sigma` is a caller contract violation and is not checked here.
///
/// # Examples
///
/// ```
/// use pricer_models::models::GbmStep;
///
/// let step = GbmStep::new(0.05_f64, 0.2, 0.01);
/// let s = step.advance(100.0, 0.0);
/// // Zero shock leaves only the drift term
/// assert!((s - 100.0 * ((0.05 - 0.02) * 0.01_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep<T: Float> {
    /// (mu - 0.5*sigma^2) * dt
    drift_dt: T,
    /// sigma * sqrt(dt)
    vol_sqrt_dt: T,
}

impl<T: Float> GbmStep<T> {
    /// Builds the step coefficients for drift `mu`, volatility `sigma` and
    /// time increment `dt`.
    #[inline]
    pub fn new(mu: T, sigma: T, dt: T) -> Self {
        let two = T::one() + T::one();

        // Drift term: (mu - sigma^2 / 2) * dt
        let drift_dt = (mu - sigma * sigma / two) * dt;

        // Diffusion scale: sigma * sqrt(dt)
        let vol_sqrt_dt = sigma * dt.sqrt();

        Self {
            drift_dt,
            vol_sqrt_dt,
        }
    }

    /// Drift contribution to the log-return over one step.
    #[inline]
    pub fn drift_dt(&self) -> T {
        self.drift_dt
    }

    /// Standard deviation of the log-return over one step.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> T {
        self.vol_sqrt_dt
    }

    /// Advances `price` by one step given a standard normal shock `z`.
    #[inline]
    pub fn advance(&self, price: T, z: T) -> T {
        price * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }
}

/// Computes the next asset price under geometric Brownian motion.
///
/// `S_next = S * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*z)`
///
/// # Arguments
///
/// * `price` - Current asset price
/// * `mu` - Drift rate
/// * `sigma` - Volatility
/// * `dt` - Time increment in years
/// * `z` - Standard normal shock
///
/// # Edge cases
///
/// `dt == 0` returns `price` unchanged, for any `z`.
///
/// # Examples
///
/// ```
/// use pricer_models::models::next_price;
///
/// assert_eq!(next_price(100.0, 0.05, 0.2, 0.0, 3.0), 100.0);
/// assert!(next_price(100.0, 0.05, 0.2, 0.01, -10.0) > 0.0);
/// ```
#[inline]
pub fn next_price<T: Float>(price: T, mu: T, sigma: T, dt: T, z: T) -> T {
    if dt == T::zero() {
        return price;
    }
    GbmStep::new(mu, sigma, dt).advance(price, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_dt_is_identity() {
        for z in [-5.0, -1.0, 0.0, 0.5, 8.0] {
            assert_eq!(next_price(42.0_f64, 0.05, 0.3, 0.0, z), 42.0);
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic_growth() {
        let dt = 0.25;
        let s = next_price(100.0_f64, 0.04, 0.0, dt, 123.0);
        assert_relative_eq!(s, 100.0 * (0.04_f64 * dt).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_known_value() {
        // S=100, mu=0.05, sigma=0.2, dt=1, z=1
        // exponent = (0.05 - 0.02) + 0.2 = 0.23
        let s = next_price(100.0_f64, 0.05, 0.2, 1.0, 1.0);
        assert_relative_eq!(s, 100.0 * 0.23_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_step_matches_free_function() {
        let step = GbmStep::new(0.03_f64, 0.25, 1.0 / 252.0);
        for z in [-2.0, -0.1, 0.0, 0.7, 3.1] {
            assert_eq!(
                step.advance(80.0, z),
                next_price(80.0, 0.03, 0.25, 1.0 / 252.0, z)
            );
        }
    }

    #[test]
    fn test_coefficients() {
        let step = GbmStep::new(0.05_f64, 0.2, 0.04);
        assert_relative_eq!(step.drift_dt(), (0.05 - 0.02) * 0.04, epsilon = 1e-15);
        assert_relative_eq!(step.vol_sqrt_dt(), 0.2 * 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_ito_correction_present_for_f32_and_f64() {
        // Zero drift leaves only -sigma^2/2 * dt
        let step64 = GbmStep::new(0.0_f64, 0.4, 0.5);
        assert_relative_eq!(step64.drift_dt(), -0.04, epsilon = 1e-15);

        let step32 = GbmStep::new(0.0_f32, 0.4, 0.5);
        assert_relative_eq!(step32.drift_dt(), -0.04_f32, epsilon = 1e-7);
    }

    #[test]
    fn test_symmetric_shocks_are_log_symmetric_about_drift() {
        let step = GbmStep::new(0.05_f64, 0.2, 0.1);
        let up = step.advance(100.0, 1.5);
        let down = step.advance(100.0, -1.5);
        let mid = step.advance(100.0, 0.0);
        assert_relative_eq!((up * down).sqrt(), mid, epsilon = 1e-10);
    }

    #[test]
    fn test_f32_compatibility() {
        let s = next_price(100.0_f32, 0.05, 0.2, 0.01, 0.5);
        assert!(s > 0.0 && s.is_finite());
    }

    proptest! {
        #[test]
        fn prop_zero_dt_identity(
            s in 0.01f64..1e6,
            mu in -0.5f64..0.5,
            sigma in 0.0f64..2.0,
            z in -10.0f64..10.0,
        ) {
            prop_assert_eq!(next_price(s, mu, sigma, 0.0, z), s);
        }

        #[test]
        fn prop_price_stays_positive(
            s in 0.01f64..1e4,
            mu in -0.5f64..0.5,
            sigma in 0.0f64..1.5,
            dt in 1e-4f64..1.0,
            z in -8.0f64..8.0,
        ) {
            let next = next_price(s, mu, sigma, dt, z);
            prop_assert!(next > 0.0);
            prop_assert!(next.is_finite());
        }
    }
}
