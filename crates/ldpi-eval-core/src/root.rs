//! Bracketed scalar root finding (Brent's method).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Tolerances for [`brentq`].
///
/// Convergence is declared once the bracket half-width drops below
/// `(xtol + rtol * |x|) / 2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the root.
    pub xtol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
    /// Iteration budget before giving up.
    pub max_iter: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// Find a root of `f` in `[a, b]` with Brent's method.
///
/// `f(a)` and `f(b)` must have opposite signs (or one of them must be zero).
/// Otherwise, or if either endpoint evaluates to NaN, this fails with
/// [`DomainError::RootNotBracketed`] carrying both endpoint values. Each step
/// takes an inverse-quadratic or secant step when it stays well inside the
/// bracket and falls back to bisection otherwise, so the bracket always
/// shrinks and discontinuous sign changes are still located.
pub fn brentq<F>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if fpre.is_nan() || fcur.is_nan() || fpre * fcur > 0.0 {
        return Err(DomainError::RootNotBracketed {
            g_lo: fpre,
            g_hi: fcur,
        }
        .into());
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..config.max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        // Keep the best estimate in `xcur`.
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.xtol + config.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);
    }

    Err(DomainError::RootNotConverged {
        iterations: config.max_iter,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    fn step_at(edge: f64) -> impl Fn(f64) -> f64 {
        move |x| if x < edge { 1.0 } else { -1.0 }
    }

    #[test]
    fn test_finds_sqrt_two() {
        let root = brentq(|x| x * x - 2.0, 0.0, 2.0, &SolverConfig::default()).unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-11);
    }

    #[test]
    fn test_linear_root() {
        let root = brentq(|x| 1.0 - x - 0.5 * x, 0.0, 1.0, &SolverConfig::default()).unwrap();
        assert!((root - 2.0 / 3.0).abs() < 1e-11);
    }

    #[test]
    fn test_endpoint_root_returned_directly() {
        let root = brentq(|x| x, 0.0, 1.0, &SolverConfig::default()).unwrap();
        assert_eq!(root, 0.0);
    }

    #[test]
    fn test_step_discontinuity_is_located() {
        let root = brentq(step_at(0.3), 0.0, 1.0, &SolverConfig::default()).unwrap();
        assert!((root - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_same_sign_is_not_bracketed() {
        let err = brentq(|x| x + 1.0, 0.0, 1.0, &SolverConfig::default()).unwrap_err();
        match err {
            EvalError::Domain(DomainError::RootNotBracketed { g_lo, g_hi }) => {
                assert_eq!(g_lo, 1.0);
                assert_eq!(g_hi, 2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nan_endpoint_is_not_bracketed() {
        let err = brentq(|_| f64::NAN, 0.0, 1.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Domain(DomainError::RootNotBracketed { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let config = SolverConfig {
            xtol: 0.0,
            rtol: 0.0,
            max_iter: 3,
        };
        let err = brentq(step_at(0.3), 0.0, 1.0, &config).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Domain(DomainError::RootNotConverged { iterations: 3 })
        ));
    }
}
