//! Root finding for calculating payment amounts over a loan term

use log::trace;
use serde::{Deserialize, Serialize};

/// Default iteration budget for bisection
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Outcome of a root search
///
/// `converged == false` is a normal outcome; `value` then holds the best estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Root {
    /// The root (or the last midpoint when not converged)
    pub value: f64,
    /// Iterations consumed before stopping
    pub iterations: u32,
    pub converged: bool,
    /// Tolerance used for both the interval half-width and `|f(c)|`
    pub tol: f64,
}

fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

/// Bisection root finding over the bracket `[a, b]`
///
/// The bracket is not checked for a sign change up front. Each step keeps the
/// half whose endpoint disagrees in sign with `f(c)`, so a bracket without a
/// root still reports `converged` once the interval collapses, at a point that
/// is not a root.
///
/// # Arguments
/// * `f` - Objective function
/// * `a` - Left of the initial search interval
/// * `b` - Right of the initial search interval
/// * `tol` - Maximum half-width of the interval or value of `|f((a + b) / 2)|`
/// * `max_iterations` - Iterations allowed without convergence
pub fn bisect<F>(f: F, mut a: f64, mut b: f64, tol: f64, max_iterations: u32) -> Root
where
    F: Fn(f64) -> f64,
{
    let mut iteration = 0;
    while iteration < max_iterations {
        let c = (a + b) / 2.0;
        if (b - a) / 2.0 < tol {
            return Root { value: c, iterations: iteration, converged: true, tol };
        }

        let fc = f(c);
        trace!("bisect iteration {}: [{}, {}] f({}) = {}", iteration, a, b, c, fc);
        if fc.abs() < tol {
            return Root { value: c, iterations: iteration, converged: true, tol };
        }

        if same_sign(f(a), fc) {
            a = c;
        } else {
            b = c;
        }

        iteration += 1;
    }

    Root {
        value: (a + b) / 2.0,
        iterations: iteration,
        converged: false,
        tol,
    }
}
