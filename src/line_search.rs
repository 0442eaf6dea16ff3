use crate::LineSearchError;

/// Relative tolerance for deciding a fitted quantity is indistinguishable
/// from zero at double precision.
const ROUNDOFF_EPS: f64 = 1e-14;

/// True if `a` and `b` agree to within floating-point roundoff.
///
/// The comparison is relative to the larger magnitude, with an absolute
/// floor of one so that values tiny on an absolute scale compare equal to
/// zero instead of being resolved meaninglessly.
pub(crate) fn equal_within_roundoff(a: f64, b: f64) -> bool {
    (a - b).abs() <= ROUNDOFF_EPS * libm::fmax(libm::fmax(a.abs(), b.abs()), 1.0)
}

fn square(x: f64) -> f64 {
    x * x
}

/// Residual samples available to one globalization attempt.
///
/// The merit function here is the scalar residual norm restricted to the
/// current Newton direction, so "residual at a step length" means the merit
/// value after moving that far along the direction. `residual` and
/// `residual_slope` are always the value and directional derivative at step
/// length zero; the slope must be negative for the direction to be a
/// descent direction, which is the caller's responsibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSamples {
    /// The first globalization attempt within the current outer step.
    /// Only one trial step has been evaluated so far.
    First {
        /// The trial step length, > 0.
        step_length: f64,
        /// Merit value at step length zero.
        residual: f64,
        /// Directional derivative of the merit function at step length zero.
        residual_slope: f64,
        /// Merit value at `step_length`.
        next_residual: f64,
    },
    /// Any later attempt: the two most recent trial steps are available,
    /// so a cubic can capture curvature a refitted quadratic would miss.
    Subsequent {
        /// The most recent trial step length, > 0.
        step_length: f64,
        /// The trial step length before that, > 0.
        prev_step_length: f64,
        /// Merit value at step length zero.
        residual: f64,
        /// Directional derivative of the merit function at step length zero.
        residual_slope: f64,
        /// Merit value at `step_length`.
        next_residual: f64,
        /// Merit value at `prev_step_length`.
        prev_residual: f64,
    },
}

/// Select the next trial step length for a globalized Newton step.
///
/// Fits a polynomial model of the merit function along the search direction
/// to the given samples and returns the step length at its minimum: a
/// quadratic on the first attempt, a cubic through the two most recent
/// trials afterwards.
///
/// Pure and stateless: one candidate per call, no internal retries. The
/// caller owns the history across calls and decides whether to accept the
/// candidate, re-invoke with a smaller bracket, or give up.
///
/// # Errors
///
/// [`LineSearchError::InvalidStepModel`] if the samples leave the model's
/// fitting denominator degenerate, and
/// [`LineSearchError::InvalidDescentDirection`] if the cubic's discriminant
/// is negative, which means the samples contradict `residual_slope < 0`.
/// Neither case ever leaks a NaN.
pub fn line_search(samples: &StepSamples) -> Result<f64, LineSearchError> {
    match *samples {
        StepSamples::First {
            step_length,
            residual,
            residual_slope,
            next_residual,
        } => {
            debug_assert!(step_length > 0.0, "trial step lengths must be positive");
            // Minimum of the quadratic through (0, residual) with the given
            // slope and through (step_length, next_residual). The denominator
            // is the curvature information the trial step contributed; it
            // vanishes when the sampled residual lies on the tangent line.
            let denominator = next_residual - residual - step_length * residual_slope;
            if equal_within_roundoff(denominator, 0.0) {
                return Err(LineSearchError::InvalidStepModel { denominator });
            }
            Ok(-0.5 * square(step_length) * residual_slope / denominator)
        }
        StepSamples::Subsequent {
            step_length,
            prev_step_length,
            residual,
            residual_slope,
            next_residual,
            prev_residual,
        } => {
            debug_assert!(
                step_length > 0.0 && prev_step_length > 0.0,
                "trial step lengths must be positive"
            );
            // Fit f(s) = r(s) - residual - s*slope with the two-parameter
            // cubic f(s) = a*s^3 + b*s^2 through both trial samples.
            let spread = step_length - prev_step_length;
            if equal_within_roundoff(step_length, prev_step_length) {
                return Err(LineSearchError::InvalidStepModel { denominator: spread });
            }
            let f1 = next_residual - residual - step_length * residual_slope;
            let f2 = prev_residual - residual - prev_step_length * residual_slope;
            let a = (f1 / square(step_length) - f2 / square(prev_step_length)) / spread;
            let b = (-f1 * prev_step_length / square(step_length)
                + f2 * step_length / square(prev_step_length))
                / spread;
            if equal_within_roundoff(a, 0.0) {
                // The cubic term dropped out, leaving a quadratic in the
                // fitted residual.
                if equal_within_roundoff(b, 0.0) {
                    return Err(LineSearchError::InvalidStepModel { denominator: b });
                }
                return Ok(-0.5 * residual_slope / b);
            }
            // Root of the cubic's derivative that is a local minimum.
            let discriminant = square(b) - 3.0 * a * residual_slope;
            if discriminant < 0.0 {
                return Err(LineSearchError::InvalidDescentDirection { discriminant });
            }
            Ok((libm::sqrt(discriminant) - b) / (3.0 * a))
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{StepSamples, equal_within_roundoff, line_search};
    use crate::LineSearchError;

    fn assert_nearly_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn quadratic_closed_form() {
        // -0.5*1*(-4)/(8-10-1*(-4)) = 2/2 = 1.
        let new_step = line_search(&StepSamples::First {
            step_length: 1.0,
            residual: 10.0,
            residual_slope: -4.0,
            next_residual: 8.0,
        })
        .unwrap();
        assert_nearly_eq(new_step, 1.0);
    }

    #[test]
    fn quadratic_backtracks_after_overshoot() {
        // The residual got worse at the full step, so the parabola's vertex
        // sits well inside the interval.
        let new_step = line_search(&StepSamples::First {
            step_length: 1.0,
            residual: 10.0,
            residual_slope: -4.0,
            next_residual: 20.0,
        })
        .unwrap();
        // -0.5*(-4)/(20-10+4) = 2/14
        assert_nearly_eq(new_step, 2.0 / 14.0);
        assert!(new_step > 0.0 && new_step < 1.0);
    }

    #[test]
    fn quadratic_degenerate_denominator_is_an_error() {
        // next_residual chosen so it lands exactly on the tangent line:
        // 10 + 1*(-4) = 6, making the denominator exactly zero.
        let result = line_search(&StepSamples::First {
            step_length: 1.0,
            residual: 10.0,
            residual_slope: -4.0,
            next_residual: 6.0,
        });
        assert_eq!(
            result,
            Err(LineSearchError::InvalidStepModel { denominator: 0.0 })
        );
    }

    #[test]
    fn cubic_degenerates_to_quadratic_when_a_vanishes() {
        // Samples taken from r(s) = 1 - s + 2*s^2 exactly, so the fitted
        // cubic coefficient a is zero and b is 2. The minimum of the
        // quadratic branch is -0.5*(-1)/2 = 0.25.
        let new_step = line_search(&StepSamples::Subsequent {
            step_length: 1.0,
            prev_step_length: 0.5,
            residual: 1.0,
            residual_slope: -1.0,
            next_residual: 2.0,
            prev_residual: 1.0,
        })
        .unwrap();
        assert_nearly_eq(new_step, 0.25);
    }

    #[test]
    fn cubic_general_minimum() {
        // Samples from r(s) = 1 - s + s^2 + s^3 exactly: a = 1, b = 1,
        // minimum of the derivative's positive root at
        // (sqrt(1 + 3) - 1)/3 = 1/3.
        let new_step = line_search(&StepSamples::Subsequent {
            step_length: 1.0,
            prev_step_length: 0.5,
            residual: 1.0,
            residual_slope: -1.0,
            next_residual: 2.0,
            prev_residual: 0.875,
        })
        .unwrap();
        assert_nearly_eq(new_step, 1.0 / 3.0);
    }

    #[test]
    fn cubic_negative_discriminant_is_an_error() {
        // Samples from f(s) = s^3 with a positive slope at zero (the caller
        // lied about having a descent direction). The fit gives a = 1,
        // b = 0, so the discriminant is -3.
        let result = line_search(&StepSamples::Subsequent {
            step_length: 1.0,
            prev_step_length: 0.5,
            residual: 0.0,
            residual_slope: 1.0,
            next_residual: 2.0,
            prev_residual: 0.625,
        });
        match result {
            Err(LineSearchError::InvalidDescentDirection { discriminant }) => {
                assert!(discriminant < 0.0);
            }
            other => panic!("expected InvalidDescentDirection, got {other:?}"),
        }
    }

    #[test]
    fn cubic_coincident_trial_steps_are_an_error() {
        let result = line_search(&StepSamples::Subsequent {
            step_length: 0.5,
            prev_step_length: 0.5,
            residual: 1.0,
            residual_slope: -1.0,
            next_residual: 2.0,
            prev_residual: 2.0,
        });
        assert!(matches!(
            result,
            Err(LineSearchError::InvalidStepModel { .. })
        ));
    }

    #[test]
    fn roundoff_equality() {
        assert!(equal_within_roundoff(0.0, 0.0));
        assert!(equal_within_roundoff(1.0, 1.0 + 1e-16));
        assert!(equal_within_roundoff(1e-20, 0.0));
        assert!(!equal_within_roundoff(1e-6, 0.0));
        assert!(!equal_within_roundoff(1.0, 2.0));
    }

    proptest! {
        /// With a descent slope and a residual that rose above the tangent
        /// line, the quadratic model is convex and its vertex is a positive
        /// step length. Never NaN on this domain.
        #[test]
        fn quadratic_vertex_is_positive_on_convex_samples(
            step_length in 0.01..10.0f64,
            residual in 0.1..100.0f64,
            slope in -50.0..-0.01f64,
            excess in 0.01..100.0f64,
        ) {
            // Place the sampled residual strictly above the tangent line.
            let next_residual = residual + step_length * slope + excess;
            let new_step = line_search(&StepSamples::First {
                step_length,
                residual,
                residual_slope: slope,
                next_residual,
            }).unwrap();
            prop_assert!(new_step.is_finite());
            prop_assert!(new_step > 0.0);
        }
    }
}
