use super::Status;
use crate::SolverOptions;

const MAX_EVALUATIONS: usize = 500;
const XTOL: f64 = 1e-5;

/// Result of a bounded minimization.
#[derive(Debug, Clone, Copy)]
pub struct Minimum {
    /// Best estimate of the location of the minimum.
    pub x: f64,
    /// Function value at `x`.
    pub fun: f64,
    /// Number of function evaluations.
    pub evaluations: usize,
    pub status: Status,
}

/// Find a local minimum of `f` within `bracket`.
///
/// Golden section steps are combined with parabolic interpolation. The
/// minimum is located up to an absolute tolerance `tol` (default `1e-5`);
/// the number of function evaluations is limited by `max_iter`
/// (default 500). Neither end of the bracket is ever evaluated.
pub fn bounded_minimum<F: FnMut(f64) -> f64>(
    mut f: F,
    bracket: [f64; 2],
    options: SolverOptions,
) -> Minimum {
    let (max_evaluations, xatol, _) = options.unwrap_or(MAX_EVALUATIONS, XTOL);
    let sqrt_eps = f64::EPSILON.sqrt();
    let golden_mean = 0.5 * (3.0 - 5f64.sqrt());

    let [mut a, mut b] = bracket;
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    // xf: best point, nfc: second best, fulc: previous second best
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut fx = f(xf);
    let (mut ffulc, mut fnfc) = (fx, fx);
    let mut evaluations = 1;
    let (mut rat, mut e) = (0.0f64, 0.0f64);

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
    let mut tol2 = 2.0 * tol1;
    let mut status = Status::Converged;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        if e.abs() > tol1 {
            golden = false;
            let r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                // parabolic step
                rat = p / q;
                let x = xf + rat;
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = if xm >= xf { tol1 } else { -tol1 };
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let step = if rat >= 0.0 { 1.0 } else { -1.0 } * rat.abs().max(tol1);
        let x = xf + step;
        let fu = f(x);
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
        tol2 = 2.0 * tol1;

        if evaluations >= max_evaluations {
            status = Status::MaxIterations;
            break;
        }
    }

    Minimum {
        x: xf,
        fun: fx,
        evaluations,
        status,
    }
}
