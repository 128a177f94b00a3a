use crate::errors::{DensityError, DensityResult};
use crate::SolverOptions;

const MAX_ITER: usize = 100;
const XTOL: f64 = 2e-12;
const RTOL: f64 = 4.0 * f64::EPSILON;

/// Find a root of `f` within `bracket` using Brent's method.
///
/// The function values at both ends of the bracket must differ in sign,
/// otherwise [DensityError::NoSignChange] is returned. The iteration stops
/// once the bracket is smaller than `tol + 4ε|x|`, where `tol` defaults
/// to `2e-12`.
pub fn brent_root<F: FnMut(f64) -> f64>(
    mut f: F,
    bracket: [f64; 2],
    options: SolverOptions,
) -> DensityResult<f64> {
    let (max_iter, xtol, _) = options.unwrap_or(MAX_ITER, XTOL);
    let [mut xpre, mut xcur] = bracket;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);
    if fpre.is_nan() || fcur.is_nan() {
        return Err(DensityError::IterationFailed(String::from("brent_root")));
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }
    if fpre.signum() == fcur.signum() {
        return Err(DensityError::NoSignChange {
            lower: bracket[0],
            upper: bracket[1],
        });
    }

    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0, 0.0);
    for _ in 0..max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;
            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = 0.5 * (xtol + RTOL * xcur.abs());
        let sbis = 0.5 * (xblk - xcur);
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
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
            xcur += delta.copysign(sbis);
        }
        fcur = f(xcur);
        if fcur.is_nan() {
            return Err(DensityError::IterationFailed(String::from("brent_root")));
        }
    }
    Err(DensityError::NotConverged(String::from("brent_root")))
}
