//! Cubic-spline gravitational softening.
//!
//! A softened point mass is a cubic-spline mass distribution with compact
//! support radius `h`. Outside `h` it is indistinguishable from a Newtonian
//! point mass; inside it the potential and force stay finite down to `r = 0`.
//!
//! All functions return per-unit-mass factors with `G = 1`:
//! the acceleration from a source of mass `m` at separation vector `dx`
//! (target minus source) is `-m * invr3 * dx` and its potential is `-m * invr`.

/// Combines target and source softening lengths into the one used for the pair.
///
/// The rule is symmetric, so swapping the roles of two particles gives the same
/// softening and pairwise forces stay exactly antisymmetric.
///
/// # Examples
///
/// ```
/// use rs_treegrav::kernels::effective_softening;
///
/// assert_eq!(effective_softening(0.1, 0.3), 0.3);
/// assert_eq!(effective_softening(0.3, 0.1), 0.3);
/// assert_eq!(effective_softening(0.0, 0.0), 0.0);
/// ```
#[inline]
pub fn effective_softening(h_target: f64, h_source: f64) -> f64 {
    h_target.max(h_source)
}

/// Returns the softened `1/r^3` factor (enclosed mass fraction over `r^3`).
///
/// With `h == 0` this is the Newtonian `1/r^3`, which is infinite at `r == 0`;
/// callers never evaluate that pair.
#[inline]
pub fn force_kernel(r: f64, h: f64) -> f64 {
    if r >= h {
        return 1.0 / (r * r * r);
    }
    let hinv = 1.0 / h;
    let hinv3 = hinv * hinv * hinv;
    let q = r * hinv;
    if q <= 0.5 {
        (32.0 / 3.0 + q * q * (-38.4 + 32.0 * q)) * hinv3
    } else {
        (64.0 / 3.0 - 48.0 * q + 38.4 * q * q - 32.0 / 3.0 * q * q * q
            - 1.0 / (15.0 * q * q * q))
            * hinv3
    }
}

/// Returns the softened `1/r` factor, i.e. minus the potential of a unit mass.
#[inline]
pub fn potential_kernel(r: f64, h: f64) -> f64 {
    if r >= h {
        return 1.0 / r;
    }
    let hinv = 1.0 / h;
    let q = r * hinv;
    if q <= 0.5 {
        -(-2.8 + q * q * (16.0 / 3.0 + q * q * (6.4 * q - 9.6))) * hinv
    } else {
        -(-3.2 + 1.0 / (15.0 * q)
            + q * q * (32.0 / 3.0 + q * (-16.0 + q * (9.6 - 32.0 / 15.0 * q))))
            * hinv
    }
}

/// Returns `(invr, invr3)` for separation `r` and softening `h`.
///
/// # Examples
///
/// ```
/// use rs_treegrav::kernels::softened_inverse;
///
/// // Unsoftened: exact Newtonian factors.
/// let (invr, invr3) = softened_inverse(2.0, 0.0);
/// assert_eq!(invr, 0.5);
/// assert_eq!(invr3, 0.125);
///
/// // Inside the softening length everything stays finite, even at r = 0.
/// let (invr, invr3) = softened_inverse(0.0, 1.0);
/// assert!((invr - 2.8).abs() < 1e-12);
/// assert!((invr3 - 32.0 / 3.0).abs() < 1e-12);
/// ```
#[inline]
pub fn softened_inverse(r: f64, h: f64) -> (f64, f64) {
    (potential_kernel(r, h), force_kernel(r, h))
}
