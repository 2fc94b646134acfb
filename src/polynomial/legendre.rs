//! Legendre polynomial evaluation.
//!
//! Legendre polynomials P_n(x) are orthogonal on [-1, 1] with weight 1:
//! ∫_{-1}^{1} P_m(x) P_n(x) dx = 2/(2n+1) δ_{mn}

/// Run the three-term recurrence and return (P_n(x), P_{n-1}(x)).
///
/// For n = 0 the second value is 0.
fn recurrence(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    (p_curr, p_prev)
}

/// Evaluate P_n(x).
///
/// (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)
pub fn legendre(n: usize, x: f64) -> f64 {
    recurrence(n, x).0
}

/// Evaluate P_n(x) scaled to unit L2 norm on [-1, 1]: √((2n+1)/2) P_n(x).
#[inline]
pub fn legendre_normalized(n: usize, x: f64) -> f64 {
    ((2 * n + 1) as f64 / 2.0).sqrt() * legendre(n, x)
}

/// Evaluate P_n(x) and P'_n(x) with a single recurrence pass.
///
/// At the endpoints the derivative uses P'_n(±1) = (±1)^{n+1} n(n+1)/2.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let (p_n, p_nm1) = recurrence(n, x);
    let edge = (n * (n + 1)) as f64 / 2.0;

    let dp_n = if (x - 1.0).abs() < 1e-14 {
        edge
    } else if (x + 1.0).abs() < 1e-14 {
        if n % 2 == 0 { -edge } else { edge }
    } else {
        n as f64 * (x * p_n - p_nm1) / (x * x - 1.0)
    };

    (p_n, dp_n)
}
