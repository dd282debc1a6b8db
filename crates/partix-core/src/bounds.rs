//! Bounded integer range parser
//!
//! Accepted forms, with `max` the implicit upper bound:
//!
//! ```text
//! N      -> [N, N]
//! *      -> [1, max]
//! *N     -> [1, N]
//! N*     -> [N, max]
//! M*N    -> [M, N]
//! ```

use crate::{Error, Result};

/// Upper bound used for identifier and molecule ranges
pub const BIG: i64 = i32::MAX as i64;

/// Parse a range string into an inclusive `(lo, hi)` pair within `[1, max]`
pub fn parse_bounds(spec: &str, max: i64) -> Result<(i64, i64)> {
    let spec = spec.trim();
    let (lo, hi) = match spec.split_once('*') {
        None => {
            let n = parse_index(spec)?;
            (n, n)
        }
        Some(("", "")) => (1, max),
        Some(("", hi)) => (1, parse_index(hi)?),
        Some((lo, "")) => (parse_index(lo)?, max),
        Some((lo, hi)) => (parse_index(lo)?, parse_index(hi)?),
    };

    if lo < 1 || hi > max || lo > hi {
        return Err(Error::OutOfBounds {
            spec: spec.to_string(),
            max,
        });
    }
    Ok((lo, hi))
}

fn parse_index(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| Error::InvalidRange(s.to_string()))
}
