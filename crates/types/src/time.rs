//! Logical simulation time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point on the simulation's logical clock.
///
/// Time is a non-negative scalar that only advances when the runner pops an
/// event. It has nothing to do with wall-clock time.
///
/// Equality and ordering use [`f64::total_cmp`] so `SimTime` can key an
/// ordered map.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    /// The start of every simulation.
    pub const ZERO: SimTime = SimTime(0.0);

    /// Create a time from a raw scalar.
    #[inline]
    pub fn new(at: f64) -> Self {
        SimTime(at)
    }

    /// Return the raw scalar.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The time `delta` units after `self`.
    #[inline]
    pub fn after(self, delta: f64) -> SimTime {
        SimTime(self.0 + delta)
    }

    /// Elapsed time from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for SimTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Formats with three decimal places, as used in the event trace.
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ThreeDecimals(self.0), f)
    }
}

/// Displays a value with exactly three decimal places, rounding half up.
///
/// Rounding works on the shortest decimal form of the value, so `0.0625`
/// prints as `0.063` and `2.0005` as `2.001`. `{:.3}` would round these
/// to even on the exact binary value instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeDecimals(pub f64);

impl fmt::Display for ThreeDecimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if !value.is_finite() {
            return write!(f, "{:.3}", value);
        }

        // `Display` for f64 never uses exponent notation.
        let shortest = value.abs().to_string();
        let (whole, fraction) = shortest.split_once('.').unwrap_or((&shortest, ""));
        let mut digits: Vec<u8> = whole
            .bytes()
            .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(3))
            .collect();

        if fraction.as_bytes().get(3).is_some_and(|&d| d >= b'5') {
            let mut carry = true;
            for digit in digits.iter_mut().rev() {
                if *digit == b'9' {
                    *digit = b'0';
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, b'1');
            }
        }

        let split = digits.len() - 3;
        let whole: String = digits[..split].iter().map(|&d| d as char).collect();
        let fraction: String = digits[split..].iter().map(|&d| d as char).collect();
        let sign = if value < 0.0 { "-" } else { "" };
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}
