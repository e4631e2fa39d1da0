//! # Money Module
//!
//! Provides the `Amount` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                        │
//! │                                                                     │
//! │  A cash drawer that is "0.00000000000004 FCFA short" is not a       │
//! │  reconciliation result anyone can act on.                           │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Francs                                       │
//! │    The CFA franc has no subdivision, so the minor unit IS the       │
//! │    unit. Every amount in the system is a whole i64 of francs.       │
//! │    Rounding happens exactly once, at the user-input boundary.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caisse_core::money::Amount;
//!
//! // Create from whole francs (preferred)
//! let price = Amount::from_fcfa(1_500);
//!
//! // Arithmetic operations
//! let line_total = price.multiply_quantity(2); // 3 000 FCFA
//! let total = line_total + Amount::from_fcfa(5_000);
//!
//! // NEVER do this:
//! // let bad = Amount::from_float(1500.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Amount Type
// =============================================================================

/// Represents a monetary value in whole CFA francs.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for balance differences
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the engine flows through this type: opening
/// balances, revenue line totals, expense amounts, theoretical balances
/// and their signed variance against the physically counted drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an Amount from whole francs.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Amount;
    ///
    /// let opening = Amount::from_fcfa(5_000);
    /// assert_eq!(opening.fcfa(), 5_000);
    /// ```
    #[inline]
    pub const fn from_fcfa(fcfa: i64) -> Self {
        Amount(fcfa)
    }

    /// Returns the value in whole francs.
    #[inline]
    pub const fn fcfa(&self) -> i64 {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Amount;
    ///
    /// let shortage = Amount::from_fcfa(-800);
    /// assert_eq!(shortage.abs().fcfa(), 800);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Amount(self.0.abs())
    }

    /// Multiplies an amount by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Amount;
    ///
    /// let unit = Amount::from_fcfa(1_500);
    /// assert_eq!(unit.multiply_quantity(2).fcfa(), 3_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Amount(self.0 * qty)
    }

    /// Parses a user-entered amount string into whole francs.
    ///
    /// ## Canonical Rounding Rule
    /// User input may carry decimals ("1500.5") even though the franc has
    /// no subdivision. The value is rounded **half-up** (away from zero)
    /// exactly once, here, at the input boundary. Downstream arithmetic is
    /// integer-only and never re-rounds.
    ///
    /// ## Accepted Formats
    /// - Optional leading sign
    /// - Spaces as thousands separators ("12 500")
    /// - `.` or `,` as the decimal separator ("1500,5")
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Amount;
    ///
    /// assert_eq!(Amount::parse_user_input("1500").unwrap().fcfa(), 1_500);
    /// assert_eq!(Amount::parse_user_input("1500.5").unwrap().fcfa(), 1_501);
    /// assert_eq!(Amount::parse_user_input("1500.49").unwrap().fcfa(), 1_500);
    /// assert_eq!(Amount::parse_user_input("12 500").unwrap().fcfa(), 12_500);
    /// assert!(Amount::parse_user_input("abc").is_err());
    /// ```
    pub fn parse_user_input(input: &str) -> Result<Self, ValidationError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "must be a number".to_string(),
        };

        if cleaned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut value: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };

        // Half-up on the magnitude: the first fractional digit decides.
        if let Some(first) = frac_part.chars().next() {
            if first.to_digit(10).unwrap_or(0) >= 5 {
                value += 1;
            }
        }

        Ok(Amount(if negative { -value } else { value }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows amounts in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FCFA", self.0)
    }
}

/// Default amount is zero.
impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

/// Addition of two Amount values.
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Amount values.
impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Amount {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Amount(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fcfa() {
        let amount = Amount::from_fcfa(5_000);
        assert_eq!(amount.fcfa(), 5_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Amount::from_fcfa(1_500)), "1500 FCFA");
        assert_eq!(format!("{}", Amount::from_fcfa(-800)), "-800 FCFA");
        assert_eq!(format!("{}", Amount::from_fcfa(0)), "0 FCFA");
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::from_fcfa(5_000);
        let b = Amount::from_fcfa(1_200);

        assert_eq!((a + b).fcfa(), 6_200);
        assert_eq!((a - b).fcfa(), 3_800);
        assert_eq!((b * 3).fcfa(), 3_600);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Amount::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Amount::from_fcfa(100).is_positive());
        assert!(Amount::from_fcfa(-100).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Amount::from_fcfa(1_500);
        assert_eq!(unit.multiply_quantity(2).fcfa(), 3_000);
        assert_eq!(unit.multiply_quantity(1).fcfa(), 1_500);
    }

    #[test]
    fn test_parse_whole_numbers() {
        assert_eq!(Amount::parse_user_input("1500").unwrap().fcfa(), 1_500);
        assert_eq!(Amount::parse_user_input("  250 ").unwrap().fcfa(), 250);
        assert_eq!(Amount::parse_user_input("0").unwrap().fcfa(), 0);
    }

    #[test]
    fn test_parse_rounds_half_up_once() {
        assert_eq!(Amount::parse_user_input("1500.5").unwrap().fcfa(), 1_501);
        assert_eq!(Amount::parse_user_input("1500.49").unwrap().fcfa(), 1_500);
        assert_eq!(Amount::parse_user_input("1500.50").unwrap().fcfa(), 1_501);
        assert_eq!(Amount::parse_user_input("0.5").unwrap().fcfa(), 1);
        // Half-up is applied to the magnitude for negative input
        assert_eq!(Amount::parse_user_input("-10.5").unwrap().fcfa(), -11);
    }

    #[test]
    fn test_parse_locale_separators() {
        assert_eq!(Amount::parse_user_input("12 500").unwrap().fcfa(), 12_500);
        assert_eq!(Amount::parse_user_input("1500,5").unwrap().fcfa(), 1_501);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Amount::parse_user_input("").is_err());
        assert!(Amount::parse_user_input("abc").is_err());
        assert!(Amount::parse_user_input("12.3.4").is_err());
        assert!(Amount::parse_user_input("-").is_err());
    }
}
