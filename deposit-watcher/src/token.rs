// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Tokens being watched and conversion of their amounts.

use std::fmt;

use watcher_core::TailId;

use crate::Error;

/// A token type to watch deposits of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Ticker shown in notifications, e.g. `wUSDC.b`
    pub symbol: String,
    /// Human readable name
    pub name: String,
    /// Identifier of the token on the ledger
    pub tail: TailId,
    /// Base units per display unit
    pub scale: u64,
}

impl Token {
    /// Create a new token.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the tail is malformed or the scale
    /// is not a power of ten.
    pub fn new<S: Into<String>>(
        symbol: S,
        name: S,
        tail: &str,
        scale: u64,
    ) -> Result<Self, Error> {
        let symbol = symbol.into();
        let decimal = scale
            .checked_ilog10()
            .is_some_and(|digits| 10u64.pow(digits) == scale);
        if !decimal {
            return Err(Error::Configuration(format!(
                "token {symbol} scale {scale} is not a power of ten"
            )));
        }
        let tail = tail.parse::<TailId>().map_err(|e| {
            Error::Configuration(format!("token {symbol}: {e}"))
        })?;

        Ok(Self {
            symbol,
            name: name.into(),
            tail,
            scale,
        })
    }

    /// Amount in display units
    #[must_use]
    pub fn display_amount(&self, amount: u64) -> DisplayAmount {
        DisplayAmount {
            amount,
            scale: self.scale,
        }
    }
}

/// An amount of base units divided by a token scale.
///
/// Formatting is exact: the integer part is followed by the remainder
/// padded to the scale's number of digits, without trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAmount {
    amount: u64,
    scale: u64,
}

impl DisplayAmount {
    /// The whole display units, rounded down.
    #[must_use]
    pub fn whole(&self) -> u64 {
        self.amount / self.scale
    }

    /// Approximate value as a float, for thresholds and serialization.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.amount as f64 / self.scale as f64
    }
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.amount / self.scale;
        let fraction = self.amount % self.scale;

        write!(f, "{whole}")?;
        if fraction == 0 {
            return Ok(());
        }

        // scale is a power of ten
        let width = self.scale.ilog10() as usize;
        let fraction = format!("{fraction:0width$}");
        write!(f, ".{}", fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAIL: &str =
        "fa4a180ac326e67ea289b869e3448256f6af05721f7cf934cb9901baa6b7a99d";

    fn token(scale: u64) -> Token {
        Token::new("wUSDC.b", "Base warp.green USDC", TAIL, scale).unwrap()
    }

    #[test]
    fn display_amounts() {
        let t = token(1000);
        assert_eq!(t.display_amount(0).to_string(), "0");
        assert_eq!(t.display_amount(1).to_string(), "0.001");
        assert_eq!(t.display_amount(1500).to_string(), "1.5");
        assert_eq!(t.display_amount(123_456).to_string(), "123.456");
        assert_eq!(t.display_amount(5_000_000).to_string(), "5000");
        assert_eq!(t.display_amount(1500).whole(), 1);
        assert!((t.display_amount(1500).as_f64() - 1.5).abs() < f64::EPSILON);

        let xch = token(1_000_000_000_000);
        assert_eq!(xch.display_amount(1).to_string(), "0.000000000001");

        let unit = token(1);
        assert_eq!(unit.display_amount(42).to_string(), "42");
    }

    #[test]
    fn invalid_tokens() {
        assert!(matches!(
            Token::new("A", "A", TAIL, 0),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Token::new("A", "A", &TAIL[2..], 1000),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn scale_must_be_a_power_of_ten() {
        for scale in [3, 12, 999, 1024, 1001, u64::MAX] {
            assert!(
                matches!(
                    Token::new("A", "A", TAIL, scale),
                    Err(Error::Configuration(_))
                ),
                "scale {scale} was accepted"
            );
        }

        for scale in [1, 10, 1000, 10_000_000_000_000_000_000] {
            assert!(Token::new("A", "A", TAIL, scale).is_ok());
        }
        assert_eq!(token(10).display_amount(15).to_string(), "1.5");
    }
}
