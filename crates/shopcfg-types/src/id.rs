//! Shop identifier.
//!
//! A shop is addressed by a positive integer. The same number names the
//! shop's base document (`shops/<id>.yaml`) and its optional environment
//! document (`environment/<id>.yaml`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Identifier for one shop.
///
/// Zero is not a valid shop id, so the inner value is a [`NonZeroU32`].
///
/// # Example
///
/// ```
/// use shopcfg_types::ShopId;
///
/// let id = ShopId::new(1).expect("1 is a valid shop id");
/// assert_eq!(id.get(), 1);
/// assert_eq!(id.to_string(), "1");
/// assert!(ShopId::new(0).is_none());
///
/// let parsed: ShopId = "42".parse().expect("should parse");
/// assert_eq!(parsed.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(NonZeroU32);

impl ShopId {
    /// Creates a shop id, returning `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU32> for ShopId {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl TryFrom<u32> for ShopId {
    type Error = ParseShopIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ParseShopIdError::new(value.to_string()))
    }
}

impl FromStr for ShopId {
    type Err = ParseShopIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NonZeroU32>()
            .map(Self)
            .map_err(|_| ParseShopIdError::new(s))
    }
}

/// Input was not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid shop id '{input}': expected a positive integer")]
pub struct ParseShopIdError {
    input: String,
}

impl ParseShopIdError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
