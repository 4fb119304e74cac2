//! BGP autonomous system number.

use crate::{is_decimal, ParseError};
use std::fmt;
use std::str::FromStr;

/// A 4-byte BGP autonomous system number (1-4294967295).
///
/// ASN 0 is reserved and rejected.
///
/// # Examples
///
/// ```
/// use vpcgen_types::Asn;
///
/// let asn: Asn = "65001".parse().unwrap();
/// assert_eq!(asn.as_u32(), 65001);
///
/// assert!("0".parse::<Asn>().is_err());
/// assert!("4294967296".parse::<Asn>().is_err());
/// assert!("+65001".parse::<Asn>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Asn(u32);

impl Asn {
    /// Private-use ASN used when none is given on the command line.
    pub const DEFAULT: Asn = Asn(64999);

    /// Creates an ASN, rejecting the reserved value 0.
    pub fn new(asn: u32) -> Result<Self, ParseError> {
        if asn == 0 {
            Err(ParseError::InvalidAsn(asn.to_string()))
        } else {
            Ok(Asn(asn))
        }
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for Asn {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Asn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_decimal(s) {
            return Err(ParseError::InvalidAsn(s.to_string()));
        }
        match s.parse::<u32>() {
            Ok(asn) if asn != 0 => Ok(Asn(asn)),
            _ => Err(ParseError::InvalidAsn(s.to_string())),
        }
    }
}
