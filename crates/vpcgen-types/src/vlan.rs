//! VLAN tag type with validation.

use crate::{is_decimal, ParseError};
use std::fmt;
use std::str::FromStr;

/// 802.1Q VLAN tag as written on the command line (0-4095).
///
/// Tag 0 means the subnet is attached untagged, directly on the parent
/// interface. Any other tag selects a `<iface>.<tag>` sub-interface.
///
/// # Examples
///
/// ```
/// use vpcgen_types::VlanTag;
///
/// let tag: VlanTag = "100".parse().unwrap();
/// assert!(tag.is_tagged());
///
/// assert!(!VlanTag::UNTAGGED.is_tagged());
/// assert!("4096".parse::<VlanTag>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VlanTag(u16);

impl VlanTag {
    /// Largest accepted tag.
    pub const MAX: u16 = 4095;

    /// Untagged attachment.
    pub const UNTAGGED: VlanTag = VlanTag(0);

    /// Creates a VLAN tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is above 4095.
    pub fn new(tag: u16) -> Result<Self, ParseError> {
        if tag <= Self::MAX {
            Ok(VlanTag(tag))
        } else {
            Err(ParseError::InvalidVlan(tag.to_string()))
        }
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this tag selects a VLAN sub-interface.
    pub const fn is_tagged(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for VlanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_decimal(s) {
            return Err(ParseError::InvalidVlan(s.to_string()));
        }
        match s.parse::<u16>() {
            Ok(tag) if tag <= Self::MAX => Ok(VlanTag(tag)),
            _ => Err(ParseError::InvalidVlan(s.to_string())),
        }
    }
}
