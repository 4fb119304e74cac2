//! Interface and subnet name types.

use crate::{ParseError, VlanTag};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Linux IFNAMSIZ (16) minus the trailing NUL.
static INTERFACE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,15}$").expect("Invalid regex pattern"));

static SUBNET_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid regex pattern"));

/// A Linux network device name (e.g. "eth0", "bond1").
///
/// # Examples
///
/// ```
/// use vpcgen_types::{InterfaceName, VlanTag};
///
/// let eth0: InterfaceName = "eth0".parse().unwrap();
/// assert_eq!(eth0.with_vlan(VlanTag::new(10).unwrap()), "eth0.10");
/// assert_eq!(eth0.with_vlan(VlanTag::UNTAGGED), "eth0");
///
/// assert!("eth0.10".parse::<InterfaceName>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceName(String);

impl InterfaceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the device name used for this interface on the given VLAN.
    ///
    /// Untagged attachments use the interface itself; tagged ones use the
    /// `<iface>.<vlan>` sub-interface.
    pub fn with_vlan(&self, vlan: VlanTag) -> String {
        if vlan.is_tagged() {
            format!("{}.{}", self.0, vlan)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InterfaceName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if INTERFACE_NAME_RE.is_match(s) {
            Ok(InterfaceName(s.to_string()))
        } else {
            Err(ParseError::InvalidInterfaceName(s.to_string()))
        }
    }
}

/// Name of a VPC subnet.
///
/// The same string names the route-map and prefix-list generated for the
/// subnet, so it is limited to characters the BGP daemon accepts unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetName(String);

impl SubnetName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubnetName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if SUBNET_NAME_RE.is_match(s) {
            Ok(SubnetName(s.to_string()))
        } else {
            Err(ParseError::InvalidSubnetName(s.to_string()))
        }
    }
}
