//! Validated value types for the vpcgen pipeline.
//!
//! Every value that arrives on the command line is parsed into one of these
//! newtypes before it reaches the provisioner or the renderer:
//!
//! - [`Asn`]: BGP autonomous system number (1-4294967295)
//! - [`VlanTag`]: 802.1Q tag, where 0 means untagged (0-4095)
//! - [`InterfaceName`]: Linux network device name
//! - [`SubnetName`]: VPC subnet identifier, reused as route-map/prefix-list name
//! - [`VipAddress`]: IPv4 host address with a mandatory `/32` mask

mod asn;
mod iface;
mod vip;
mod vlan;

pub use asn::Asn;
pub use iface::{InterfaceName, SubnetName};
pub use vip::VipAddress;
pub use vlan::VlanTag;

/// Common error type for value parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid ASN: '{0}' (must be 1-4294967295)")]
    InvalidAsn(String),

    #[error("invalid VLAN: '{0}' (must be an integer 0-4095)")]
    InvalidVlan(String),

    #[error("invalid interface name: '{0}' (1-15 characters of A-Z, a-z, 0-9, '_', '-')")]
    InvalidInterfaceName(String),

    #[error("invalid subnet name: '{0}' (characters A-Z, a-z, 0-9, '_', '-')")]
    InvalidSubnetName(String),

    #[error("invalid address: '{0}' (expected A.B.C.D/32)")]
    InvalidAddress(String),
}

/// Returns true if `s` is a non-empty run of ASCII digits.
pub(crate) fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
