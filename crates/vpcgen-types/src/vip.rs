//! Virtual IP address type.

use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

static VIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})/32$")
        .expect("Invalid regex pattern")
});

/// An IPv4 host address in `A.B.C.D/32` form.
///
/// The `/32` mask is mandatory; any other prefix length is rejected.
/// Octets may carry leading zeros on input and are normalised on output.
///
/// # Examples
///
/// ```
/// use vpcgen_types::VipAddress;
///
/// let vip: VipAddress = "10.0.0.1/32".parse().unwrap();
/// assert_eq!(vip.to_string(), "10.0.0.1/32");
///
/// assert!("10.0.0.1/24".parse::<VipAddress>().is_err());
/// assert!("256.0.0.1/32".parse::<VipAddress>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VipAddress(Ipv4Addr);

impl VipAddress {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        VipAddress(Ipv4Addr::new(a, b, c, d))
    }

    pub const fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

/// Renders dotted decimal without leading zeros: `010.0.0.1/32` prints as
/// `10.0.0.1/32`.
impl fmt::Display for VipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/32", self.0)
    }
}

impl FromStr for VipAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidAddress(s.to_string());
        let caps = VIP_RE.captures(s).ok_or_else(invalid)?;

        let mut octets = [0u8; 4];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = caps[i + 1].parse().map_err(|_| invalid())?;
        }
        Ok(VipAddress(Ipv4Addr::from(octets)))
    }
}

impl From<VipAddress> for Ipv4Addr {
    fn from(vip: VipAddress) -> Self {
        vip.0
    }
}
