//! Common infrastructure for vpcgen.
//!
//! - [`shell`]: Shell command execution with proper quoting
//! - [`error`]: Error types for fatal failures outside the subnet spec parser
//! - [`defaults`]: Fixed values baked into every generated configuration
//!
//! # Example
//!
//! ```ignore
//! use vpcgen_common::{
//!     shell::{self, IP_CMD, shellquote},
//!     error::VpcgenResult,
//! };
//!
//! async fn link_exists(name: &str) -> VpcgenResult<bool> {
//!     let cmd = format!("{} link show dev {}", IP_CMD, shellquote(name));
//!     Ok(shell::exec(&cmd).await?.success())
//! }
//! ```

pub mod error;
pub mod shell;

// Re-export commonly used items at crate root
pub use error::{VpcgenError, VpcgenResult};

/// Fixed values used by the generator.
pub mod defaults {
    /// Default location of the generated BGP daemon configuration.
    pub const CONFIG_PATH: &str = "/etc/frr/frr.conf";

    /// Default tracing filter; keeps stderr quiet apart from warnings.
    pub const LOG_LEVEL: &str = "warn";

    /// Interface that carries the advertised virtual IPs.
    pub const LOOPBACK_IFACE: &str = "lo";

    /// BGP keepalive interval in seconds.
    pub const KEEPALIVE_SECS: u16 = 3;

    /// BGP hold time in seconds.
    pub const HOLDTIME_SECS: u16 = 9;

    /// ECMP width for the IPv4 unicast address family.
    pub const MAXIMUM_PATHS: u8 = 4;

    /// Sequence number of the single permit clause in each route-map.
    pub const ROUTE_MAP_SEQ: u16 = 10;
}
