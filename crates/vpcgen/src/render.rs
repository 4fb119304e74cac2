//! FRR configuration renderer.
//!
//! Output is a pure function of the [`RunConfig`]: same arguments in the
//! same order give byte-identical text.

use std::fmt;

use vpcgen_common::defaults;
use vpcgen_types::Asn;

use crate::types::{RunConfig, SubnetSpec};

/// Block separator in the FRR dialect.
const SEPARATOR: &str = "!";

/// The four text blocks accumulated while walking the subnets, plus the ASN.
///
/// Each block holds complete lines without trailing newlines; indentation
/// is part of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    pub asn: Asn,
    /// Route-maps and prefix-lists
    pub policy: Vec<String>,
    /// `ip address` lines for the loopback
    pub loopback: Vec<String>,
    /// `neighbor` lines for the BGP router block
    pub neighbors: Vec<String>,
    /// `network` lines for the IPv4 unicast address family
    pub networks: Vec<String>,
}

impl RenderedConfig {
    /// Renders every subnet of `config` in argument order.
    pub fn new(config: &RunConfig) -> Self {
        let mut rendered = Self {
            asn: config.asn,
            policy: Vec::new(),
            loopback: Vec::new(),
            neighbors: Vec::new(),
            networks: Vec::new(),
        };
        for subnet in &config.subnets {
            rendered.push_subnet(subnet);
        }
        rendered
    }

    fn push_subnet(&mut self, subnet: &SubnetSpec) {
        let name = &subnet.name;

        self.policy.push(format!(
            "route-map {} permit {}",
            name,
            defaults::ROUTE_MAP_SEQ
        ));
        self.policy
            .push(format!(" match ip address prefix-list {}", name));
        self.policy.push(SEPARATOR.to_string());
        for addr in &subnet.addresses {
            self.policy
                .push(format!("ip prefix-list {} permit {}", name, addr));
        }
        self.policy.push(SEPARATOR.to_string());

        for addr in &subnet.addresses {
            self.loopback.push(format!(" ip address {}", addr));
        }

        for neighbor in subnet.neighbors() {
            self.neighbors
                .push(format!(" neighbor {} interface remote-as external", neighbor));
            self.neighbors
                .push(format!(" neighbor {} capability extended-nexthop", neighbor));
            self.neighbors
                .push(format!(" neighbor {} route-map {} out", neighbor, name));
        }

        for addr in &subnet.addresses {
            self.networks.push(format!("  network {}", addr));
        }
    }
}

impl fmt::Display for RenderedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.policy {
            writeln!(f, "{}", line)?;
        }

        writeln!(f, "interface {}", defaults::LOOPBACK_IFACE)?;
        for line in &self.loopback {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        writeln!(f, "router bgp {}", self.asn)?;
        writeln!(f, " no bgp ebgp-requires-policy")?;
        writeln!(f, " bgp bestpath as-path multipath-relax")?;
        writeln!(
            f,
            " timers bgp {} {}",
            defaults::KEEPALIVE_SECS,
            defaults::HOLDTIME_SECS
        )?;
        for line in &self.neighbors {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, " {}", SEPARATOR)?;
        writeln!(f, " address-family ipv4 unicast")?;
        writeln!(f, "  maximum-paths {}", defaults::MAXIMUM_PATHS)?;
        for line in &self.networks {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, " exit-address-family")?;
        writeln!(f, "{}", SEPARATOR)
    }
}

/// Renders the full configuration document.
pub fn render(config: &RunConfig) -> String {
    RenderedConfig::new(config).to_string()
}
