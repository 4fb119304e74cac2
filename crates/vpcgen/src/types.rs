//! Validated run configuration handed from the parser to the provisioner
//! and the renderer.

use vpcgen_types::{Asn, InterfaceName, SubnetName, VipAddress, VlanTag};

/// One VPC subnet attachment, built from a single command line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetSpec {
    /// Subnet name; also names the route-map and prefix-list
    pub name: SubnetName,
    /// VLAN tag, 0 for untagged
    pub vlan: VlanTag,
    /// Parent interfaces in argument order, duplicates kept
    pub interfaces: Vec<InterfaceName>,
    /// Virtual IPs in argument order, duplicates kept
    pub addresses: Vec<VipAddress>,
}

impl SubnetSpec {
    /// BGP neighbor names for this subnet, one per interface.
    pub fn neighbors(&self) -> impl Iterator<Item = String> + '_ {
        self.interfaces.iter().map(move |iface| iface.with_vlan(self.vlan))
    }

    /// VLAN sub-interfaces this subnet needs. Empty for untagged subnets.
    pub fn vlan_links(&self) -> Vec<VlanLink> {
        if !self.vlan.is_tagged() {
            return Vec::new();
        }
        self.interfaces
            .iter()
            .map(|parent| VlanLink::new(parent.clone(), self.vlan))
            .collect()
    }
}

/// Everything parsed from one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub asn: Asn,
    pub subnets: Vec<SubnetSpec>,
}

impl RunConfig {
    /// All VLAN sub-interfaces in subnet order, then interface order.
    pub fn vlan_links(&self) -> Vec<VlanLink> {
        self.subnets.iter().flat_map(SubnetSpec::vlan_links).collect()
    }

    /// Total number of advertised addresses across all subnets.
    pub fn address_count(&self) -> usize {
        self.subnets.iter().map(|s| s.addresses.len()).sum()
    }
}

/// A tagged sub-interface `<parent>.<vlan>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VlanLink {
    pub parent: InterfaceName,
    pub vlan: VlanTag,
}

impl VlanLink {
    pub fn new(parent: InterfaceName, vlan: VlanTag) -> Self {
        Self { parent, vlan }
    }

    /// Kernel device name of the sub-interface.
    pub fn name(&self) -> String {
        self.parent.with_vlan(self.vlan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn subnet(vlan: u16, interfaces: &[&str]) -> SubnetSpec {
        SubnetSpec {
            name: "vpc1".parse().unwrap(),
            vlan: VlanTag::new(vlan).unwrap(),
            interfaces: interfaces.iter().map(|i| i.parse().unwrap()).collect(),
            addresses: vec![VipAddress::new(10, 0, 0, 1)],
        }
    }

    #[test]
    fn test_neighbors_tagged() {
        let spec = subnet(10, &["eth0", "eth1"]);
        assert_eq!(spec.neighbors().collect::<Vec<_>>(), vec!["eth0.10", "eth1.10"]);
    }

    #[test]
    fn test_neighbors_untagged() {
        let spec = subnet(0, &["eth1", "eth2"]);
        assert_eq!(spec.neighbors().collect::<Vec<_>>(), vec!["eth1", "eth2"]);
        assert!(spec.vlan_links().is_empty());
    }

    #[test]
    fn test_vlan_links_keep_order_and_duplicates() {
        let config = RunConfig {
            asn: Asn::DEFAULT,
            subnets: vec![subnet(20, &["eth1", "eth1"]), subnet(0, &["eth2"]), subnet(30, &["eth0"])],
        };
        let names: Vec<_> = config.vlan_links().iter().map(VlanLink::name).collect();
        assert_eq!(names, vec!["eth1.20", "eth1.20", "eth0.30"]);
        assert_eq!(config.address_count(), 3);
    }
}
