//! Shell command builders for VLAN sub-interface operations

use vpcgen_common::shell;
use vpcgen_types::{InterfaceName, VlanTag};

/// Build link existence check command
///
/// Exits 0 when the device exists.
pub fn build_link_show_cmd(name: &str) -> String {
    format!(
        "{} link show dev {} >/dev/null 2>&1",
        shell::IP_CMD,
        shell::shellquote(name)
    )
}

/// Build add VLAN sub-interface command
pub fn build_add_vlan_link_cmd(parent: &InterfaceName, name: &str, vlan: VlanTag) -> String {
    format!(
        "{} link add link {} name {} type vlan id {}",
        shell::IP_CMD,
        shell::shellquote(parent.as_str()),
        shell::shellquote(name),
        vlan
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_link_show_cmd() {
        assert_eq!(
            build_link_show_cmd("eth0.10"),
            "/sbin/ip link show dev \"eth0.10\" >/dev/null 2>&1"
        );
    }

    #[test]
    fn test_build_add_vlan_link_cmd() {
        let parent: InterfaceName = "eth0".parse().unwrap();
        let cmd = build_add_vlan_link_cmd(&parent, "eth0.100", VlanTag::new(100).unwrap());
        assert_eq!(
            cmd,
            "/sbin/ip link add link \"eth0\" name \"eth0.100\" type vlan id 100"
        );
    }

    #[test]
    fn test_shellquote_safety() {
        let cmd = build_link_show_cmd("eth0\"; rm -rf /");
        assert!(cmd.contains("\"eth0\\\"; rm -rf /\""));
    }
}
