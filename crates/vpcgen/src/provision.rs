//! Interface provisioner.
//!
//! Makes sure every tagged `<iface>.<vlan>` sub-interface named by the run
//! exists in the kernel before the configuration referencing it is written.
//! Failures here never abort the run; they come back as
//! [`ProvisionWarning`]s in the [`ProvisionReport`].

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use vpcgen_common::{shell, VpcgenError, VpcgenResult};
use vpcgen_types::{InterfaceName, VlanTag};

use crate::commands::{build_add_vlan_link_cmd, build_link_show_cmd};
use crate::types::{RunConfig, VlanLink};

/// Access to the kernel's network devices.
#[async_trait]
pub trait LinkProvider: Send {
    /// Returns true if a device with this name exists.
    async fn link_exists(&mut self, name: &str) -> VpcgenResult<bool>;

    /// Creates a VLAN sub-interface `name` on `parent` with the given tag.
    async fn add_vlan_link(
        &mut self,
        parent: &InterfaceName,
        name: &str,
        vlan: VlanTag,
    ) -> VpcgenResult<()>;
}

/// [`LinkProvider`] backed by the `ip` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct IpLink;

#[async_trait]
impl LinkProvider for IpLink {
    async fn link_exists(&mut self, name: &str) -> VpcgenResult<bool> {
        let result = shell::exec(&build_link_show_cmd(name)).await?;
        Ok(result.success())
    }

    async fn add_vlan_link(
        &mut self,
        parent: &InterfaceName,
        name: &str,
        vlan: VlanTag,
    ) -> VpcgenResult<()> {
        shell::exec_or_fail(&build_add_vlan_link_cmd(parent, name, vlan)).await?;
        Ok(())
    }
}

/// In-memory [`LinkProvider`] that records the commands it would run.
///
/// Used for dry runs, and by tests to stand in for the kernel. Links it
/// "creates" are remembered, so a repeated request for the same name sees
/// it as present.
#[derive(Debug, Default, Clone)]
pub struct RecordingLinks {
    present: BTreeSet<String>,
    failing: BTreeSet<String>,
    queries: Vec<String>,
    commands: Vec<String>,
}

impl RecordingLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks devices as already present.
    pub fn with_existing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.present.extend(names.into_iter().map(Into::into));
        self
    }

    /// Makes creation of `name` fail.
    pub fn failing(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    /// Device names passed to [`LinkProvider::link_exists`], in order.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Creation commands issued, in order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Devices currently considered present.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.present.iter().map(String::as_str)
    }
}

#[async_trait]
impl LinkProvider for RecordingLinks {
    async fn link_exists(&mut self, name: &str) -> VpcgenResult<bool> {
        self.queries.push(name.to_string());
        Ok(self.present.contains(name))
    }

    async fn add_vlan_link(
        &mut self,
        parent: &InterfaceName,
        name: &str,
        vlan: VlanTag,
    ) -> VpcgenResult<()> {
        let cmd = build_add_vlan_link_cmd(parent, name, vlan);
        self.commands.push(cmd.clone());
        if self.failing.contains(name) {
            return Err(VpcgenError::ShellCommandFailed {
                command: cmd,
                exit_code: 2,
                stderr: format!("Cannot find device \"{}\"", parent),
            });
        }
        self.present.insert(name.to_string());
        Ok(())
    }
}

/// What happened to one sub-interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Already existed; nothing was done.
    Present,
    /// Created by this run.
    Created,
}

/// A sub-interface that could not be checked or created.
#[derive(Debug)]
pub struct ProvisionWarning {
    /// Sub-interface name
    pub link: String,
    pub error: VpcgenError,
}

impl fmt::Display for ProvisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not provision interface {}: {} (configuration still references it)",
            self.link, self.error
        )
    }
}

/// Outcome of a provisioning pass.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    /// Sub-interfaces created by this run, in order
    pub created: Vec<String>,
    /// Sub-interfaces that already existed
    pub present: Vec<String>,
    /// Soft failures, in the order they happened
    pub warnings: Vec<ProvisionWarning>,
}

impl ProvisionReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Ensures one sub-interface exists, creating it if absent.
#[instrument(skip(links, link), fields(link = %link.name()))]
pub async fn ensure_vlan_link(
    links: &mut dyn LinkProvider,
    link: &VlanLink,
) -> VpcgenResult<LinkState> {
    let name = link.name();
    if links.link_exists(&name).await? {
        debug!("Sub-interface already present");
        return Ok(LinkState::Present);
    }

    links.add_vlan_link(&link.parent, &name, link.vlan).await?;
    info!("Created sub-interface {} with VLAN ID {}", name, link.vlan);
    Ok(LinkState::Created)
}

/// Provisions every tagged sub-interface of the run, in subnet order then
/// interface order. Untagged attachments need nothing.
///
/// Each link is attempted exactly once; errors are collected, not returned.
pub async fn provision(links: &mut dyn LinkProvider, config: &RunConfig) -> ProvisionReport {
    let mut report = ProvisionReport::default();

    for link in config.vlan_links() {
        let name = link.name();
        match ensure_vlan_link(links, &link).await {
            Ok(LinkState::Created) => report.created.push(name),
            Ok(LinkState::Present) => report.present.push(name),
            Err(error) => {
                debug!(link = %name, error = %error, "Provisioning failed");
                report.warnings.push(ProvisionWarning { link: name, error });
            }
        }
    }

    info!(
        created = report.created.len(),
        present = report.present.len(),
        failed = report.warnings.len(),
        "Provisioning complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_args;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_untagged_needs_nothing() {
        let config = parse_args(&["vpcA:v=0:i=eth1:i=eth2:a=10.1.1.1/32"]).unwrap();
        let mut links = RecordingLinks::new();

        let report = provision(&mut links, &config).await;

        assert!(links.queries().is_empty());
        assert!(links.commands().is_empty());
        assert!(report.created.is_empty());
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_creates_missing_link() {
        let config = parse_args(&["vpc1:v=10:i=eth0:a=10.0.0.1/32"]).unwrap();
        let mut links = RecordingLinks::new();

        let report = provision(&mut links, &config).await;

        assert_eq!(links.queries(), &["eth0.10".to_string()]);
        assert_eq!(
            links.commands(),
            &["/sbin/ip link add link \"eth0\" name \"eth0.10\" type vlan id 10".to_string()]
        );
        assert_eq!(report.created, vec!["eth0.10"]);
    }

    #[tokio::test]
    async fn test_existing_link_not_recreated() {
        let config = parse_args(&["vpc1:v=10:i=eth0:i=eth1:a=10.0.0.1/32"]).unwrap();
        let mut links = RecordingLinks::new().with_existing(["eth0.10"]);

        let report = provision(&mut links, &config).await;

        assert_eq!(report.present, vec!["eth0.10"]);
        assert_eq!(report.created, vec!["eth1.10"]);
        assert_eq!(links.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let config = parse_args(&[
            "vpc1:v=10:i=eth0:a=10.0.0.1/32",
            "vpc2:v=20:i=eth0:i=eth1:a=10.0.0.2/32",
        ])
        .unwrap();
        let mut links = RecordingLinks::new();

        let first = provision(&mut links, &config).await;
        assert_eq!(first.created.len(), 3);
        let issued = links.commands().len();

        let second = provision(&mut links, &config).await;
        assert!(second.created.is_empty());
        assert_eq!(second.present.len(), 3);
        assert_eq!(links.commands().len(), issued);
    }

    #[tokio::test]
    async fn test_duplicate_interface_created_once() {
        let config = parse_args(&["vpc1:v=10:i=eth0:i=eth0:a=10.0.0.1/32"]).unwrap();
        let mut links = RecordingLinks::new();

        let report = provision(&mut links, &config).await;

        assert_eq!(report.created, vec!["eth0.10"]);
        assert_eq!(report.present, vec!["eth0.10"]);
        assert_eq!(links.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_a_warning_and_continues() {
        let config = parse_args(&["vpc1:v=10:i=eth0:i=eth1:a=10.0.0.1/32"]).unwrap();
        let mut links = RecordingLinks::new().failing("eth0.10");

        let report = provision(&mut links, &config).await;

        assert!(!report.is_clean());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].link, "eth0.10");
        assert!(report.warnings[0].error.is_shell());
        assert_eq!(report.created, vec!["eth1.10"]);
        assert!(report.warnings[0]
            .to_string()
            .starts_with("could not provision interface eth0.10:"));
    }

    #[tokio::test]
    async fn test_ensure_vlan_link_states() {
        let link = VlanLink::new("eth3".parse().unwrap(), VlanTag::new(4095).unwrap());
        let mut links = RecordingLinks::new();

        assert_eq!(ensure_vlan_link(&mut links, &link).await.unwrap(), LinkState::Created);
        assert_eq!(ensure_vlan_link(&mut links, &link).await.unwrap(), LinkState::Present);
        assert_eq!(links.present().collect::<Vec<_>>(), vec!["eth3.4095"]);
    }
}
