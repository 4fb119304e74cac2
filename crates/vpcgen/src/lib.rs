//! vpcgen - VPC subnet to FRR BGP configuration generator
//!
//! Turns command line subnet specs of the form
//! `<name>:v=<vlan>:i=<iface>[:i=...]:a=<A.B.C.D/32>[:a=...]` into:
//!
//! 1. VLAN sub-interfaces (`<iface>.<vlan>`) created through `ip link`
//! 2. An FRR configuration with per-subnet route-maps and prefix-lists,
//!    loopback VIPs, unnumbered eBGP neighbors and network statements
//!
//! Validation is all-or-nothing: any bad token aborts the run before the
//! kernel or the output file is touched. Provisioning failures only warn.

mod commands;
mod error;
mod output;
mod provision;
mod render;
mod spec;
mod types;

use std::path::PathBuf;

use tracing::info;

pub use commands::*;
pub use error::{GenerateError, SpecError};
pub use output::write_config;
pub use provision::{
    ensure_vlan_link, provision, IpLink, LinkProvider, LinkState, ProvisionReport,
    ProvisionWarning, RecordingLinks,
};
pub use render::{render, RenderedConfig};
pub use spec::{parse_args, parse_subnet, split_asn, Param, ParamSet};
pub use types::{RunConfig, SubnetSpec, VlanLink};

/// What a run should do besides parsing and rendering.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Destination file; `None` renders without writing
    pub output: Option<PathBuf>,
    /// Create missing VLAN sub-interfaces
    pub provision: bool,
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Outcome {
    pub config: RunConfig,
    pub report: ProvisionReport,
    /// Rendered configuration document
    pub text: String,
}

/// Runs the full pipeline: parse, provision, render, write.
///
/// Returns early with a [`GenerateError`] on the first validation failure,
/// before any link is touched or any file is written.
pub async fn generate<S: AsRef<str>>(
    args: &[S],
    links: &mut dyn LinkProvider,
    options: &GenerateOptions,
) -> Result<Outcome, GenerateError> {
    let config = parse_args(args)?;
    info!(
        asn = %config.asn,
        subnets = config.subnets.len(),
        addresses = config.address_count(),
        "Validated subnet specs"
    );

    let report = if options.provision {
        provision(links, &config).await
    } else {
        ProvisionReport::default()
    };

    let text = render(&config);

    if let Some(path) = &options.output {
        if let Err(source) = write_config(path, &text) {
            return Err(GenerateError::Output { source, report });
        }
    }

    Ok(Outcome {
        config,
        report,
        text,
    })
}
