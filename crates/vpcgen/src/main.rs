//! vpcgen - VPC subnet to FRR BGP configuration generator
//!
//! Entry point for the vpcgen command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vpcgen::{
    generate, GenerateError, GenerateOptions, IpLink, LinkProvider, ProvisionReport,
    RecordingLinks, SpecError,
};
use vpcgen_common::defaults;

/// Generate an FRR BGP configuration for VPC subnet attachments and create
/// the VLAN sub-interfaces they need.
#[derive(Parser, Debug)]
#[command(name = "vpcgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the generated BGP configuration file
    #[arg(short = 'o', long, default_value = defaults::CONFIG_PATH)]
    output: PathBuf,

    /// Validate and print the configuration to stdout; touch nothing
    #[arg(long)]
    dry_run: bool,

    /// Write the configuration but do not create VLAN sub-interfaces
    #[arg(long)]
    skip_provision: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(short = 'l', long, default_value = defaults::LOG_LEVEL)]
    log_level: String,

    /// [ASN] followed by subnet specs <name>:v=<vlan>:i=<iface>[:i=..]:a=<A.B.C.D/32>[:a=..]
    #[arg(value_name = "ARGS", required = true, num_args = 1.., allow_hyphen_values = true)]
    specs: Vec<String>,
}

/// Initializes tracing on stderr so stdout stays reserved for --dry-run output
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_logging(&args.log_level);
    debug!(?args, "Parsed command line");

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Messages already embed their sources.
            eprintln!("error: {}", e);
            if let Some(spec_err) = e.downcast_ref::<SpecError>() {
                report_spec_error(&args, spec_err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Points the operator at the rejected argument, or prints usage when no
/// subnet spec was given at all.
fn report_spec_error(args: &Args, err: &SpecError) {
    if matches!(err, SpecError::NoSubnets) {
        eprintln!();
        eprintln!("{}", Args::command().render_usage());
        return;
    }
    let Some(token) = err.token() else {
        return;
    };
    if let Some(pos) = args.specs.iter().position(|arg| arg == token) {
        eprintln!("note: rejected argument #{}: {}", pos + 1, token);
    }
}

/// Provisioning warnings go straight to stderr so no log filter can hide them.
fn print_warnings(report: &ProvisionReport) {
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let mut ip_link = IpLink;
    let mut recorder = RecordingLinks::new();
    let links: &mut dyn LinkProvider = if args.dry_run {
        &mut recorder
    } else {
        &mut ip_link
    };

    let options = GenerateOptions {
        output: (!args.dry_run).then(|| args.output.clone()),
        provision: !args.skip_provision,
    };

    let outcome = match generate(&args.specs, links, &options).await {
        Ok(outcome) => outcome,
        Err(GenerateError::Spec(e)) => return Err(e.into()),
        Err(GenerateError::Output { source, report }) => {
            print_warnings(&report);
            return Err(source.into());
        }
    };

    print_warnings(&outcome.report);

    if args.dry_run {
        for cmd in recorder.commands() {
            info!(command = %cmd, "Dry run: would execute");
        }
        print!("{}", outcome.text);
    } else {
        info!(
            path = %args.output.display(),
            created = outcome.report.created.len(),
            "Configuration generated"
        );
    }

    Ok(())
}
