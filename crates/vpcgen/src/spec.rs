//! Command line spec parser.
//!
//! Turns `[ASN] <name>:<param>[:<param>...]...` into a [`RunConfig`].
//! Parsing is pure: no I/O, no global state. The set of subnet names seen
//! so far is threaded through the fold over tokens.

use std::collections::HashSet;

use tracing::debug;
use vpcgen_types::{Asn, InterfaceName, SubnetName, VipAddress, VlanTag};

use crate::error::SpecError;
use crate::types::{RunConfig, SubnetSpec};

/// One `key=value` fragment of a subnet token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param<'a> {
    /// `v=<vlan>`
    Vlan(&'a str),
    /// `i=<interface>`
    Interface(&'a str),
    /// `a=<address>`
    Address(&'a str),
}

impl<'a> Param<'a> {
    /// Classifies a fragment by its prefix. Returns `None` for anything that
    /// is not `v=`, `i=` or `a=`.
    pub fn parse(fragment: &'a str) -> Option<Self> {
        if let Some(value) = fragment.strip_prefix("v=") {
            Some(Param::Vlan(value))
        } else if let Some(value) = fragment.strip_prefix("i=") {
            Some(Param::Interface(value))
        } else if let Some(value) = fragment.strip_prefix("a=") {
            Some(Param::Address(value))
        } else {
            None
        }
    }
}

/// Raw, not yet validated parameter values of one subnet token.
///
/// Built by folding [`ParamSet::apply`] over the token's fragments: the VLAN
/// slot is overwritten (last `v=` wins), interfaces and addresses are
/// appended in order without deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet<'a> {
    pub vlan: Option<&'a str>,
    pub interfaces: Vec<&'a str>,
    pub addresses: Vec<&'a str>,
}

impl<'a> ParamSet<'a> {
    /// Merges one parameter into the set.
    pub fn apply(mut self, param: Param<'a>) -> Self {
        match param {
            Param::Vlan(value) => self.vlan = Some(value),
            Param::Interface(value) => self.interfaces.push(value),
            Param::Address(value) => self.addresses.push(value),
        }
        self
    }

    /// Folds the `:`-separated fragments of `rest` into a set, failing on
    /// the first unrecognised fragment.
    pub fn from_fragments(token: &str, rest: &'a str) -> Result<Self, SpecError> {
        if rest.is_empty() {
            return Ok(Self::default());
        }
        rest.split(':').try_fold(Self::default(), |set, fragment| {
            Param::parse(fragment)
                .map(|param| set.apply(param))
                .ok_or_else(|| SpecError::UnknownParameter {
                    token: token.to_string(),
                    fragment: fragment.to_string(),
                })
        })
    }
}

/// Splits off a leading ASN argument.
///
/// Only a first argument that is a valid ASN is consumed. Anything else,
/// including numeric tokens out of range such as `0` or `4294967296`, is left
/// in place and parsed as the first subnet spec.
pub fn split_asn<S: AsRef<str>>(args: &[S]) -> (Asn, &[S]) {
    match args.split_first() {
        Some((first, rest)) => match first.as_ref().parse::<Asn>() {
            Ok(asn) => (asn, rest),
            Err(_) => (Asn::DEFAULT, args),
        },
        None => (Asn::DEFAULT, args),
    }
}

/// Parses one subnet token, checking its name against `seen`.
///
/// Checks run in a fixed order and the first failure wins: parameter
/// prefixes, name present, name charset, duplicate name, VLAN, interfaces,
/// addresses.
pub fn parse_subnet(token: &str, seen: &HashSet<String>) -> Result<SubnetSpec, SpecError> {
    let (name, rest) = token.split_once(':').unwrap_or((token, ""));
    let params = ParamSet::from_fragments(token, rest)?;

    if name.is_empty() {
        return Err(SpecError::MissingName {
            token: token.to_string(),
        });
    }
    let name = name.parse::<SubnetName>().map_err(|source| SpecError::InvalidName {
        token: token.to_string(),
        source,
    })?;
    if seen.contains(name.as_str()) {
        return Err(SpecError::DuplicateName {
            token: token.to_string(),
            name: name.to_string(),
        });
    }

    let vlan = params
        .vlan
        .ok_or_else(|| SpecError::MissingVlan {
            token: token.to_string(),
        })?
        .parse::<VlanTag>()
        .map_err(|source| SpecError::InvalidVlan {
            token: token.to_string(),
            source,
        })?;

    if params.interfaces.is_empty() {
        return Err(SpecError::MissingInterface {
            token: token.to_string(),
        });
    }
    let interfaces = params
        .interfaces
        .iter()
        .map(|value| value.parse::<InterfaceName>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SpecError::InvalidInterface {
            token: token.to_string(),
            source,
        })?;

    if params.addresses.is_empty() {
        return Err(SpecError::MissingAddress {
            token: token.to_string(),
        });
    }
    let addresses = params
        .addresses
        .iter()
        .map(|value| value.parse::<VipAddress>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SpecError::InvalidAddress {
            token: token.to_string(),
            source,
        })?;

    Ok(SubnetSpec {
        name,
        vlan,
        interfaces,
        addresses,
    })
}

/// Parses the full argument list (program name excluded).
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<RunConfig, SpecError> {
    let (asn, tokens) = split_asn(args);
    if tokens.is_empty() {
        return Err(SpecError::NoSubnets);
    }

    let (subnets, _seen) = tokens.iter().try_fold(
        (Vec::with_capacity(tokens.len()), HashSet::new()),
        |(mut subnets, mut seen), token| {
            let subnet = parse_subnet(token.as_ref(), &seen)?;
            debug!(
                subnet = %subnet.name,
                vlan = %subnet.vlan,
                interfaces = subnet.interfaces.len(),
                addresses = subnet.addresses.len(),
                "Parsed subnet spec"
            );
            seen.insert(subnet.name.to_string());
            subnets.push(subnet);
            Ok::<_, SpecError>((subnets, seen))
        },
    )?;

    Ok(RunConfig { asn, subnets })
}
