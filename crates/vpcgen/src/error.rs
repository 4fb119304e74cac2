//! Hard failures raised by the parse/generate pipeline.

use thiserror::Error;
use vpcgen_common::VpcgenError;
use vpcgen_types::ParseError;

use crate::provision::ProvisionReport;

/// A subnet spec (or the argument list as a whole) failed validation.
///
/// Every variant except [`SpecError::NoSubnets`] carries the offending
/// command line token so the operator can find it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("at least one subnet spec is required")]
    NoSubnets,

    #[error("invalid subnet spec '{token}': unknown parameter '{fragment}' (expected v=, i= or a=)")]
    UnknownParameter { token: String, fragment: String },

    #[error("invalid subnet spec '{token}': subnet name is required")]
    MissingName { token: String },

    #[error("invalid subnet spec '{token}': {source}")]
    InvalidName {
        token: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid subnet spec '{token}': duplicate subnet name '{name}'")]
    DuplicateName { token: String, name: String },

    #[error("invalid subnet spec '{token}': VLAN is required (v=<0-4095>)")]
    MissingVlan { token: String },

    #[error("invalid subnet spec '{token}': {source}")]
    InvalidVlan {
        token: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid subnet spec '{token}': at least one interface is required (i=<name>)")]
    MissingInterface { token: String },

    #[error("invalid subnet spec '{token}': {source}")]
    InvalidInterface {
        token: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid subnet spec '{token}': at least one address is required (a=<A.B.C.D/32>)")]
    MissingAddress { token: String },

    #[error("invalid subnet spec '{token}': {source}")]
    InvalidAddress {
        token: String,
        #[source]
        source: ParseError,
    },
}

impl SpecError {
    /// Returns the token the error refers to, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            SpecError::NoSubnets => None,
            SpecError::UnknownParameter { token, .. }
            | SpecError::MissingName { token }
            | SpecError::InvalidName { token, .. }
            | SpecError::DuplicateName { token, .. }
            | SpecError::MissingVlan { token }
            | SpecError::InvalidVlan { token, .. }
            | SpecError::MissingInterface { token }
            | SpecError::InvalidInterface { token, .. }
            | SpecError::MissingAddress { token }
            | SpecError::InvalidAddress { token, .. } => Some(token),
        }
    }
}

/// Any failure that stops a run before it completes.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Writing failed after provisioning already ran; the report is kept
    /// so its warnings can still be shown.
    #[error("{source}")]
    Output {
        #[source]
        source: VpcgenError,
        report: ProvisionReport,
    },
}
