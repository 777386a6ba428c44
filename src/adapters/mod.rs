//! Read-only views of host state, requested instance type, and request
//! descriptors. Everything in here is a collaborator: the optimisation
//! pipeline that consumes these types is the crate's actual core.

pub mod filter_properties;
pub mod flavor;
pub mod host;

pub use filter_properties::FilterProperties;
pub use flavor::InstanceType;
pub use host::Host;
