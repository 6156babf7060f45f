//! PHC string codec
//!
//! Two layers: [`PhcSegments`] splits and joins the textual format, and
//! [`Credential`] applies an algorithm's [`ParamSchema`](crate::params::ParamSchema)
//! on both directions. `Credential::deserialize(&c.serialize()?)` yields `c`
//! field for field, params in declaration order.

pub mod credential;
pub mod segments;

pub use credential::Credential;
pub use segments::PhcSegments;
