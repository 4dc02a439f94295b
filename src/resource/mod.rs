//! Typed SCIM resources.
//!
//! # Key Components
//!
//! * [`ResourceInstance`] - a payload that passed validation, with typed values
//! * [`TypedValue`] / [`AttributeValue`] / [`ComplexValue`] - cast attribute values
//! * [`AttributeProjection`] - response shaping by `attributes` / `excludedAttributes`

pub mod instance;
pub mod projection;
pub mod value;

pub use instance::ResourceInstance;
pub use projection::AttributeProjection;
pub use value::{AttributeValue, ComplexValue, TypedValue};
