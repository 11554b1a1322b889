//! Custom resource types for the cats playground.
//!
//! The playground revolves around a single namespaced custom resource, the
//! [`Cat`](v1::Cat). Everything a client needs to manage cats with
//! server-side apply lives here: the Rust types the CRD schema is derived
//! from, the apply configurations which serialize only explicitly set fields,
//! and helpers to emit the CRD manifest as YAML.

pub mod schema;
pub mod v1;
