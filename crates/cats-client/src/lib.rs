//! A small, namespaced client for working with [`Cat`](cats_crd::v1::Cat)
//! objects through server-side apply.
//!
//! The entry point is [`CatClient`]. It wraps a [`kube::Client`] and exposes
//! the handful of verbs the playground needs: get, apply, apply status and
//! delete. Applies always go through the apply configurations from
//! [`cats_crd::v1::apply`], so a request carries exactly the fields its field
//! manager wants to own.

pub mod client;
pub mod http_log;
pub mod logging;

pub use client::{CatClient, Error, FieldOwnership};
