//! Apply configurations for the [`Cat`] resource.
//!
//! An apply configuration is the partial object a field manager sends in a
//! server-side apply request. It serializes exactly the fields that were set
//! on it, nothing more, because the server derives field ownership from the
//! keys present in the patch. All builders are consuming and chainable, so a
//! complete patch reads as one expression.
//!
//! Identity is the only mandatory part: every configuration starts with
//! [`CatApply::named`], which stamps `apiVersion`, `kind`, object name and
//! namespace, the fields the server requires in every apply patch.

use k8s_openapi::{apimachinery::pkg::apis::meta::v1::Time, jiff::Timestamp};
use kube::Resource;
use serde::Serialize;

use super::{Cat, ConditionStatus};

/// Apply configuration for a [`Cat`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatApply {
    api_version: String,
    kind: String,
    metadata: ApplyMetadata,

    #[serde(skip_serializing_if = "Option::is_none")]
    spec: Option<CatSpecApply>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<CatStatusApply>,
}

/// The part of the object metadata a client fills in. Everything else in
/// `metadata` is owned by the server and has no place in an apply patch.
#[derive(Clone, Debug, Serialize)]
struct ApplyMetadata {
    name: String,
    namespace: String,
}

impl CatApply {
    /// Creates an apply configuration for the cat `name` in `namespace`.
    pub fn named(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: Cat::api_version(&()).into_owned(),
            kind: Cat::kind(&()).into_owned(),
            metadata: ApplyMetadata {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec: None,
            status: None,
        }
    }

    /// Sets the spec to apply.
    pub fn with_spec(mut self, spec: CatSpecApply) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Sets the status to apply. Only requests against the status subresource
    /// look at this part of the configuration.
    pub fn with_status(mut self, status: CatStatusApply) -> Self {
        self.status = Some(status);
        self
    }

    /// The name of the cat this configuration applies to.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The namespace of the cat this configuration applies to.
    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

/// Apply configuration for a [`CatSpec`](super::CatSpec).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatSpecApply {
    #[serde(skip_serializing_if = "Option::is_none")]
    breed: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

impl CatSpecApply {
    /// Creates an empty spec configuration which serializes to `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the breed field.
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Sets the color field.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the age field. Setting an age of zero is not the same as leaving
    /// the age unset, only the former puts the field into the patch.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Apply configuration for a [`CatStatus`](super::CatStatus).
#[derive(Clone, Debug, Default, Serialize)]
pub struct CatStatusApply {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<ConditionApply>,
}

impl CatStatusApply {
    /// Creates an empty status configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a condition. The server merges conditions by their `type`, so
    /// applying a single condition leaves entries of other types untouched.
    pub fn with_condition(mut self, condition: ConditionApply) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Apply configuration for a single status condition.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionApply {
    #[serde(rename = "type")]
    type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    last_transition_time: Option<Time>,
}

impl ConditionApply {
    /// Creates a condition configuration for the condition type
    /// `condition_type`, for example `Sleepy`.
    pub fn of_type(condition_type: impl Into<String>) -> Self {
        Self {
            type_: condition_type.into(),
            status: None,
            reason: None,
            message: None,
            last_transition_time: None,
        }
    }

    /// Sets the status of the condition.
    pub fn with_status(mut self, status: ConditionStatus) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Sets the machine readable reason, a CamelCase identifier.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the human readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the transition timestamp.
    pub fn with_last_transition_time(mut self, time: Time) -> Self {
        self.last_transition_time = Some(time);
        self
    }

    /// Stamps the transition timestamp with the current wall clock.
    pub fn with_last_transition_time_now(self) -> Self {
        self.with_last_transition_time(Time(Timestamp::now()))
    }
}
