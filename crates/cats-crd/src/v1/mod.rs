//! Version `v1` of the [`Cat`] resource.
//!
//! The types in this module define the wire format of cats. Every spec field
//! is optional so that a serialized cat carries exactly the fields its author
//! set, which is what server-side apply needs to track field ownership. An
//! absent `age` and an `age` of `0` are therefore different things on the
//! wire.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod apply;

/// A cat living in the cluster.
///
/// Cats are namespaced and expose their status through the `status`
/// subresource, so spec and status are always written by separate requests
/// and can be owned by separate field managers.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "playground.example.com",
    version = "v1",
    kind = "Cat",
    plural = "cats",
    namespaced,
    status = "CatStatus",
    printcolumn = r#"{"name":"Breed", "type":"string", "jsonPath":".spec.breed"}"#,
    printcolumn = r#"{"name":"Color", "type":"string", "jsonPath":".spec.color"}"#,
    printcolumn = r#"{"name":"Age", "type":"integer", "jsonPath":".spec.age"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct CatSpec {
    /// The breed of the cat, for example `Maine Coon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    /// The fur color of the cat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// The age of the cat in years. Newborn cats are zero years old.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// The most recently observed status of the [`Cat`].
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatStatus {
    /// The latest available observations of the cat, keyed by condition type.
    ///
    /// The list merges by `type` on the server, so controllers owning
    /// different condition types can apply their entries independently.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(schema_with = "conditions_schema")]
    pub conditions: Vec<Condition>,
}

/// Returns a [`Schema`](schemars::Schema) for a list of custom Conditions
/// which have the same structure as the `io.k8s.pkg.apis.meta.v1.Condition`
/// resource from Kubernetes.
///
/// This is needed because the [`Condition`] from `k8s-openapi` does not
/// derive `JsonSchema`. On top of the plain structure the schema marks the
/// list as a map merged by `type` and caps it at 32 entries, mirroring the
/// validation of upstream condition lists.
pub fn conditions_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "array",
        "maxItems": 32,
        "x-kubernetes-list-type": "map",
        "x-kubernetes-list-map-keys": ["type"],
        "x-kubernetes-patch-strategy": "merge",
        "x-kubernetes-patch-merge-key": "type",
        "items": {
            "type": "object",
            "properties": {
                "lastTransitionTime": {
                    "description": "lastTransitionTime is the last time the condition transitioned from one status to another. This should be when the underlying condition changed.  If that is not known, then using the time when the API field changed is acceptable.",
                    "format": "date-time",
                    "type": "string"
                },
                "message": {
                    "description": "message is a human readable message indicating details about the transition. This may be an empty string.",
                    "type": "string"
                },
                "observedGeneration": {
                    "description": "observedGeneration represents the .metadata.generation that the condition was set based upon. For instance, if .metadata.generation is currently 12, but the .status.conditions[x].observedGeneration is 9, the condition is out of date with respect to the current state of the instance.",
                    "format": "int64",
                    "type": "integer"
                },
                "reason": {
                    "description": "reason contains a programmatic identifier indicating the reason for the condition's last transition. Producers of specific condition types may define expected values and meanings for this field, and whether the values are considered a guaranteed API. The value should be a CamelCase string. This field may not be empty.",
                    "type": "string"
                },
                "status": {
                    "default": "Unknown",
                    "description": "status of the condition, one of True, False, Unknown.",
                    "enum": [
                        "Unknown",
                        "True",
                        "False"
                    ],
                    "type": "string"
                },
                "type": {
                    "description": "type of condition in CamelCase or in foo.example.com/CamelCase.",
                    "pattern": "^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$",
                    "type": "string"
                }
            },
            "required": [
                "type",
                "status",
                "lastTransitionTime",
                "reason",
                "message"
            ]
        }
    })
}

/// According to the Kubernetes schema the only allowed values for the `status`
/// of a `Condition` are `True`, `False` and `Unknown`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}
