//! The [`CatClient`] facade around [`kube::Client`].

use std::time::Duration;

use cats_crd::v1::{Cat, apply::CatApply};
use either::Either;
use kube::{
    Api, Client, Config,
    api::{DeleteParams, Patch, PatchParams},
    client::ClientBuilder,
    config::KubeConfigOptions,
};
use snafu::{ResultExt, Snafu};

use crate::http_log::HttpLogLayer;

/// Maximum duration of a single request round trip.
const API_TIMEOUT: Duration = Duration::from_secs(30);

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to load kubeconfig"))]
    LoadKubeConfig {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("failed to build Kubernetes client from kubeconfig"))]
    BuildClient { source: kube::Error },

    #[snafu(display("failed to get cat {name:?}"))]
    GetCat { source: kube::Error, name: String },

    #[snafu(display("failed to apply cat {name:?}"))]
    ApplyCat { source: kube::Error, name: String },

    #[snafu(display("failed to apply status of cat {name:?}"))]
    ApplyCatStatus { source: kube::Error, name: String },

    #[snafu(display("fields of cat {name:?} are owned by another field manager"))]
    FieldConflict { source: kube::Error, name: String },

    #[snafu(display("cat {name:?} does not exist"))]
    CatNotFound { name: String },

    #[snafu(display("failed to delete cat {name:?}"))]
    DeleteCat { source: kube::Error, name: String },
}

/// Controls whether an apply may take fields away from other field managers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldOwnership {
    /// Let the apply fail with [`Error::FieldConflict`] when it touches a
    /// field owned by another manager.
    Respect,

    /// Take ownership of every field in the patch, even if another manager
    /// currently owns it.
    Force,
}

/// Typed access to the [`Cat`] objects of a single namespace.
///
/// All verbs issue exactly one request, there are no retries. The client is
/// cheap to clone and every verb takes `&self`, so one instance can be shared
/// across tasks.
#[derive(Clone)]
pub struct CatClient {
    client: Client,
    namespace: String,
    cats: Api<Cat>,
}

impl CatClient {
    /// Wraps an existing [`kube::Client`].
    pub fn new(client: Client, namespace: &str) -> Self {
        let cats = Api::namespaced(client.clone(), namespace);

        Self {
            client,
            namespace: namespace.to_owned(),
            cats,
        }
    }

    /// Connects to the cluster the local kubeconfig points at.
    ///
    /// The `KUBECONFIG` environment variable wins over `~/.kube/config`, just
    /// like it does for kubectl. Every request runs with a 30 second timeout
    /// and is logged by [`HttpLogLayer`].
    pub async fn from_env(namespace: &str) -> Result<Self> {
        let mut config = Config::from_kubeconfig(&KubeConfigOptions::default())
            .await
            .context(LoadKubeConfigSnafu)?;
        config.connect_timeout = Some(API_TIMEOUT);
        config.read_timeout = Some(API_TIMEOUT);

        let client = ClientBuilder::try_from(config)
            .context(BuildClientSnafu)?
            .with_layer(&HttpLogLayer::new())
            .build();

        Ok(Self::new(client, namespace))
    }

    /// Returns a reference to the underlying [`kube::Client`] for requests
    /// the facade does not cover, like managing the CRD itself.
    pub fn as_kube_client(&self) -> &Client {
        &self.client
    }

    /// The namespace this client operates in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the cat `name`, or `None` if it does not exist.
    pub async fn get(&self, name: &str) -> Result<Option<Cat>> {
        tracing::debug!(cat.name = name, "getting cat");

        let cat = self
            .cats
            .get_opt(name)
            .await
            .with_context(|_| GetCatSnafu { name })?;
        tracing::debug!(cat.name = name, found = cat.is_some(), "got cat");

        Ok(cat)
    }

    /// Applies `cat` on behalf of `field_manager`.
    ///
    /// This is a server-side apply: the patch carries exactly the fields set
    /// on the configuration, the server merges them into the stored object
    /// and records `field_manager` as their owner. A cat that does not exist
    /// yet is created. With [`FieldOwnership::Respect`] the server rejects
    /// patches touching foreign fields and the rejection surfaces as
    /// [`Error::FieldConflict`].
    pub async fn apply(
        &self,
        cat: &CatApply,
        field_manager: &str,
        ownership: FieldOwnership,
    ) -> Result<Cat> {
        let name = cat.name();
        tracing::debug!(
            cat.name = name,
            field.manager = field_manager,
            ownership = ?ownership,
            payload = %serde_json::to_string(cat).unwrap_or_default(),
            "applying cat"
        );

        let applied = match self
            .cats
            .patch(name, &patch_params(field_manager, ownership), &Patch::Apply(cat))
            .await
        {
            Err(err) if is_conflict(&err) => {
                return Err(err).context(FieldConflictSnafu { name });
            }
            other => other.with_context(|_| ApplyCatSnafu { name })?,
        };
        tracing::debug!(
            cat.name = name,
            resource.version = ?applied.metadata.resource_version,
            "applied cat"
        );

        Ok(applied)
    }

    /// Applies the status part of `cat` on behalf of `field_manager`.
    ///
    /// The patch goes to the `status` subresource, so the spec of the cat is
    /// left untouched no matter what the configuration contains. The cat has
    /// to exist, a status apply never creates it.
    pub async fn apply_status(
        &self,
        cat: &CatApply,
        field_manager: &str,
        ownership: FieldOwnership,
    ) -> Result<Cat> {
        let name = cat.name();
        tracing::debug!(
            cat.name = name,
            field.manager = field_manager,
            ownership = ?ownership,
            payload = %serde_json::to_string(cat).unwrap_or_default(),
            "applying cat status"
        );

        let applied = match self
            .cats
            .patch_status(name, &patch_params(field_manager, ownership), &Patch::Apply(cat))
            .await
        {
            Err(err) if is_conflict(&err) => {
                return Err(err).context(FieldConflictSnafu { name });
            }
            other => other.with_context(|_| ApplyCatStatusSnafu { name })?,
        };
        tracing::debug!(
            cat.name = name,
            resource.version = ?applied.metadata.resource_version,
            "applied cat status"
        );

        Ok(applied)
    }

    /// Deletes the cat `name`.
    ///
    /// Deleting a cat that does not exist surfaces as [`Error::CatNotFound`],
    /// so cleanup paths can treat that case as already done.
    pub async fn delete(&self, name: &str) -> Result<()> {
        tracing::debug!(cat.name = name, "deleting cat");

        match self.cats.delete(name, &DeleteParams::default()).await {
            Ok(Either::Left(cat)) => {
                tracing::debug!(
                    cat.name = name,
                    resource.version = ?cat.metadata.resource_version,
                    "deleted cat"
                );
                Ok(())
            }
            Ok(Either::Right(status)) => {
                tracing::debug!(cat.name = name, ?status, "cat is being deleted");
                Ok(())
            }
            Err(err) if is_not_found(&err) => CatNotFoundSnafu { name }.fail(),
            Err(err) => Err(err).context(DeleteCatSnafu { name }),
        }
    }
}

fn patch_params(field_manager: &str, ownership: FieldOwnership) -> PatchParams {
    let params = PatchParams::apply(field_manager);

    match ownership {
        FieldOwnership::Respect => params,
        FieldOwnership::Force => params.force(),
    }
}

fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(status) if status.reason == "Conflict")
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(status) if status.reason == "NotFound")
}
