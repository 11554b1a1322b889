//! Shared harness for the demo tests.
//!
//! Connects to the cluster the local kubeconfig points at, installs the Cat
//! CRD through server-side apply and waits until the API server serves it.
//! The demos are expected to run against a disposable cluster, for example
//! one created with kind.

use std::time::Duration;

use cats_client::{CatClient, Error, logging::initialize_logging};
use cats_crd::v1::Cat;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    Api, Client, CustomResourceExt,
    api::{Patch, PatchParams},
    runtime::wait::{await_condition, conditions},
};

pub const NAMESPACE: &str = "default";

/// The field manager the harness itself applies the CRD as.
const HARNESS_FIELD_MANAGER: &str = "cats-demo";

/// Connects to the cluster from the environment and makes sure the Cat CRD
/// is installed and established.
pub async fn connect() -> CatClient {
    initialize_logging("CATS_DEMO_LOG");

    let cats = CatClient::from_env(NAMESPACE)
        .await
        .expect("a reachable cluster is required, point KUBECONFIG at one");
    install_crd(cats.as_kube_client()).await;

    cats
}

async fn install_crd(client: &Client) {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());
    let params = PatchParams::apply(HARNESS_FIELD_MANAGER).force();

    crds.patch(Cat::crd_name(), &params, &Patch::Apply(&Cat::crd()))
        .await
        .expect("the Cat CRD must be accepted by the API server");

    let establish = await_condition(crds, Cat::crd_name(), conditions::is_crd_established());
    tokio::time::timeout(Duration::from_secs(30), establish)
        .await
        .expect("the Cat CRD must become established within 30 seconds")
        .expect("watching the Cat CRD must succeed");
}

/// Removes leftovers of the cat `name` from earlier runs.
pub async fn reset(cats: &CatClient, name: &str) {
    if let Err(err) = cats.delete(name).await {
        assert!(
            matches!(err, Error::CatNotFound { .. }),
            "failed to reset cat {name}: {err}"
        );
    }
}

/// Fetches the cat `name` and prints it the way the demos present results.
pub async fn get_cat(cats: &CatClient, name: &str) -> Cat {
    println!("Getting cat {name}");
    let cat = cats
        .get(name)
        .await
        .expect("getting the cat must succeed")
        .expect("the cat must exist at this point");
    println!(
        "{}",
        serde_json::to_string_pretty(&cat).expect("cats are serializable")
    );

    cat
}
