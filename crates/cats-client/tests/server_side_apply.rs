//! Walks a cat through the full server-side apply lifecycle: one manager owns
//! the spec, two controllers own one status condition each.

mod common;

use cats_client::FieldOwnership;
use cats_crd::v1::{
    ConditionStatus,
    apply::{CatApply, CatSpecApply, CatStatusApply, ConditionApply},
};

#[tokio::test]
#[ignore = "requires a running Kubernetes cluster"]
async fn cat_spec_and_status_are_owned_by_separate_managers() {
    let cats = common::connect().await;
    common::reset(&cats, "my-cat").await;

    println!("Applying cat with a full spec");
    let cat = CatApply::named("my-cat", common::NAMESPACE).with_spec(
        CatSpecApply::new()
            .with_breed("Maine Coon")
            .with_color("Black")
            .with_age(3),
    );
    cats.apply(&cat, "cat-owner", FieldOwnership::Force)
        .await
        .expect("the full apply must create the cat");

    println!("Applying Sleepy condition by the sleepiness controller");
    let sleepy = CatApply::named("my-cat", common::NAMESPACE).with_status(
        CatStatusApply::new().with_condition(
            ConditionApply::of_type("Sleepy")
                .with_status(ConditionStatus::True)
                .with_reason("Sleepy")
                .with_message("Cat is sleepy")
                .with_last_transition_time_now(),
        ),
    );
    cats.apply_status(&sleepy, "sleepiness-controller", FieldOwnership::Force)
        .await
        .expect("the sleepiness controller must be able to apply its condition");

    println!("Applying Happy condition by the happiness controller");
    let happy = CatApply::named("my-cat", common::NAMESPACE).with_status(
        CatStatusApply::new().with_condition(
            ConditionApply::of_type("Happy")
                .with_status(ConditionStatus::True)
                .with_reason("Happy")
                .with_message("Cat is happy")
                .with_last_transition_time_now(),
        ),
    );
    cats.apply_status(&happy, "happiness-controller", FieldOwnership::Force)
        .await
        .expect("the happiness controller must be able to apply its condition");

    let cat = common::get_cat(&cats, "my-cat").await;

    assert_eq!(cat.metadata.namespace.as_deref(), Some(cats.namespace()));
    assert_eq!(cat.spec.breed.as_deref(), Some("Maine Coon"));
    assert_eq!(cat.spec.color.as_deref(), Some("Black"));
    assert_eq!(cat.spec.age, Some(3));

    let status = cat.status.as_ref().expect("both controllers applied a condition");
    assert_eq!(status.conditions.len(), 2);

    let sleepy = status
        .conditions
        .iter()
        .find(|condition| condition.type_ == "Sleepy")
        .expect("the Sleepy condition must survive the Happy apply");
    assert_eq!(sleepy.status, "True");
    assert_eq!(sleepy.reason, "Sleepy");
    assert_eq!(sleepy.message, "Cat is sleepy");

    assert!(
        status
            .conditions
            .iter()
            .any(|condition| condition.type_ == "Happy"),
        "the Happy condition must be merged into the list"
    );

    common::reset(&cats, "my-cat").await;
}
