//! Prints the Cat CRD manifest to stdout, ready to be piped into `kubectl apply -f -`.

use cats_crd::{schema::CustomResourceExt as _, v1::Cat};

fn main() -> cats_crd::schema::Result<()> {
    Cat::print_yaml_schema()
}
