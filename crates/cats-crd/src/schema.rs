//! YAML schema output for custom resource definitions.

use std::{io::Write, path::Path};

use snafu::{ResultExt, Snafu};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents every error which can be encountered during YAML serialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to write YAML to file"))]
    WriteToFile { source: std::io::Error },

    #[snafu(display("failed to write YAML to stdout"))]
    WriteToStdout { source: std::io::Error },

    #[snafu(display("failed to parse bytes as valid UTF-8 string"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Serializes the given data structure as an explicit YAML document, with
/// leading dashes (`---`), and writes it to a [`Writer`](Write).
pub fn serialize<T, W>(value: &T, mut writer: W) -> Result<()>
where
    T: serde::Serialize,
    W: Write,
{
    writer
        .write_all(b"---\n")
        .context(WriteDocumentSeparatorSnafu)?;

    let mut serializer = serde_yaml::Serializer::new(writer);
    value
        .serialize(&mut serializer)
        .context(SerializeYamlSnafu)?;

    Ok(())
}

/// Provides YAML schema generation and output capabilities for Kubernetes
/// custom resources.
pub trait CustomResourceExt: kube::CustomResourceExt {
    /// Generates the YAML schema of a `CustomResourceDefinition` and returns
    /// it as a [`String`].
    fn yaml_schema() -> Result<String> {
        let mut buffer = Vec::new();
        serialize(&Self::crd(), &mut buffer)?;

        String::from_utf8(buffer).context(ParseUtf8BytesSnafu)
    }

    /// Generates the YAML schema of a `CustomResourceDefinition` and writes it
    /// to the specified file at `path`.
    fn write_yaml_schema<P: AsRef<Path>>(path: P) -> Result<()> {
        let schema = Self::yaml_schema()?;
        std::fs::write(path, schema).context(WriteToFileSnafu)
    }

    /// Generates the YAML schema of a `CustomResourceDefinition` and prints it
    /// to [stdout](std::io::stdout).
    fn print_yaml_schema() -> Result<()> {
        let schema = Self::yaml_schema()?;

        let mut writer = std::io::stdout();
        writer
            .write_all(schema.as_bytes())
            .context(WriteToStdoutSnafu)
    }
}

impl<T> CustomResourceExt for T where T: kube::CustomResourceExt {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::Cat;

    #[test]
    fn the_schema_is_an_explicit_yaml_document() {
        let schema = Cat::yaml_schema().expect("the Cat CRD serializes as YAML");

        assert!(schema.starts_with("---\n"));
        assert!(schema.contains("kind: CustomResourceDefinition"));
        assert!(schema.contains("name: cats.playground.example.com"));
    }

    #[test]
    fn the_schema_is_written_to_the_given_file() {
        let dir = tempfile::tempdir().expect("temporary directories are available");
        let path = dir.path().join("cats.crd.yaml");

        Cat::write_yaml_schema(&path).expect("the Cat CRD is written to disk");

        let contents = std::fs::read_to_string(&path).expect("the schema file exists");
        assert!(contents.starts_with("---\n"));
        assert!(contents.contains("plural: cats"));
    }
}
