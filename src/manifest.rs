//! Kustomization manifest schema
//!
//! Only the fields that name other files are modelled. Everything else a
//! kustomization may carry (`namePrefix`, `images`, `labels`, ...) is ignored
//! by the parser rather than rejected.
//!
//! Parsing is as forgiving as kustomize's own loader: only the first YAML
//! document is read, and scalars in string fields are taken as text, so
//! `resources: [2024]` names a directory called `2024`.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// A parsed kustomization file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Files (with an extension) or nested kustomization directories (without)
    #[serde(default, deserialize_with = "scalar_strings")]
    pub resources: Vec<String>,

    /// Patch files
    #[serde(default, deserialize_with = "null_as_default")]
    pub patches: Vec<Patch>,

    /// Legacy strategic merge patch files
    #[serde(default, deserialize_with = "scalar_strings")]
    pub patches_strategic_merge: Vec<String>,

    /// ConfigMap generators
    #[serde(
        default,
        rename = "configMapGenerator",
        deserialize_with = "null_as_default"
    )]
    pub generators: Vec<Generator>,

    /// Secret generators
    #[serde(
        default,
        rename = "secretGenerator",
        deserialize_with = "null_as_default"
    )]
    pub secret_generators: Vec<Generator>,

    /// Kustomize components, always directories
    #[serde(default, deserialize_with = "scalar_strings")]
    pub components: Vec<String>,
}

/// Reference to a single patch file
///
/// Inline patches (`patch:`) and targets are not dependencies and are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// Empty when the patch is inline
    #[serde(default, deserialize_with = "scalar_string")]
    pub path: String,
}

/// A configMapGenerator or secretGenerator entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_strings")]
    pub files: Vec<String>,

    /// Env files (`KEY=value` per line)
    #[serde(default, deserialize_with = "scalar_strings")]
    pub envs: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from raw YAML bytes
    ///
    /// Documents after the first are ignored. An empty (or comment-only)
    /// first document yields an empty manifest.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let Some(document) = serde_yaml::Deserializer::from_slice(bytes).next() else {
            return Ok(Self::default());
        };

        let value = Value::deserialize(document)?;
        if value.is_null() {
            return Ok(Self::default());
        }

        serde_yaml::from_value(value)
    }

    /// Non-empty patch paths, in declaration order
    pub fn patch_paths(&self) -> impl Iterator<Item = &str> {
        self.patches
            .iter()
            .map(|patch| patch.path.as_str())
            .filter(|path| !path.is_empty())
    }

    /// Input files of every configMapGenerator, then every secretGenerator
    pub fn generator_inputs(&self) -> impl Iterator<Item = &str> {
        self.generators
            .iter()
            .chain(self.secret_generators.iter())
            .flat_map(Generator::inputs)
    }
}

impl Generator {
    /// `files` followed by `envs`
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .chain(self.envs.iter())
            .map(String::as_str)
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A string field that also accepts numbers, booleans and `null`
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) => scalar_to_string(value),
        None => Ok(String::new()),
    }
}

/// A list of strings whose items may be any scalar
fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(scalar_to_string)
        .collect()
}

fn scalar_to_string<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) => Err(E::invalid_type(Unexpected::Seq, &"a string")),
        Value::Mapping(_) => Err(E::invalid_type(Unexpected::Map, &"a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
namePrefix: dev-
resources:
  - deployment.yaml
  - ../base
patches:
  - path: replicas.yaml
    target:
      kind: Deployment
  - patch: |-
      - op: replace
        path: /spec/replicas
        value: 3
patchesStrategicMerge:
  - memory.yaml
configMapGenerator:
  - name: app-config
    files:
      - app.properties
    envs:
      - app.env
secretGenerator:
  - name: creds
    files:
      - password.txt
components:
  - ../components/monitoring
"#;
        let manifest = Manifest::from_slice(yaml.as_bytes()).unwrap();

        assert_eq!(manifest.resources, vec!["deployment.yaml", "../base"]);
        assert_eq!(manifest.patches.len(), 2);
        assert_eq!(manifest.patches[0].path, "replicas.yaml");
        assert_eq!(manifest.patches[1].path, "");
        assert_eq!(manifest.patches_strategic_merge, vec!["memory.yaml"]);
        assert_eq!(manifest.generators[0].name, "app-config");
        assert_eq!(manifest.generators[0].files, vec!["app.properties"]);
        assert_eq!(manifest.generators[0].envs, vec!["app.env"]);
        assert_eq!(manifest.secret_generators[0].files, vec!["password.txt"]);
        assert_eq!(manifest.components, vec!["../components/monitoring"]);
    }

    #[test]
    fn test_patch_paths_skip_inline_patches() {
        let manifest = Manifest {
            patches: vec![
                Patch {
                    path: "a.yaml".to_string(),
                },
                Patch::default(),
                Patch {
                    path: "b.yaml".to_string(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            manifest.patch_paths().collect::<Vec<_>>(),
            vec!["a.yaml", "b.yaml"]
        );
    }

    #[test]
    fn test_generator_inputs_order() {
        let manifest = Manifest {
            generators: vec![
                Generator {
                    name: "one".to_string(),
                    files: vec!["1a".to_string(), "1b".to_string()],
                    envs: vec!["1.env".to_string()],
                },
                Generator {
                    name: "two".to_string(),
                    files: vec!["2a".to_string()],
                    envs: vec![],
                },
            ],
            secret_generators: vec![Generator {
                name: "secret".to_string(),
                files: vec!["s".to_string()],
                envs: vec![],
            }],
            ..Default::default()
        };
        assert_eq!(
            manifest.generator_inputs().collect::<Vec<_>>(),
            vec!["1a", "1b", "1.env", "2a", "s"]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Manifest::from_slice(b"").unwrap(), Manifest::default());
        assert_eq!(Manifest::from_slice(b"\n  \n").unwrap(), Manifest::default());
    }

    #[test]
    fn test_null_fields_are_empty() {
        let yaml = "resources:\npatches: ~\nconfigMapGenerator:\n  - name: cm\n    files:\n";
        let manifest = Manifest::from_slice(yaml.as_bytes()).unwrap();
        assert!(manifest.resources.is_empty());
        assert!(manifest.patches.is_empty());
        assert_eq!(manifest.generators[0].name, "cm");
        assert!(manifest.generators[0].files.is_empty());
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        assert!(Manifest::from_slice(b"resources: deployment.yaml\n").is_err());
        assert!(Manifest::from_slice(b"- just\n- a\n- list\n").is_err());
        assert!(Manifest::from_slice(b"patches:\n  - path: [a, b]\n").is_err());
    }

    #[test]
    fn test_scalars_read_as_strings() {
        let yaml = r#"
resources: [2024, v1, true]
patches:
  - path: true
  - path: 7
configMapGenerator:
  - name: 42
    files: [1.5, app.properties]
    envs: [false]
components: [10]
patchesStrategicMerge: [3]
"#;
        let manifest = Manifest::from_slice(yaml.as_bytes()).unwrap();

        assert_eq!(manifest.resources, vec!["2024", "v1", "true"]);
        assert_eq!(manifest.patches[0].path, "true");
        assert_eq!(manifest.patches[1].path, "7");
        assert_eq!(manifest.generators[0].name, "42");
        assert_eq!(manifest.generators[0].files, vec!["1.5", "app.properties"]);
        assert_eq!(manifest.generators[0].envs, vec!["false"]);
        assert_eq!(manifest.components, vec!["10"]);
        assert_eq!(manifest.patches_strategic_merge, vec!["3"]);
    }

    #[test]
    fn test_only_first_document_is_read() {
        let manifest = Manifest::from_slice(b"resources: [a.yaml]\n---\n").unwrap();
        assert_eq!(manifest.resources, vec!["a.yaml"]);

        let manifest =
            Manifest::from_slice(b"---\nresources: [a.yaml]\n---\nresources: [b.yaml]\n")
                .unwrap();
        assert_eq!(manifest.resources, vec!["a.yaml"]);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(Manifest::from_slice(b"resources: [unterminated\n").is_err());
    }
}
