//! JSON Type Definition (RFC 8927) validation of incoming events.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::ValidationError;

const EMBEDDED_SCHEMA: &str = include_str!("../schemas/event.jtd.json");

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed JSON that is not a valid JTD schema
    #[error("invalid JTD schema: {0}")]
    Invalid(String),

    /// The validator gave up, e.g. on reference depth
    #[error("validation aborted: {0}")]
    Validate(String),
}

/// A compiled, checked event schema.
#[derive(Debug, Clone)]
pub struct EventSchema {
    schema: jtd::Schema,
}

impl EventSchema {
    /// The schema shipped with this crate.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_json_str(EMBEDDED_SCHEMA)
    }

    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        let serde_schema: jtd::SerdeSchema = serde_json::from_str(source)?;
        let schema = jtd::Schema::from_serde_schema(serde_schema)
            .map_err(|e| SchemaError::Invalid(format!("{:?}", e)))?;
        schema
            .validate()
            .map_err(|e| SchemaError::Invalid(format!("{:?}", e)))?;

        Ok(Self { schema })
    }

    /// Check `instance` against the schema. An empty list means it conforms.
    pub fn validate(&self, instance: &Value) -> Result<Vec<ValidationError>, SchemaError> {
        let indicators = jtd::validate(&self.schema, instance, jtd::ValidateOptions::default())
            .map_err(|e| SchemaError::Validate(format!("{:?}", e)))?;

        let errors: Vec<ValidationError> = indicators
            .into_iter()
            .map(|indicator| ValidationError {
                instance_path: json_pointer(&indicator.instance_path),
                schema_path: json_pointer(&indicator.schema_path),
            })
            .collect();

        debug!(errors = errors.len(), "Validated event against schema");
        Ok(errors)
    }
}

/// Join path tokens into an RFC 6901 pointer ("" for the root).
fn json_pointer<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().fold(String::new(), |mut pointer, token| {
        pointer.push('/');
        pointer.push_str(&token.as_ref().replace('~', "~0").replace('/', "~1"));
        pointer
    })
}
