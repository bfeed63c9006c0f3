use super::query::{Operation, Root};
use crate::error::{Error, Result};

use serde::Deserialize;
use std::collections::HashSet;

/// Root fields the Share node exposes, as reported by introspection.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    queries: HashSet<String>,
    mutations: HashSet<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawType>,
    mutation_type: Option<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    #[serde(default)]
    fields: Option<Vec<RawField>>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
}

impl Schema {
    pub fn from_introspection(value: serde_json::Value) -> Result<Self> {
        let raw: RawSchema = serde_json::from_value(value)
            .map_err(|err| Error::Schema(format!("Failed to read introspection result: {err}")))?;

        Ok(Self {
            queries: field_names(raw.query_type),
            mutations: field_names(raw.mutation_type),
        })
    }

    pub(crate) fn ensure(&self, op: &Operation) -> Result<()> {
        let (fields, kind) = match op.root {
            Root::Query => (&self.queries, "query"),
            Root::Mutation => (&self.mutations, "mutation"),
        };

        if fields.contains(op.field) {
            Ok(())
        } else {
            Err(Error::Schema(format!(
                "Share node has no {kind} field `{}`",
                op.field
            )))
        }
    }
}

fn field_names(ty: Option<RawType>) -> HashSet<String> {
    ty.and_then(|t| t.fields)
        .unwrap_or_default()
        .into_iter()
        .map(|f| f.name)
        .collect()
}
