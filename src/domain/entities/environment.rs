use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: u64,
    pub api_key: String,
    pub name: String,
    #[serde(default)]
    pub project: Option<u64>,
}

impl Environment {
    pub fn new(id: u64, api_key: String, name: String) -> Self {
        Self {
            id,
            api_key,
            name,
            project: None,
        }
    }
}

/// Lookup of loaded environments by their client-side API key.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentDirectory {
    ids_by_key: HashMap<String, u64>,
}

impl EnvironmentDirectory {
    pub fn new(environments: Vec<Environment>) -> Self {
        Self {
            ids_by_key: environments
                .into_iter()
                .map(|env| (env.api_key, env.id))
                .collect(),
        }
    }

    pub fn id_for_key(&self, api_key: &str) -> Option<u64> {
        self.ids_by_key.get(api_key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_key.is_empty()
    }
}
