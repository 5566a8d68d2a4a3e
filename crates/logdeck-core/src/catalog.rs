//! Process catalog backed by the `apps` section of the configuration.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::ports::{AppLogPaths, ProcessCatalog};

/// A fixed set of apps, listed in name order.
#[derive(Debug, Clone, Default)]
pub struct StaticProcessCatalog {
    apps: BTreeMap<String, AppLogPaths>,
}

impl StaticProcessCatalog {
    pub fn new(apps: impl IntoIterator<Item = AppLogPaths>) -> Self {
        Self {
            apps: apps
                .into_iter()
                .map(|app| (app.name.clone(), app))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[async_trait]
impl ProcessCatalog for StaticProcessCatalog {
    async fn list(&self) -> Vec<AppLogPaths> {
        self.apps.values().cloned().collect()
    }

    async fn describe(&self, name: &str) -> Option<AppLogPaths> {
        self.apps.get(name).cloned()
    }
}
