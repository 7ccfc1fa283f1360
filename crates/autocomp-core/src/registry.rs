//! Component registry
//!
//! The registry owns the component path set and everything derived from it.
//! The name map is rebuilt from scratch whenever the path set changes, so it
//! is always a pure function of the paths and the options.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use autocomp_fs::NormalizedPath;

use crate::config::ResolvedOptions;
use crate::imports::ImportInfo;
use crate::naming::derive_name;

#[derive(Debug, Default)]
pub struct Registry {
    /// Insertion order decides collisions.
    paths: Vec<NormalizedPath>,
    index: HashSet<NormalizedPath>,
    names: BTreeMap<String, ImportInfo>,
    custom: BTreeMap<String, ImportInfo>,
    usage: BTreeMap<NormalizedPath, BTreeSet<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add component paths. Returns `true` when the path set changed.
    pub fn add_components<I>(&mut self, paths: I, options: &ResolvedOptions) -> bool
    where
        I: IntoIterator<Item = NormalizedPath>,
    {
        let before = self.paths.len();
        for path in paths {
            if self.index.insert(path.clone()) {
                self.paths.push(path);
            }
        }
        let changed = self.paths.len() != before;
        if changed {
            self.rebuild(options);
        }
        changed
    }

    /// Remove component paths. Returns `true` when the path set changed.
    pub fn remove_components<I>(&mut self, paths: I, options: &ResolvedOptions) -> bool
    where
        I: IntoIterator<Item = NormalizedPath>,
    {
        let before = self.paths.len();
        for path in paths {
            if self.index.remove(&path) {
                self.paths.retain(|p| p != &path);
            }
        }
        let changed = self.paths.len() != before;
        if changed {
            self.rebuild(options);
        }
        changed
    }

    /// Register a component by hand. Entries with an empty alias are ignored.
    pub fn add_custom_component(&mut self, info: ImportInfo) {
        if info.alias.is_empty() {
            return;
        }
        self.custom.insert(info.alias.clone(), info);
    }

    /// Record that `consumer` references `names`.
    pub fn update_usage_map<I>(&mut self, consumer: &NormalizedPath, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.usage.entry(consumer.clone()).or_default().extend(names);
    }

    /// Rebuild the name map from the current path set.
    pub fn rebuild(&mut self, options: &ResolvedOptions) {
        self.names.clear();

        for path in &self.paths {
            if !options.filter.matches(path.as_str()) {
                continue;
            }
            let name = derive_name(path, options);

            if let Some(existing) = self.names.get(&name) {
                if !options.allow_overrides {
                    tracing::warn!(
                        %name,
                        %path,
                        existing = %existing.from,
                        "Component has naming conflicts with other components, ignored"
                    );
                    continue;
                }
            }

            self.names
                .insert(name.clone(), ImportInfo::local(name, path.as_str()));
        }

        tracing::debug!(
            paths = self.paths.len(),
            names = self.names.len(),
            "Rebuilt component name map"
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&ImportInfo> {
        self.names.get(name)
    }

    pub fn component_paths(&self) -> &[NormalizedPath] {
        &self.paths
    }

    pub fn contains(&self, path: &NormalizedPath) -> bool {
        self.index.contains(path)
    }

    pub fn name_map(&self) -> &BTreeMap<String, ImportInfo> {
        &self.names
    }

    pub fn custom_map(&self) -> &BTreeMap<String, ImportInfo> {
        &self.custom
    }

    /// Name map and custom map combined; custom entries win.
    pub fn all_components(&self) -> BTreeMap<String, ImportInfo> {
        let mut all = self.names.clone();
        all.extend(self.custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        all
    }

    pub fn usage_of(&self, consumer: &NormalizedPath) -> Option<&BTreeSet<String>> {
        self.usage.get(consumer)
    }

    /// Consumers whose usage set contains `name`, in path order.
    pub fn consumers_of(&self, name: &str) -> Vec<&NormalizedPath> {
        self.usage
            .iter()
            .filter(|(_, names)| names.contains(name))
            .map(|(consumer, _)| consumer)
            .collect()
    }
}
