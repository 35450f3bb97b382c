//! Flattened data-source providers
//!
//! A flattened data source is a prim's data with what it inherits from
//! its ancestors already composed in: world transforms, inherited
//! visibility, model information. Each kind of data is flattened by a
//! provider registered under the name of the data it owns. Imaging uses
//! the base providers plus a `model` provider layered over them.

use std::sync::{Arc, OnceLock};
use glam::DMat4;
use rustc_hash::FxHashMap;
use crate::prim_io::AttributeValue;

/// Provider names
pub mod names {
    pub const XFORM: &str = "xform";
    pub const VISIBILITY: &str = "visibility";
    pub const MODEL: &str = "model";
}

/// Entry names used by the built-in providers
pub mod keys {
    pub const MATRIX: &str = "matrix";
    pub const RESET_XFORM_STACK: &str = "resetXformStack";
    pub const VISIBILITY: &str = "visibility";
    pub const VISIBLE: &str = "visible";
    pub const INVISIBLE: &str = "invisible";
}

// ===== DATA CONTAINER =====

/// Named values for one kind of prim data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContainer {
    entries: FxHashMap<String, AttributeValue>,
}

impl DataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: AttributeValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: AttributeValue) {
        self.entries.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of both containers; `strong` wins where both have an entry.
    pub fn overlay(strong: &DataContainer, weak: &DataContainer) -> DataContainer {
        let mut entries = weak.entries.clone();
        for (name, value) in &strong.entries {
            entries.insert(name.clone(), value.clone());
        }
        DataContainer { entries }
    }

    fn matrix(&self, name: &str) -> Option<DMat4> {
        match self.get(name) {
            Some(AttributeValue::Matrix4d(m)) => Some(*m),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(AttributeValue::Bool(true)))
    }

    fn token(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(AttributeValue::Token(t)) => Some(t.as_str()),
            _ => None,
        }
    }
}

// ===== PROVIDERS =====

/// Composes a prim's own data with its parent's flattened data.
pub trait FlattenedDataSourceProvider: Send + Sync {
    /// `local` is the prim's own data, `parent` the parent's already
    /// flattened data. `None` means the prim has nothing of this kind.
    fn flatten(
        &self,
        local: Option<&DataContainer>,
        parent: Option<&DataContainer>,
    ) -> Option<DataContainer>;
}

/// World transform: parent matrix times local matrix, unless the prim
/// resets the transform stack.
pub struct FlattenedXformProvider;

impl FlattenedDataSourceProvider for FlattenedXformProvider {
    fn flatten(
        &self,
        local: Option<&DataContainer>,
        parent: Option<&DataContainer>,
    ) -> Option<DataContainer> {
        if local.is_none() && parent.is_none() {
            return None;
        }

        let local_matrix = local.and_then(|l| l.matrix(keys::MATRIX)).unwrap_or(DMat4::IDENTITY);
        let resets = local.is_some_and(|l| l.flag(keys::RESET_XFORM_STACK));

        let world = match parent.and_then(|p| p.matrix(keys::MATRIX)) {
            Some(parent_matrix) if !resets => parent_matrix * local_matrix,
            _ => local_matrix,
        };

        // Flattened matrices are absolute
        Some(
            DataContainer::new()
                .with(keys::MATRIX, AttributeValue::Matrix4d(world))
                .with(keys::RESET_XFORM_STACK, AttributeValue::Bool(true)),
        )
    }
}

/// Visibility: an invisible ancestor hides every descendant.
pub struct FlattenedVisibilityProvider;

impl FlattenedDataSourceProvider for FlattenedVisibilityProvider {
    fn flatten(
        &self,
        local: Option<&DataContainer>,
        parent: Option<&DataContainer>,
    ) -> Option<DataContainer> {
        if local.is_none() && parent.is_none() {
            return None;
        }

        let parent_invisible = parent.and_then(|p| p.token(keys::VISIBILITY)) == Some(keys::INVISIBLE);
        let local_invisible = local.and_then(|l| l.token(keys::VISIBILITY)) == Some(keys::INVISIBLE);

        let visibility = if parent_invisible || local_invisible {
            keys::INVISIBLE
        } else {
            keys::VISIBLE
        };

        Some(DataContainer::new().with(keys::VISIBILITY, AttributeValue::Token(visibility.to_string())))
    }
}

/// Model information: the prim's own entries over the inherited ones.
pub struct FlattenedModelProvider;

impl FlattenedDataSourceProvider for FlattenedModelProvider {
    fn flatten(
        &self,
        local: Option<&DataContainer>,
        parent: Option<&DataContainer>,
    ) -> Option<DataContainer> {
        match (local, parent) {
            (Some(local), Some(parent)) => Some(DataContainer::overlay(local, parent)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

// ===== PROVIDER TABLE =====

/// Provider name to provider.
#[derive(Clone, Default)]
pub struct FlattenedProviders {
    providers: FxHashMap<String, Arc<dyn FlattenedDataSourceProvider>>,
}

impl FlattenedProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// The providers every flattening scene index carries.
    pub fn base() -> Self {
        let mut providers = Self::new();
        providers.insert(names::XFORM, Arc::new(FlattenedXformProvider));
        providers.insert(names::VISIBILITY, Arc::new(FlattenedVisibilityProvider));
        providers
    }

    pub fn insert(&mut self, name: &str, provider: Arc<dyn FlattenedDataSourceProvider>) {
        self.providers.insert(name.to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FlattenedDataSourceProvider>> {
        self.providers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Sorted provider names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Union of both tables; `strong` wins where both name a provider.
    pub fn overlay(strong: &FlattenedProviders, weak: &FlattenedProviders) -> FlattenedProviders {
        let mut providers = weak.providers.clone();
        for (name, provider) in &strong.providers {
            providers.insert(name.clone(), Arc::clone(provider));
        }
        FlattenedProviders { providers }
    }

    /// Flatten `name` data with the provider registered for it.
    ///
    /// Data nobody provides for is not inherited: the local data is
    /// returned as-is.
    pub fn flatten(
        &self,
        name: &str,
        local: Option<&DataContainer>,
        parent: Option<&DataContainer>,
    ) -> Option<DataContainer> {
        match self.get(name) {
            Some(provider) => provider.flatten(local, parent),
            None => local.cloned(),
        }
    }
}

/// Providers used by scene imaging: `model` layered over `base()`.
pub fn imaging_flattened_providers() -> &'static FlattenedProviders {
    static PROVIDERS: OnceLock<FlattenedProviders> = OnceLock::new();

    PROVIDERS.get_or_init(|| {
        let mut imaging = FlattenedProviders::new();
        imaging.insert(names::MODEL, Arc::new(FlattenedModelProvider));
        FlattenedProviders::overlay(&imaging, &FlattenedProviders::base())
    })
}

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod tests;
