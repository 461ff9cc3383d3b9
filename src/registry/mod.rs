//! Type registry
//!
//! The registry is the statically declared set of autocomplete types known to
//! the process. It is populated once at startup through [`RegistryBuilder`]
//! and never changes afterwards, so every listing it produces is stable.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynac::registry::TypeRegistry;
//! use dynac::types::StaticListType;
//!
//! let registry = TypeRegistry::builder()
//!     .register(Arc::new(StaticListType::new("mentions", "People")))
//!     .register(Arc::new(StaticListType::new("tags", "Tags")))
//!     .build()
//!     .unwrap();
//!
//! for (alias, descriptor) in registry.list_types() {
//!     println!("{alias}: {}", descriptor.label);
//! }
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::TypeConfig;
use crate::error::{RegistryError, Result};
use crate::types::{AutocompleteOption, AutocompleteType, StaticListType};

/// Descriptor of one registered type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Unique alias
    pub alias: String,
    /// Display label
    pub label: String,
}

impl TypeDescriptor {
    /// Read and validate the descriptor of a type
    ///
    /// An alias must be non-empty and free of whitespace since it doubles as
    /// the trigger symbol; a label must be non-empty.
    pub fn from_type(ty: &dyn AutocompleteType) -> std::result::Result<Self, RegistryError> {
        let alias = ty.alias();
        if alias.is_empty() || alias.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidAlias(alias.to_string()));
        }

        let label = ty.label();
        if label.trim().is_empty() {
            return Err(RegistryError::InvalidLabel {
                alias: alias.to_string(),
            });
        }

        Ok(Self {
            alias: alias.to_string(),
            label: label.to_string(),
        })
    }
}

/// Collects types before they are validated into a [`TypeRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    types: Vec<Arc<dyn AutocompleteType>>,
}

impl RegistryBuilder {
    /// Register a type
    pub fn register(mut self, ty: Arc<dyn AutocompleteType>) -> Self {
        self.types.push(ty);
        self
    }

    /// Register several types at once, in iteration order
    pub fn register_all<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn AutocompleteType>>,
    {
        self.types.extend(types);
        self
    }

    /// Register one static list type per configuration entry
    pub fn register_configured(self, types: &[TypeConfig]) -> Self {
        self.register_all(types.iter().map(|config| {
            Arc::new(StaticListType::from_config(config)) as Arc<dyn AutocompleteType>
        }))
    }

    /// Validate every type and build the registry
    ///
    /// # Returns
    /// * `Result<TypeRegistry>` - Registry, or the first configuration error
    ///   (malformed descriptor or duplicate alias)
    pub fn build(self) -> Result<TypeRegistry> {
        let mut types: IndexMap<String, Arc<dyn AutocompleteType>> =
            IndexMap::with_capacity(self.types.len());

        for ty in self.types {
            let descriptor = TypeDescriptor::from_type(ty.as_ref())?;
            if types.contains_key(&descriptor.alias) {
                return Err(RegistryError::DuplicateAlias(descriptor.alias).into());
            }
            debug!("Registered autocomplete type '{}'", descriptor.alias);
            types.insert(descriptor.alias, ty);
        }

        Ok(TypeRegistry { types })
    }
}

/// Immutable mapping from alias to type implementation
pub struct TypeRegistry {
    types: IndexMap<String, Arc<dyn AutocompleteType>>,
}

impl TypeRegistry {
    /// Start declaring a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// List every registered type as alias -> descriptor, in registration order
    ///
    /// Descriptors are fresh values on every call.
    pub fn list_types(&self) -> IndexMap<String, TypeDescriptor> {
        self.types
            .iter()
            .map(|(alias, ty)| {
                (
                    alias.clone(),
                    TypeDescriptor {
                        alias: alias.clone(),
                        label: ty.label().to_string(),
                    },
                )
            })
            .collect()
    }

    /// Check whether an alias is registered
    pub fn contains(&self, alias: &str) -> bool {
        self.types.contains_key(alias)
    }

    /// Get the type registered under an alias
    pub fn get(&self, alias: &str) -> Option<&Arc<dyn AutocompleteType>> {
        self.types.get(alias)
    }

    /// Registered aliases in registration order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Run the search of a single type
    ///
    /// # Arguments
    /// * `alias` - Registered alias
    /// * `query` - Search text
    ///
    /// # Returns
    /// * `Result<Vec<AutocompleteOption>>` - The type's options, or
    ///   `UnknownAlias` if nothing is registered under `alias`
    pub async fn search(&self, alias: &str, query: &str) -> Result<Vec<AutocompleteOption>> {
        let ty = self
            .get(alias)
            .ok_or_else(|| RegistryError::UnknownAlias(alias.to_string()))?;
        ty.search(query).await
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("aliases", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
