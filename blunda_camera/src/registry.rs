/// Registries: host-owned lookup tables for enum tokens and schemas.
///
/// Nothing registers itself. The host builds a registry (usually with
/// `with_camera_enums()` / `with_camera_schemas()`) at startup and passes
/// it to the code that needs it.

use std::any::TypeId;
use rustc_hash::FxHashMap;
use crate::camera::{FovDirection, Projection};
use crate::error::{BlundaError, BlundaResult};
use crate::schema::{self, tokens, types};

// ===== ENUM REGISTRY =====

/// An enum whose variants can be stored in an `EnumRegistry`.
pub trait RegisteredEnum: Copy + 'static {
    /// Stable index of this variant.
    fn to_index(self) -> u32;

    /// Variant for an index produced by `to_index`.
    fn from_index(index: u32) -> Option<Self>;
}

impl RegisteredEnum for Projection {
    fn to_index(self) -> u32 {
        match self {
            Projection::Perspective => 0,
            Projection::Orthographic => 1,
        }
    }

    fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Projection::Perspective),
            1 => Some(Projection::Orthographic),
            _ => None,
        }
    }
}

impl RegisteredEnum for FovDirection {
    fn to_index(self) -> u32 {
        match self {
            FovDirection::Horizontal => 0,
            FovDirection::Vertical => 1,
        }
    }

    fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(FovDirection::Horizontal),
            1 => Some(FovDirection::Vertical),
            _ => None,
        }
    }
}

/// Two-way table between enum variants and their string tokens.
///
/// Names are scoped per enum type, so two enums may both use a token.
#[derive(Debug, Default, Clone)]
pub struct EnumRegistry {
    names: FxHashMap<(TypeId, u32), String>,
    values: FxHashMap<(TypeId, String), u32>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the camera's projection and field-of-view direction tokens.
    pub fn with_camera_enums() -> Self {
        let mut registry = Self::new();
        registry.register(Projection::Perspective, tokens::PERSPECTIVE);
        registry.register(Projection::Orthographic, tokens::ORTHOGRAPHIC);
        registry.register(FovDirection::Horizontal, tokens::FOV_HORIZONTAL);
        registry.register(FovDirection::Vertical, tokens::FOV_VERTICAL);
        registry
    }

    /// Associate `value` with `name`.
    ///
    /// Replaces any previous name of `value`. A variant of the same type
    /// that held `name` loses it and is left unnamed.
    pub fn register<T: RegisteredEnum>(&mut self, value: T, name: &str) {
        let type_id = TypeId::of::<T>();
        let index = value.to_index();

        if let Some(&owner) = self.values.get(&(type_id, name.to_string())) {
            if owner != index {
                self.names.remove(&(type_id, owner));
                crate::blunda_debug!(
                    "blunda::EnumRegistry",
                    "{} variant {} lost name '{}' to variant {}",
                    std::any::type_name::<T>(),
                    owner,
                    name,
                    index
                );
            }
        }

        if let Some(previous) = self.names.insert((type_id, index), name.to_string()) {
            let previous_key = (type_id, previous);
            if self.values.get(&previous_key) == Some(&index) {
                self.values.remove(&previous_key);
            }
            crate::blunda_debug!(
                "blunda::EnumRegistry",
                "Renamed {} variant {} from '{}' to '{}'",
                std::any::type_name::<T>(),
                index,
                previous_key.1,
                name
            );
        }
        self.values.insert((type_id, name.to_string()), index);
    }

    /// Token registered for `value`.
    pub fn name_of<T: RegisteredEnum>(&self, value: T) -> Option<&str> {
        self.names
            .get(&(TypeId::of::<T>(), value.to_index()))
            .map(String::as_str)
    }

    /// Variant registered under `name`.
    pub fn value_of<T: RegisteredEnum>(&self, name: &str) -> Option<T> {
        self.values
            .get(&(TypeId::of::<T>(), name.to_string()))
            .and_then(|&index| T::from_index(index))
    }

    /// Number of registered variants across all enum types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ===== SCHEMA REGISTRY =====

/// Metadata for one prim type.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInfo {
    pub type_name: &'static str,
    pub base: Option<&'static str>,
    pub local_attributes: &'static [&'static str],
}

/// Prim type name to schema metadata.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: FxHashMap<&'static str, SchemaInfo>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `Xformable`, `Xform`, `Camera` and `BlundaCamera`.
    pub fn with_camera_schemas() -> Self {
        let mut registry = Self::new();
        registry.register(SchemaInfo {
            type_name: types::XFORMABLE,
            base: None,
            local_attributes: schema::XFORMABLE_ATTRIBUTES,
        });
        registry.register(SchemaInfo {
            type_name: types::XFORM,
            base: Some(types::XFORMABLE),
            local_attributes: &[],
        });
        registry.register(SchemaInfo {
            type_name: types::CAMERA,
            base: Some(types::XFORMABLE),
            local_attributes: schema::CAMERA_ATTRIBUTES,
        });
        registry.register(SchemaInfo {
            type_name: types::BLUNDA_CAMERA,
            base: Some(types::CAMERA),
            local_attributes: schema::BLUNDA_CAMERA_ATTRIBUTES,
        });
        registry
    }

    pub fn register(&mut self, info: SchemaInfo) {
        self.schemas.insert(info.type_name, info);
    }

    pub fn find(&self, type_name: &str) -> Option<&SchemaInfo> {
        self.schemas.get(type_name)
    }

    /// Attribute names of `type_name`; with `include_inherited`, the base
    /// chain's names come first, root-most base first.
    pub fn attribute_names(&self, type_name: &str, include_inherited: bool) -> BlundaResult<Vec<&'static str>> {
        let info = self.lookup(type_name)?;

        if !include_inherited {
            return Ok(info.local_attributes.to_vec());
        }

        let mut chain = vec![info];
        let mut current = info;
        while let Some(base) = current.base {
            current = self.lookup(base)?;
            chain.push(current);
        }

        Ok(chain
            .iter()
            .rev()
            .flat_map(|info| info.local_attributes.iter().copied())
            .collect())
    }

    /// `true` if `type_name` is `ancestor` or derives from it.
    pub fn is_a(&self, type_name: &str, ancestor: &str) -> bool {
        let mut current = self.find(type_name);
        while let Some(info) = current {
            if info.type_name == ancestor {
                return true;
            }
            current = info.base.and_then(|base| self.find(base));
        }
        false
    }

    fn lookup(&self, type_name: &str) -> BlundaResult<&SchemaInfo> {
        self.find(type_name)
            .ok_or_else(|| BlundaError::UnknownSchema(type_name.to_string()))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
