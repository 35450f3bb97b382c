/// MemoryStage: prims, their attributes and transforms, held in memory.
///
/// Prims live in a SlotMap with stable keys and are addressed either by
/// key or by absolute path (`/World/cam`). Every prim except a root
/// child has a parent; world transforms compose down the parent chain.
/// Attribute values are not time-varying: every `TimeCode` addresses
/// the same value.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use glam::DMat4;
use blunda_camera::blunda::{
    AttributeDiagnostic, AttributeValue, CameraPrim, BlundaError, BlundaResult, SchemaRegistry, TimeCode,
};
use blunda_camera::blunda::schema::{attrs, types};
use blunda_camera::{blunda_debug, blunda_warn};

/// Transform operation authored by `set_matrix_transform`.
pub const TRANSFORM_OP: &str = "xformOp:transform";

new_key_type! {
    /// Stable key for a prim in a `MemoryStage`
    pub struct PrimKey;
}

struct PrimData {
    path: String,
    type_name: String,
    parent: Option<PrimKey>,
    children: Vec<PrimKey>,
    attributes: FxHashMap<String, AttributeValue>,
    /// Parent-relative transform
    local_transform: DMat4,
    /// A stronger opinion owns the transform
    transform_locked: bool,
}

/// In-memory stage.
pub struct MemoryStage {
    prims: SlotMap<PrimKey, PrimData>,
    paths: FxHashMap<String, PrimKey>,
    schemas: SchemaRegistry,
}

impl Default for MemoryStage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStage {
    /// Empty stage accepting the camera schemas.
    pub fn new() -> Self {
        Self::with_schemas(SchemaRegistry::with_camera_schemas())
    }

    /// Empty stage accepting the prim types in `schemas`.
    pub fn with_schemas(schemas: SchemaRegistry) -> Self {
        Self {
            prims: SlotMap::with_key(),
            paths: FxHashMap::default(),
            schemas,
        }
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Define a prim of `type_name` at `path`
    ///
    /// The parent must already be defined unless the prim is a root
    /// child. Defining an existing path again returns the existing key
    /// if the type matches.
    ///
    /// # Errors
    ///
    /// * `UnknownSchema` - `type_name` is not registered
    /// * `InvalidPrim` - malformed path, missing parent, or the path is
    ///   already defined with another type
    pub fn define_prim(&mut self, path: &str, type_name: &str) -> BlundaResult<PrimKey> {
        if self.schemas.find(type_name).is_none() {
            return Err(BlundaError::UnknownSchema(type_name.to_string()));
        }

        if let Some(&key) = self.paths.get(path) {
            let existing = &self.prims[key].type_name;
            if existing == type_name {
                return Ok(key);
            }
            return Err(BlundaError::InvalidPrim(format!(
                "{} is already defined as {}, cannot redefine as {}",
                path, existing, type_name
            )));
        }

        let parent_path = parent_path(path)
            .ok_or_else(|| BlundaError::InvalidPrim(format!("Malformed prim path '{}'", path)))?;

        let parent = match parent_path {
            "" => None,
            parent_path => match self.paths.get(parent_path) {
                Some(&parent) => Some(parent),
                None => {
                    return Err(BlundaError::InvalidPrim(format!(
                        "Parent {} of {} is not defined",
                        parent_path, path
                    )))
                }
            },
        };

        let key = self.prims.insert(PrimData {
            path: path.to_string(),
            type_name: type_name.to_string(),
            parent,
            children: Vec::new(),
            attributes: FxHashMap::default(),
            local_transform: DMat4::IDENTITY,
            transform_locked: false,
        });
        if let Some(parent) = parent {
            self.prims[parent].children.push(key);
        }
        self.paths.insert(path.to_string(), key);

        blunda_debug!("blunda::MemoryStage", "Defined {} prim {}", type_name, path);
        Ok(key)
    }

    pub fn len(&self) -> usize {
        self.prims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    pub fn contains(&self, key: PrimKey) -> bool {
        self.prims.contains_key(key)
    }

    pub fn key_at_path(&self, path: &str) -> Option<PrimKey> {
        self.paths.get(path).copied()
    }

    pub fn prim(&self, key: PrimKey) -> Option<MemoryPrim<'_>> {
        self.prims.contains_key(key).then_some(MemoryPrim { stage: self, key })
    }

    pub fn prim_mut(&mut self, key: PrimKey) -> Option<MemoryPrimMut<'_>> {
        if self.prims.contains_key(key) {
            Some(MemoryPrimMut { stage: self, key })
        } else {
            None
        }
    }

    pub fn prim_at_path(&self, path: &str) -> Option<MemoryPrim<'_>> {
        self.key_at_path(path).and_then(|key| self.prim(key))
    }

    pub fn prim_at_path_mut(&mut self, path: &str) -> Option<MemoryPrimMut<'_>> {
        match self.key_at_path(path) {
            Some(key) => self.prim_mut(key),
            None => None,
        }
    }

    /// Parent of `key`, `None` for root children.
    pub fn parent(&self, key: PrimKey) -> Option<PrimKey> {
        self.prims.get(key).and_then(|prim| prim.parent)
    }

    pub fn children(&self, key: PrimKey) -> &[PrimKey] {
        self.prims.get(key).map(|prim| prim.children.as_slice()).unwrap_or(&[])
    }

    /// Mark the prim's transform as governed by a stronger opinion.
    ///
    /// Returns false if the key is invalid.
    pub fn lock_transform(&mut self, key: PrimKey) -> bool {
        match self.prims.get_mut(key) {
            Some(prim) => {
                prim.transform_locked = true;
                true
            }
            None => false,
        }
    }

    pub fn is_transform_locked(&self, key: PrimKey) -> bool {
        self.prims.get(key).is_some_and(|prim| prim.transform_locked)
    }

    /// Set the parent-relative transform directly, bypassing the lock.
    ///
    /// Returns false if the key is invalid.
    pub fn set_local_transform(&mut self, key: PrimKey, transform: DMat4) -> bool {
        match self.prims.get_mut(key) {
            Some(prim) => {
                prim.local_transform = transform;
                true
            }
            None => false,
        }
    }

    /// Remove an authored attribute, returning its value.
    pub fn remove_attribute(&mut self, key: PrimKey, name: &str) -> Option<AttributeValue> {
        self.prims.get_mut(key).and_then(|prim| prim.attributes.remove(name))
    }

    pub fn local_transform(&self, key: PrimKey) -> Option<DMat4> {
        self.prims.get(key).map(|prim| prim.local_transform)
    }

    /// Prim-to-world transform: every ancestor's local transform, root
    /// first, then the prim's own.
    pub fn local_to_world(&self, key: PrimKey) -> DMat4 {
        let mut world = DMat4::IDENTITY;
        let mut current = self.prims.get(key);
        while let Some(prim) = current {
            world = prim.local_transform * world;
            current = prim.parent.and_then(|parent| self.prims.get(parent));
        }
        world
    }

    /// Transform of the prim's parent, identity for root children.
    pub fn parent_to_world(&self, key: PrimKey) -> DMat4 {
        match self.parent(key) {
            Some(parent) => self.local_to_world(parent),
            None => DMat4::IDENTITY,
        }
    }

    fn data(&self, key: PrimKey) -> &PrimData {
        &self.prims[key]
    }

    fn data_mut(&mut self, key: PrimKey) -> &mut PrimData {
        &mut self.prims[key]
    }
}

/// `""` for root children, `None` for malformed paths.
fn parent_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() || rest.split('/').any(str::is_empty) {
        return None;
    }
    path.rfind('/').map(|index| &path[..index])
}

// ===== PRIM HANDLES =====

/// Read-only view of one prim.
#[derive(Clone, Copy)]
pub struct MemoryPrim<'a> {
    stage: &'a MemoryStage,
    key: PrimKey,
}

impl<'a> MemoryPrim<'a> {
    pub fn key(&self) -> PrimKey {
        self.key
    }

    pub fn path(&self) -> &'a str {
        &self.stage.data(self.key).path
    }

    pub fn type_name(&self) -> &'a str {
        &self.stage.data(self.key).type_name
    }

    pub fn attribute(&self, name: &str) -> Option<&'a AttributeValue> {
        self.stage.data(self.key).attributes.get(name)
    }

    /// Authored attribute names, sorted.
    pub fn attribute_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self.stage.data(self.key).attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn local_to_world(&self) -> DMat4 {
        self.stage.local_to_world(self.key)
    }
}

/// Mutable view of one prim; the stage-side implementation of `CameraPrim`.
pub struct MemoryPrimMut<'a> {
    stage: &'a mut MemoryStage,
    key: PrimKey,
}

impl<'a> MemoryPrimMut<'a> {
    pub fn key(&self) -> PrimKey {
        self.key
    }

    /// Read-only view of the same prim.
    pub fn as_prim(&self) -> MemoryPrim<'_> {
        MemoryPrim { stage: &*self.stage, key: self.key }
    }
}

impl<'a> CameraPrim for MemoryPrimMut<'a> {
    fn path(&self) -> &str {
        &self.stage.data(self.key).path
    }

    fn type_name(&self) -> &str {
        &self.stage.data(self.key).type_name
    }

    fn attribute(&self, name: &str, _time: TimeCode) -> std::result::Result<AttributeValue, AttributeDiagnostic> {
        let prim = self.stage.data(self.key);
        prim.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| AttributeDiagnostic::Missing {
                attribute: name.to_string(),
                prim: prim.path.clone(),
            })
    }

    /// An attribute keeps the value type of its first write.
    fn set_attribute(&mut self, name: &str, value: AttributeValue, _time: TimeCode) -> BlundaResult<()> {
        let prim = self.stage.data_mut(self.key);

        if let Some(existing) = prim.attributes.get(name) {
            if existing.type_name() != value.type_name() {
                blunda_warn!(
                    "blunda::MemoryStage",
                    "Rejected {} value for {} attribute {} on {}",
                    value.type_name(), existing.type_name(), name, prim.path
                );
                return Err(BlundaError::AttributeWriteFailed(format!(
                    "{}.{} holds {}, cannot store {}",
                    prim.path, name, existing.type_name(), value.type_name()
                )));
            }
        }

        prim.attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn compute_local_to_world(&self, _time: TimeCode) -> DMat4 {
        self.stage.local_to_world(self.key)
    }

    fn compute_parent_to_world(&self, _time: TimeCode) -> DMat4 {
        self.stage.parent_to_world(self.key)
    }

    fn set_matrix_transform(&mut self, matrix: DMat4, time: TimeCode) -> BlundaResult<()> {
        let (path, type_name, locked) = {
            let prim = self.stage.data(self.key);
            (prim.path.clone(), prim.type_name.clone(), prim.transform_locked)
        };

        if !self.stage.schemas.is_a(&type_name, types::XFORMABLE) {
            return Err(BlundaError::InvalidPrim(format!("{} ({}) is not transformable", path, type_name)));
        }
        if locked {
            return Err(BlundaError::TransformBlocked(format!(
                "The transform of {} is governed by a stronger opinion",
                path
            )));
        }

        self.set_attribute(attrs::XFORM_OP_ORDER, AttributeValue::Token(TRANSFORM_OP.to_string()), time)?;
        self.stage.data_mut(self.key).local_transform = matrix;
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_stage_tests.rs"]
mod tests;
