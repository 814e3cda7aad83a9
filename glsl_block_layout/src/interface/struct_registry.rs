/// Struct definitions and the definition registry
///
/// Struct types are stored in an arena and referenced by key. Variables and
/// other structs refer to a definition through its [`StructKey`], never by
/// owning it directly, which keeps the representation acyclic and lets the
/// layout calculator detect self-referential declarations with a simple
/// visited check.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::interface::Variable;

new_key_type! {
    /// Key referencing a [`StructDef`] inside a [`StructRegistry`]
    pub struct StructKey;
}

/// A named GLSL `struct`: an ordered sequence of member variables
///
/// Member order is significant — layout offsets depend on declaration order —
/// and is never reordered.
#[derive(Debug, Clone)]
pub struct StructDef {
    name: String,
    members: Vec<Variable>,
}

impl StructDef {
    /// Create a struct definition, validating its member list
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStruct`] if `members` is empty
    /// - [`Error::NameCollision`] if two members share a name
    pub fn new(name: impl Into<String>, members: Vec<Variable>) -> Result<Self> {
        let name = name.into();
        if members.is_empty() {
            return Err(Error::EmptyStruct(name));
        }
        let mut seen = FxHashMap::default();
        for (i, member) in members.iter().enumerate() {
            if seen.insert(member.name().to_string(), i).is_some() {
                return Err(Error::NameCollision {
                    scope: name,
                    name: member.name().to_string(),
                });
            }
        }
        Ok(Self { name, members })
    }

    /// The struct's declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order
    pub fn members(&self) -> &[Variable] {
        &self.members
    }

    /// Look up a member by name
    pub fn member(&self, name: &str) -> Option<&Variable> {
        self.members.iter().find(|m| m.name() == name)
    }
}

/// Arena of struct definitions, indexed by [`StructKey`] and by name
#[derive(Debug, Default)]
pub struct StructRegistry {
    defs: SlotMap<StructKey, StructDef>,
    names: FxHashMap<String, StructKey>,
}

impl StructRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            defs: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Register a struct definition, returning its key
    ///
    /// # Errors
    ///
    /// [`Error::NameCollision`] if a struct with the same name is already
    /// registered.
    pub fn register(&mut self, def: StructDef) -> Result<StructKey> {
        if self.names.contains_key(def.name()) {
            return Err(Error::NameCollision {
                scope: "struct registry".to_string(),
                name: def.name().to_string(),
            });
        }
        let name = def.name().to_string();
        let key = self.defs.insert(def);
        self.names.insert(name, key);
        Ok(key)
    }

    /// Reserve a key for a struct whose members are supplied later
    ///
    /// Forward declaration: the key can be referenced by other definitions
    /// before [`define`](Self::define) fills in the member list. Laying out
    /// a block that reaches a still-undefined struct fails with
    /// [`Error::EmptyStruct`].
    pub fn declare(&mut self, name: impl Into<String>) -> Result<StructKey> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(Error::NameCollision {
                scope: "struct registry".to_string(),
                name,
            });
        }
        let key = self.defs.insert(StructDef {
            name: name.clone(),
            members: Vec::new(),
        });
        self.names.insert(name, key);
        Ok(key)
    }

    /// Supply the member list for a previously declared struct
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownType`] if `key` is not in this registry
    /// - [`Error::NameCollision`] if the struct is already defined
    /// - the [`StructDef::new`] validation errors for the member list
    pub fn define(&mut self, key: StructKey, members: Vec<Variable>) -> Result<()> {
        let name = match self.defs.get(key) {
            Some(def) if def.members.is_empty() => def.name.clone(),
            Some(def) => {
                return Err(Error::NameCollision {
                    scope: "struct registry".to_string(),
                    name: def.name.clone(),
                })
            }
            None => {
                return Err(Error::UnknownType(
                    "unregistered struct reference".to_string(),
                ))
            }
        };
        self.defs[key] = StructDef::new(name, members)?;
        Ok(())
    }

    /// Fetch a definition by key
    pub fn get(&self, key: StructKey) -> Option<&StructDef> {
        self.defs.get(key)
    }

    /// Find a registered struct's key by name
    pub fn lookup(&self, name: &str) -> Option<StructKey> {
        self.names.get(name).copied()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
#[path = "struct_registry_tests.rs"]
mod tests;
