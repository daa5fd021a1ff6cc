//! Declarative type schemas.
//!
//! A [`TypeSchema`] is a lookup table from type name to the expected child
//! shape of nodes of that type: an object with typed properties, a dictionary
//! of one value type, or a list of one item type. Child slots additionally
//! say whether a cross-reference is legal there. Both the resolver and the
//! walker are driven entirely by these tables — there is no per-type code.

use std::collections::HashMap;

pub mod oas3;

/// A registry of type definitions, fixed for the duration of a traversal.
#[derive(Default)]
pub struct TypeSchema {
    types: HashMap<String, TypeDef>,
}

/// One named type and its child shape.
pub struct TypeDef {
    name: String,
    shape: TypeShape,
}

/// The child shape of a type.
pub enum TypeShape {
    /// Mapping with individually declared properties; undeclared properties
    /// are opaque to the traversal.
    Object { properties: Vec<PropDef> },
    /// Mapping whose every value shares one slot ("dictionary of type").
    Map { value: ChildSlot },
    /// Sequence whose every item shares one slot.
    List { item: ChildSlot },
}

/// A declared object property.
pub struct PropDef {
    pub name: String,
    pub slot: ChildSlot,
}

/// What may appear in a child position.
#[derive(Clone)]
pub struct ChildSlot {
    /// Type of the child, or `None` for plain scalar content.
    pub type_name: Option<String>,
    /// Whether a reference node is legal in this position.
    pub referenceable: bool,
}

impl ChildSlot {
    /// Plain scalar content.
    pub fn scalar() -> Self {
        Self {
            type_name: None,
            referenceable: false,
        }
    }

    /// Scalar content that may be written as a reference (e.g. a markdown
    /// description pulled from another file).
    pub fn scalar_reference() -> Self {
        Self {
            type_name: None,
            referenceable: true,
        }
    }

    /// Inline child of the given type.
    pub fn of(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            referenceable: false,
        }
    }

    /// Child of the given type that may be written as a reference.
    pub fn reference(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            referenceable: true,
        }
    }
}

impl TypeDef {
    /// An object type with declared properties.
    pub fn object<N, P>(name: N, properties: P) -> Self
    where
        N: Into<String>,
        P: IntoIterator<Item = (&'static str, ChildSlot)>,
    {
        Self {
            name: name.into(),
            shape: TypeShape::Object {
                properties: properties
                    .into_iter()
                    .map(|(name, slot)| PropDef {
                        name: name.to_string(),
                        slot,
                    })
                    .collect(),
            },
        }
    }

    /// A dictionary type: every value shares `value`.
    pub fn map(name: impl Into<String>, value: ChildSlot) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Map { value },
        }
    }

    /// A list type: every item shares `item`.
    pub fn list(name: impl Into<String>, item: ChildSlot) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::List { item },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Slot declared for the property `name`, if any.
    pub fn property(&self, name: &str) -> Option<&ChildSlot> {
        match &self.shape {
            TypeShape::Object { properties } => properties
                .iter()
                .find(|p| p.name == name)
                .map(|p| &p.slot),
            _ => None,
        }
    }
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type definition. Later definitions replace earlier ones of
    /// the same name.
    pub fn define(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}
