use std::collections::HashMap;

use crate::interpreter::{
    types::{ScalarType, TypeDescriptor},
    value::core::Scalar,
};

/// The current content of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    /// Content of a scalar variable.
    Scalar(Scalar),
    /// Elements of an internal table, in insertion order.
    Table(Vec<Scalar>),
}

/// A declared variable: its fixed type and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Declared type; never changes after declaration.
    pub descriptor: TypeDescriptor,
    /// Current content; always matches `descriptor`.
    pub value:      SlotValue,
}

impl Slot {
    /// Returns the scalar type, or `None` for tables.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<&ScalarType> {
        match &self.descriptor {
            TypeDescriptor::Scalar(ty) => Some(ty),
            TypeDescriptor::Table(_) => None,
        }
    }
}

/// Maps identifiers to variable slots for one interpreter run.
///
/// Identifiers are case-insensitive. Names are folded to one canonical case
/// here, at insertion and lookup, so callers pass names exactly as written.
#[derive(Debug, Default)]
pub struct Environment {
    slots: HashMap<String, Slot>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable by name.
    ///
    /// # Example
    /// ```
    /// use abapi::interpreter::{
    ///     environment::{Environment, Slot, SlotValue},
    ///     types::{ScalarType, TypeDescriptor},
    ///     value::core::Scalar,
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.declare("LV_NUM",
    ///             Slot { descriptor: TypeDescriptor::Scalar(ScalarType::Integer),
    ///                    value:      SlotValue::Scalar(Scalar::Number(5.0)), });
    ///
    /// assert!(env.get("lv_num").is_some());
    /// assert!(env.get("Lv_Num").is_some());
    /// assert!(env.get("lv_other").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(&canonical(name))
    }

    /// Looks up a variable by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.slots.get_mut(&canonical(name))
    }

    /// Inserts or replaces a variable, returning the previous slot.
    pub fn declare(&mut self, name: &str, slot: Slot) -> Option<Slot> {
        self.slots.insert(canonical(name), slot)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn canonical(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::types::ElementType;

    #[test]
    fn redeclaring_replaces_the_slot() {
        let mut env = Environment::new();
        let table = Slot { descriptor: TypeDescriptor::Table(ElementType::Str),
                           value:      SlotValue::Table(vec![Scalar::Str("a".into())]), };
        assert!(env.declare("lt_words", table.clone()).is_none());
        assert_eq!(env.declare("LT_WORDS", table.clone()), Some(table));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn scalar_type_is_none_for_tables() {
        let slot = Slot { descriptor: TypeDescriptor::Table(ElementType::Integer),
                          value:      SlotValue::Table(Vec::new()), };
        assert!(slot.scalar_type().is_none());
    }

    #[test]
    fn mutation_through_any_spelling() {
        let mut env = Environment::new();
        env.declare("lv_text",
                    Slot { descriptor: TypeDescriptor::Scalar(ScalarType::Str),
                           value:      SlotValue::Scalar(Scalar::Str(String::new())), });
        if let Some(slot) = env.get_mut("LV_TEXT") {
            slot.value = SlotValue::Scalar(Scalar::Str("x".into()));
        }
        assert_eq!(env.get("lv_text").map(|s| &s.value),
                   Some(&SlotValue::Scalar(Scalar::Str("x".into()))));
    }
}
