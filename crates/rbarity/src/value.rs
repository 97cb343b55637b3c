//! Runtime values as seen by the arity check.
//!
//! Only the shape of a value matters here: whether a keyword key is a symbol,
//! and which symbol it is. Values are nevertheless complete enough to model a
//! Ruby call's arguments, including nested hashes.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::intern::SymbolId;

/// A Ruby value supplied as a call argument or as a hash key/value.
///
/// `Eq` and `Hash` are total: floats compare by bit pattern, which matches
/// `Hash#[]` treating `0.0` and `-0.0` as distinct keys.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Symbol(SymbolId),
    Array(Vec<Self>),
    Hash(KeywordHash),
}

impl Value {
    /// Returns true for symbol-typed values, the only keys that can name a keyword.
    #[inline]
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns the symbol id if this is a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            Self::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    /// Ruby class name of the value, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "NilClass",
            Self::Bool(true) => "TrueClass",
            Self::Bool(false) => "FalseClass",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Symbol(_) => "Symbol",
            Self::Array(_) => "Array",
            Self::Hash(_) => "Hash",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Symbol(id) => id.hash(state),
            Self::Array(items) => items.hash(state),
            Self::Hash(hash) => {
                hash.len().hash(state);
                for (key, value) in hash {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}

impl From<SymbolId> for Value {
    fn from(id: SymbolId) -> Self {
        Self::Symbol(id)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

/// Insertion-ordered hash passed as trailing keyword arguments.
///
/// Iteration order is insertion order; the first offending key of a failed
/// check is the first one in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordHash(IndexMap<Value, Value>);

impl KeywordHash {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry. Re-inserting an existing key keeps its original position,
    /// like `Hash#[]=`.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.0.keys()
    }
}

impl<'a> IntoIterator for &'a KeywordHash {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for KeywordHash {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Value, Value)> for KeywordHash {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
