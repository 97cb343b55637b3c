use crate::{
    intern::SymbolTable,
    value::{KeywordHash, Value},
};

/// A Ruby value that can be passed to or returned from the library.
///
/// This is the public-facing, owned form of [`Value`]. Unlike `Value` it does not
/// depend on a [`SymbolTable`]: symbols carry their name, so an `Object` can be
/// freely cloned, serialized or stored in a case file.
///
/// # JSON Serialization
///
/// Variants accept short aliases so case files stay readable:
/// - `"Nil"` or `"nil"` ↔ `Nil`
/// - `{"bool": true}`, `{"int": 1}`, `{"float": 2.5}`, `{"str": "x"}`, `{"sym": "a"}`
/// - `{"array": [...]}`, `{"hash": [[key, value], ...]}` (pairs keep their order)
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Object {
    #[serde(alias = "nil")]
    Nil,
    #[serde(alias = "bool")]
    Bool(bool),
    #[serde(alias = "int")]
    Integer(i64),
    #[serde(alias = "float")]
    Float(f64),
    #[serde(alias = "str")]
    String(String),
    /// A symbol, by name.
    #[serde(alias = "sym")]
    Symbol(String),
    #[serde(alias = "array")]
    Array(Vec<Self>),
    /// An insertion-ordered hash as key/value pairs.
    #[serde(alias = "hash")]
    Hash(Vec<(Self, Self)>),
}

impl Object {
    /// Converts into a runtime [`Value`], interning every symbol in `symbols`.
    pub fn into_value(self, symbols: &mut SymbolTable) -> Value {
        match self {
            Self::Nil => Value::Nil,
            Self::Bool(b) => Value::Bool(b),
            Self::Integer(i) => Value::Integer(i),
            Self::Float(f) => Value::Float(f),
            Self::String(s) => Value::String(s),
            Self::Symbol(name) => Value::Symbol(symbols.intern(&name)),
            Self::Array(items) => Value::Array(items.into_iter().map(|item| item.into_value(symbols)).collect()),
            Self::Hash(pairs) => Value::Hash(Self::pairs_into_hash(pairs, symbols)),
        }
    }

    /// Builds a keyword hash from key/value pairs, keeping their order.
    pub fn pairs_into_hash(pairs: Vec<(Self, Self)>, symbols: &mut SymbolTable) -> KeywordHash {
        pairs
            .into_iter()
            .map(|(key, value)| (key.into_value(symbols), value.into_value(symbols)))
            .collect()
    }

    /// Converts a runtime [`Value`] back into an `Object`, resolving symbol names.
    #[must_use]
    pub fn from_value(value: &Value, symbols: &SymbolTable) -> Self {
        match value {
            Value::Nil => Self::Nil,
            Value::Bool(b) => Self::Bool(*b),
            Value::Integer(i) => Self::Integer(*i),
            Value::Float(f) => Self::Float(*f),
            Value::String(s) => Self::String(s.clone()),
            Value::Symbol(id) => Self::Symbol(symbols.get_str(*id).to_owned()),
            Value::Array(items) => Self::Array(items.iter().map(|item| Self::from_value(item, symbols)).collect()),
            Value::Hash(hash) => Self::Hash(
                hash.iter()
                    .map(|(key, value)| (Self::from_value(key, symbols), Self::from_value(value, symbols)))
                    .collect(),
            ),
        }
    }
}
