//! Symbol interning for keyword names and symbol-typed keys.
//!
//! Keyword membership checks compare `SymbolId`s, never strings. A name is
//! turned into its canonical id once, when the arity descriptor is built or
//! when a caller's value is converted into a [`Value`](crate::Value).
//!
//! SymbolIds are laid out as follows:
//! * 0 to 128 - single character symbols for all 128 ASCII characters
//! * 1000 to count(StaticSymbols) - core symbols known at compile time
//! * 10_000+ - symbols interned per table

use std::{str::FromStr, sync::LazyLock};

use ahash::AHashMap;
use strum::{EnumString, FromRepr, IntoStaticStr};

/// Identity of an interned symbol.
///
/// Uses `u32` to save space; two symbols are the same symbol iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Returns the raw index value.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the SymbolId for an ASCII byte.
    #[must_use]
    pub fn from_ascii(byte: u8) -> Self {
        Self(u32::from(byte))
    }
}

const STATIC_SYMBOL_ID_OFFSET: u32 = 1000;
const INTERN_SYMBOL_ID_OFFSET: usize = 10_000;

/// Names for all 128 single-character ASCII symbols, built once on first access.
static ASCII_STRS: LazyLock<[&'static str; 128]> = LazyLock::new(|| {
    std::array::from_fn(|i| {
        let byte = u8::try_from(i).unwrap_or_default();
        // bounded leak: 128 single-byte strings
        &*Box::leak(char::from(byte).to_string().into_boxed_str())
    })
});

/// Core symbols which exist before any table is created.
#[repr(u16)]
#[derive(Debug, Clone, Copy, FromRepr, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum StaticSymbols {
    #[strum(serialize = "")]
    Empty,
    Class,
    Divmod,
    Immediate,
    Line,
    Never,
    OnBlocking,

    // keyword names used by core methods
    Exception,
    Freeze,
    Chomp,
    Timeout,
}

impl StaticSymbols {
    /// Converts a `SymbolId` back to a `StaticSymbols` variant, if it is one.
    #[must_use]
    pub fn from_symbol_id(id: SymbolId) -> Option<Self> {
        let enum_id = id.0.checked_sub(STATIC_SYMBOL_ID_OFFSET)?;
        u16::try_from(enum_id).ok().and_then(Self::from_repr)
    }
}

impl From<StaticSymbols> for SymbolId {
    fn from(value: StaticSymbols) -> Self {
        Self(value as u32 + STATIC_SYMBOL_ID_OFFSET)
    }
}

impl PartialEq<StaticSymbols> for SymbolId {
    fn eq(&self, other: &StaticSymbols) -> bool {
        *self == Self::from(*other)
    }
}

/// Deduplicating symbol table.
///
/// Interning the same name twice returns the same `SymbolId`. The table is
/// mutated while descriptors and call values are built, then shared
/// read-only while calls are checked.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    /// Maps names to their ids for deduplication.
    symbol_map: AHashMap<String, SymbolId>,
    /// Storage for interned names, indexed by `SymbolId - INTERN_SYMBOL_ID_OFFSET`.
    names: Vec<String>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a name, returning its `SymbolId`.
    ///
    /// * If the name is a single ASCII character, returns the fixed ASCII id
    /// * If the name is a core symbol, returns its static id
    /// * If the name was already interned, returns the existing id
    /// * Otherwise, stores the name and returns a new id
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 10_000` distinct names are interned.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = fixed_id(name) {
            return id;
        }
        if let Some(&id) = self.symbol_map.get(name) {
            return id;
        }
        let raw = self.names.len() + INTERN_SYMBOL_ID_OFFSET;
        let id = SymbolId(u32::try_from(raw).expect("SymbolId overflow"));
        self.names.push(name.to_owned());
        self.symbol_map.insert(name.to_owned(), id);
        id
    }

    /// Looks up an id by name without interning it.
    #[must_use]
    pub fn try_get_id(&self, name: &str) -> Option<SymbolId> {
        fixed_id(name).or_else(|| self.symbol_map.get(name).copied())
    }

    /// Looks up the name of a `SymbolId`.
    ///
    /// # Panics
    ///
    /// Panics if the id was not produced by this table, the ASCII range or `StaticSymbols`.
    #[must_use]
    pub fn get_str(&self, id: SymbolId) -> &str {
        if let Ok(c) = u8::try_from(id.0)
            && c < 128
        {
            ASCII_STRS[c as usize]
        } else if let Some(index) = id.index().checked_sub(INTERN_SYMBOL_ID_OFFSET) {
            self.names.get(index).expect("SymbolId from another table")
        } else {
            StaticSymbols::from_symbol_id(id).expect("invalid static symbol id").into()
        }
    }

    /// Returns the number of dynamically interned names.
    #[must_use]
    pub fn interned_count(&self) -> usize {
        self.names.len()
    }
}

fn fixed_id(name: &str) -> Option<SymbolId> {
    if name.len() == 1 && name.is_ascii() {
        Some(SymbolId::from_ascii(name.as_bytes()[0]))
    } else {
        StaticSymbols::from_str(name).ok().map(SymbolId::from)
    }
}
