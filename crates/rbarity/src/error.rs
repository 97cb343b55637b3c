use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

use crate::{identifiers::inspect_symbol, intern::SymbolId};

/// Result type alias for arity checks.
pub type ArityResult<T> = Result<T, ArityError>;

/// Ruby exception classes an arity failure is raised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ExcClass {
    ArgumentError,
    TypeError,
}

/// Why a call was rejected.
///
/// Both variants surface as `ArgumentError` in Ruby but carry different
/// messages; callers must not fold them into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArityError {
    /// The positional argument count is out of range.
    ///
    /// `given` is whichever count was checked: the count without the keyword
    /// hash for the basic check, or the raw count when a non-symbol key would
    /// have split into an extra positional hash.
    ArgumentCount { given: usize, required: usize },
    /// A symbol key names no declared keyword and there is no `**kwrest`.
    UnknownKeyword { key: SymbolId, name: String },
}

impl ArityError {
    /// The Ruby exception class this error is raised as.
    #[must_use]
    pub fn exception_class(&self) -> ExcClass {
        match self {
            Self::ArgumentCount { .. } | Self::UnknownKeyword { .. } => ExcClass::ArgumentError,
        }
    }

    /// The exception message, without the class name.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentCount { given, required } => {
                write!(f, "wrong number of arguments (given {given}, expected {required})")
            }
            Self::UnknownKeyword { name, .. } => write!(f, "unknown keyword: {}", inspect_symbol(name)),
        }
    }
}

impl std::error::Error for ArityError {}

/// Error returned when an arity descriptor cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArityDefinitionError {
    /// The same keyword was declared twice.
    DuplicateKeyword(String),
    /// A keyword name is not a valid local variable name.
    InvalidKeywordName(String),
}

impl fmt::Display for ArityDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKeyword(name) => write!(f, "duplicated argument name: {name}"),
            Self::InvalidKeywordName(name) => write!(f, "invalid keyword argument name: {}", inspect_symbol(name)),
        }
    }
}

impl std::error::Error for ArityDefinitionError {}
