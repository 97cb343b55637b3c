//! Arity descriptors: the parameter shape of a method or block.
//!
//! An [`Arity`] is built once when a method or block is defined and is then
//! shared, immutably, by every call to it. It describes only counts and
//! keyword names; default values and parameter binding live elsewhere.

use crate::{
    error::ArityDefinitionError,
    identifiers::{is_name_string, is_valid_local_variable_name},
    intern::{SymbolId, SymbolTable},
};

/// A declared keyword parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeywordParam {
    pub name: SymbolId,
    /// `a:` is required, `a: 1` is optional.
    pub required: bool,
}

/// The parameter shape of a method or block.
///
/// For `def m(a, b = 1, *rest, c:, d: 2, **opts)`:
/// ```text
/// required = 1, optional = 1, has_rest = true,
/// keywords = [c (required), d (optional)], has_keywords_rest = true
/// ```
///
/// Keywords keep declaration order and contain no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Arity {
    required: usize,
    optional: usize,
    has_rest: bool,
    keywords: Vec<KeywordParam>,
    has_keywords_rest: bool,
}

impl Arity {
    /// An arity with no parameters at all.
    #[must_use]
    pub fn no_arguments() -> Self {
        Self::default()
    }

    /// A purely positional arity.
    #[must_use]
    pub fn positional(required: usize, optional: usize, has_rest: bool) -> Self {
        Self {
            required,
            optional,
            has_rest,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }

    #[inline]
    #[must_use]
    pub fn optional(&self) -> usize {
        self.optional
    }

    #[inline]
    #[must_use]
    pub fn has_rest(&self) -> bool {
        self.has_rest
    }

    #[inline]
    #[must_use]
    pub fn has_keywords_rest(&self) -> bool {
        self.has_keywords_rest
    }

    /// Declared keywords in declaration order.
    #[must_use]
    pub fn keywords(&self) -> &[KeywordParam] {
        &self.keywords
    }

    /// Names of keywords without a default, in declaration order.
    pub fn required_keywords(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.keywords.iter().filter(|param| param.required).map(|param| param.name)
    }

    /// Names of keywords with a default, in declaration order.
    pub fn optional_keywords(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.keywords.iter().filter(|param| !param.required).map(|param| param.name)
    }

    #[must_use]
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Whether the positional count `given` fits the declared positional parameters.
    #[inline]
    #[must_use]
    pub fn basic_check(&self, given: usize) -> bool {
        given >= self.required && (self.has_rest || given <= self.required + self.optional)
    }

    /// The value of `Method#arity` for this shape.
    ///
    /// Keywords count as one extra argument: required when any keyword is
    /// required, optional otherwise. Shapes with a variable count return
    /// `-(min + 1)`.
    #[must_use]
    pub fn method_arity(&self) -> i64 {
        let has_required_keywords = self.keywords.iter().any(|param| param.required);
        let accepts_keywords = self.has_keywords() || self.has_keywords_rest;
        let min = self.required + usize::from(has_required_keywords);
        let max = (!self.has_rest).then(|| self.required + self.optional + usize::from(accepts_keywords));
        let exact = max == Some(min);
        let min = i64::try_from(min).unwrap_or(i64::MAX - 1);
        if exact { min } else { -(min + 1) }
    }

    /// Expected positional count in MRI's style: `"2"`, `"1..3"` or `"1+"`.
    #[must_use]
    pub fn expected_description(&self) -> String {
        if self.has_rest {
            format!("{}+", self.required)
        } else if self.optional == 0 {
            self.required.to_string()
        } else {
            format!("{}..{}", self.required, self.required + self.optional)
        }
    }
}

/// An arity described by names rather than symbol ids.
///
/// This is the form a definition site (or a case file) provides; [`ArityDef::build`]
/// interns the keyword names and validates them.
///
/// ```ignore
/// let arity = ArityDef::new().required(1).keyword("a").optional_keyword("b").build(&mut symbols)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArityDef {
    pub required: usize,
    pub optional: usize,
    pub rest: bool,
    pub keywords: Vec<KeywordDef>,
    pub keywords_rest: bool,
}

/// A keyword parameter by name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeywordDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

impl ArityDef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self, count: usize) -> Self {
        self.required = count;
        self
    }

    #[must_use]
    pub fn optional(mut self, count: usize) -> Self {
        self.optional = count;
        self
    }

    #[must_use]
    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    /// Declares a required keyword, `name:`.
    #[must_use]
    pub fn keyword(mut self, name: &str) -> Self {
        self.keywords.push(KeywordDef {
            name: name.to_owned(),
            required: true,
        });
        self
    }

    /// Declares an optional keyword, `name: default`.
    #[must_use]
    pub fn optional_keyword(mut self, name: &str) -> Self {
        self.keywords.push(KeywordDef {
            name: name.to_owned(),
            required: false,
        });
        self
    }

    #[must_use]
    pub fn keywords_rest(mut self) -> Self {
        self.keywords_rest = true;
        self
    }

    /// Interns keyword names and builds the descriptor.
    ///
    /// # Errors
    /// Returns an error if a keyword name is not a local identifier (a local
    /// variable name, or `_` followed by name characters) or is declared twice.
    pub fn build(&self, symbols: &mut SymbolTable) -> Result<Arity, ArityDefinitionError> {
        let mut keywords: Vec<KeywordParam> = Vec::with_capacity(self.keywords.len());
        for def in &self.keywords {
            if !is_valid_keyword_name(&def.name) {
                return Err(ArityDefinitionError::InvalidKeywordName(def.name.clone()));
            }
            let name = symbols.intern(&def.name);
            if keywords.iter().any(|param| param.name == name) {
                return Err(ArityDefinitionError::DuplicateKeyword(def.name.clone()));
            }
            keywords.push(KeywordParam {
                name,
                required: def.required,
            });
        }
        Ok(Arity {
            required: self.required,
            optional: self.optional,
            has_rest: self.rest,
            keywords,
            has_keywords_rest: self.keywords_rest,
        })
    }
}

/// `a`, `_opts`, `_`: names a keyword parameter can take.
fn is_valid_keyword_name(name: &str) -> bool {
    is_valid_local_variable_name(name) || name.strip_prefix('_').is_some_and(is_name_string)
}
