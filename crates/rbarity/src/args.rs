use crate::value::{KeywordHash, Value};

/// Arguments supplied at a call site.
///
/// Positional values are kept apart from the trailing hash that is passed as
/// keyword arguments, if any. The hash still occupies one argument slot: see
/// [`CallArgs::given`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Option<KeywordHash>,
}

impl CallArgs {
    #[must_use]
    pub fn new(positional: Vec<Value>, keywords: Option<KeywordHash>) -> Self {
        Self { positional, keywords }
    }

    /// Splits a flat argument list into positional values and a keyword hash.
    ///
    /// The last value is taken as the keyword hash when it is a non-empty `Hash`
    /// and more than `required` values were supplied, so a hash filling a
    /// required positional parameter is never mistaken for keywords. An empty
    /// trailing hash stays positional.
    #[must_use]
    pub fn extract(mut values: Vec<Value>, required: usize) -> Self {
        let trailing_hash =
            values.len() > required && matches!(values.last(), Some(Value::Hash(hash)) if !hash.is_empty());
        if trailing_hash && let Some(Value::Hash(hash)) = values.pop() {
            return Self {
                positional: values,
                keywords: Some(hash),
            };
        }
        Self {
            positional: values,
            keywords: None,
        }
    }

    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// The keyword hash, if the call passed one.
    #[must_use]
    pub fn keywords(&self) -> Option<&KeywordHash> {
        self.keywords.as_ref()
    }

    /// Total argument slots used by the call, counting the keyword hash as one.
    #[must_use]
    pub fn given(&self) -> usize {
        self.positional.len() + usize::from(self.keywords.is_some())
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, Option<KeywordHash>) {
        (self.positional, self.keywords)
    }
}
