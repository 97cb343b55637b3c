//! Keyword arity checking at call time.
//!
//! A [`KeywordArityCheck`] is built once per callable that declares keyword
//! parameters and then run on every call. It rejects positional counts that
//! do not fit the arity and keyword hashes carrying keys the callee cannot
//! take. It does not detect missing required keywords; that happens when
//! keywords are bound to parameters.
//!
//! The check runs in two passes:
//! 1. The positional count, excluding the keyword hash, must satisfy
//!    [`Arity::basic_check`]. This runs even when no keywords were passed.
//! 2. Unless the callee takes `**kwrest`, each entry of the keyword hash is
//!    inspected in hash order by a [`KeywordChecker`]; the first bad key
//!    fails the call.

use ahash::AHashSet;

use crate::{
    args::CallArgs,
    arity::Arity,
    error::{ArityError, ArityResult},
    intern::{SymbolId, SymbolTable},
    tracer::{ArityTracer, NoopTracer},
    value::{KeywordHash, Value},
};

/// The per-callable keyword arity check.
///
/// Immutable once built; one instance may check calls from many threads.
#[derive(Debug, Clone)]
pub struct KeywordArityCheck {
    arity: Arity,
    /// Absent when the arity has `**kwrest`, which accepts every key.
    keyword_checker: Option<KeywordChecker>,
}

impl KeywordArityCheck {
    #[must_use]
    pub fn new(arity: &Arity) -> Self {
        let keyword_checker = (!arity.has_keywords_rest()).then(|| KeywordChecker::new(arity));
        Self {
            arity: arity.clone(),
            keyword_checker,
        }
    }

    #[must_use]
    pub fn arity(&self) -> &Arity {
        &self.arity
    }

    /// Checks one call.
    ///
    /// # Arguments
    /// * `given` - Total argument count of the call, including the keyword hash slot
    /// * `keywords` - The trailing keyword hash, if the call passed one
    /// * `symbols` - Table the keyword symbols were interned in, for error messages
    /// * `tracer` - Receives check events
    ///
    /// An empty keyword hash is treated as no keyword hash at all.
    ///
    /// # Panics
    ///
    /// Panics if an unknown symbol key was not interned in `symbols`. Keys and
    /// the arity must come from the same table.
    ///
    /// # Errors
    /// * `ArgumentCount` with the positional count if it is out of range
    /// * `UnknownKeyword` for the first symbol key that is not a declared keyword
    /// * `ArgumentCount` with the raw count for the first non-symbol key when
    ///   the arity has no room for an extra positional hash
    pub fn check(
        &self,
        given: usize,
        keywords: Option<&KeywordHash>,
        symbols: &SymbolTable,
        tracer: &mut impl ArityTracer,
    ) -> ArityResult<()> {
        let keywords = keywords.filter(|hash| !hash.is_empty());
        tracer.on_check(given, keywords.map_or(0, KeywordHash::len));

        let positional = given.saturating_sub(usize::from(keywords.is_some()));
        if !self.arity.basic_check(positional) {
            let required = self.arity.required();
            tracer.on_basic_check_failed(positional, required);
            return Err(ArityError::ArgumentCount {
                given: positional,
                required,
            });
        }

        if let Some(keywords) = keywords {
            match &self.keyword_checker {
                Some(checker) => {
                    for (key, _) in keywords {
                        checker.accept(key, given, symbols, &mut *tracer)?;
                    }
                }
                None => tracer.on_keywords_rest_skip(),
            }
        }

        tracer.on_accept();
        Ok(())
    }
}

/// Inspects single keyword hash entries for a callee without `**kwrest`.
///
/// Built once from the arity; `accept` is then called for each entry.
#[derive(Debug, Clone)]
pub struct KeywordChecker {
    /// No rest and no optional positionals: a split-off hash of non-symbol
    /// keys would have nowhere to go.
    does_not_accept_extra_arguments: bool,
    required: usize,
    allowed_keywords: AHashSet<SymbolId>,
}

impl KeywordChecker {
    #[must_use]
    pub fn new(arity: &Arity) -> Self {
        debug_assert!(!arity.has_keywords_rest(), "**kwrest accepts every keyword");
        Self {
            does_not_accept_extra_arguments: !arity.has_rest() && arity.optional() == 0,
            required: arity.required(),
            allowed_keywords: arity.keywords().iter().map(|param| param.name).collect(),
        }
    }

    /// Whether `name` is a declared keyword.
    #[inline]
    #[must_use]
    pub fn keyword_allowed(&self, name: SymbolId) -> bool {
        self.allowed_keywords.contains(&name)
    }

    /// Checks one key of the keyword hash.
    ///
    /// Symbol keys must name a declared keyword. Any other key would be split
    /// out of the hash into a separate positional hash, so it is only allowed
    /// when the arity can take one more positional argument than `required`.
    /// `given` is the raw argument count of the call: the keyword hash slot
    /// is given back to the split-off hash.
    ///
    /// # Panics
    ///
    /// Panics if `key` is an unknown symbol that was not interned in `symbols`.
    ///
    /// # Errors
    /// `UnknownKeyword` or `ArgumentCount` as described above.
    pub fn accept(
        &self,
        key: &Value,
        given: usize,
        symbols: &SymbolTable,
        tracer: &mut impl ArityTracer,
    ) -> ArityResult<()> {
        if let Value::Symbol(id) = key {
            tracer.on_keyword(true);
            if !self.keyword_allowed(*id) {
                let name = symbols.get_str(*id);
                tracer.on_unknown_keyword(name);
                return Err(ArityError::UnknownKeyword {
                    key: *id,
                    name: name.to_owned(),
                });
            }
        } else {
            tracer.on_keyword(false);
            if self.does_not_accept_extra_arguments && given > self.required {
                tracer.on_extra_argument_rejected(given, self.required);
                return Err(ArityError::ArgumentCount {
                    given,
                    required: self.required,
                });
            }
        }
        Ok(())
    }
}

/// Checks a single call without a reusable [`KeywordArityCheck`] or tracing.
///
/// `symbols` must be the table both `arity` and `args` were built with.
///
/// # Errors
/// See [`KeywordArityCheck::check`].
pub fn check_call(arity: &Arity, args: &CallArgs, symbols: &SymbolTable) -> ArityResult<()> {
    KeywordArityCheck::new(arity).check(args.given(), args.keywords(), symbols, &mut NoopTracer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arity::ArityDef,
        tracer::{RecordingTracer, TraceEvent},
    };

    fn sym(symbols: &mut SymbolTable, name: &str) -> Value {
        Value::Symbol(symbols.intern(name))
    }

    #[test]
    fn single_required_keyword_accepts_exact_hash() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().required(1).keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [(sym(&mut symbols, "a"), Value::Integer(1))].into_iter().collect();
        let check = KeywordArityCheck::new(&arity);
        assert_eq!(check.check(2, Some(&hash), &symbols, &mut NoopTracer), Ok(()));
    }

    #[test]
    fn first_unknown_keyword_is_reported() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().required(1).keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [
            (sym(&mut symbols, "a"), Value::Integer(1)),
            (sym(&mut symbols, "b"), Value::Integer(2)),
            (sym(&mut symbols, "c"), Value::Integer(3)),
        ]
        .into_iter()
        .collect();
        let check = KeywordArityCheck::new(&arity);
        let err = check.check(2, Some(&hash), &symbols, &mut NoopTracer).unwrap_err();
        assert_eq!(
            err,
            ArityError::UnknownKeyword {
                key: symbols.intern("b"),
                name: "b".to_owned()
            }
        );
    }

    #[test]
    fn basic_check_uses_count_without_keyword_hash() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().required(1).keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [(sym(&mut symbols, "a"), Value::Nil)].into_iter().collect();
        let check = KeywordArityCheck::new(&arity);
        assert_eq!(
            check.check(3, Some(&hash), &symbols, &mut NoopTracer),
            Err(ArityError::ArgumentCount { given: 2, required: 1 })
        );
        assert_eq!(
            check.check(0, None, &symbols, &mut NoopTracer),
            Err(ArityError::ArgumentCount { given: 0, required: 1 })
        );
    }

    #[test]
    fn basic_check_runs_before_keywords() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [(sym(&mut symbols, "zzz"), Value::Nil)].into_iter().collect();
        let check = KeywordArityCheck::new(&arity);
        assert_eq!(
            check.check(2, Some(&hash), &symbols, &mut NoopTracer),
            Err(ArityError::ArgumentCount { given: 1, required: 0 })
        );
    }

    #[test]
    fn non_symbol_key_uses_raw_count() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().required(1).keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [
            (sym(&mut symbols, "a"), Value::Nil),
            (Value::from("str"), Value::Nil),
        ]
        .into_iter()
        .collect();
        let check = KeywordArityCheck::new(&arity);
        assert_eq!(
            check.check(2, Some(&hash), &symbols, &mut NoopTracer),
            Err(ArityError::ArgumentCount { given: 2, required: 1 })
        );
    }

    #[test]
    fn non_symbol_key_allowed_with_optional_or_rest() {
        let mut symbols = SymbolTable::new();
        let hash: KeywordHash = [(Value::Integer(1), Value::Nil)].into_iter().collect();
        for def in [
            ArityDef::new().required(1).optional(1).keyword("a"),
            ArityDef::new().required(1).rest().keyword("a"),
        ] {
            let arity = def.build(&mut symbols).unwrap();
            let check = KeywordArityCheck::new(&arity);
            assert_eq!(check.check(2, Some(&hash), &symbols, &mut NoopTracer), Ok(()));
        }
    }

    #[test]
    fn keywords_rest_skips_key_inspection() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().keyword("a").keywords_rest().build(&mut symbols).unwrap();
        let hash: KeywordHash = [
            (sym(&mut symbols, "other"), Value::Nil),
            (Value::from("str"), Value::Nil),
        ]
        .into_iter()
        .collect();
        let check = KeywordArityCheck::new(&arity);
        let mut tracer = RecordingTracer::new();
        assert_eq!(check.check(1, Some(&hash), &symbols, &mut tracer), Ok(()));
        assert_eq!(
            tracer.into_events(),
            vec![
                TraceEvent::Check { given: 1, keyword_count: 2 },
                TraceEvent::KeywordsRestSkip,
                TraceEvent::Accept,
            ]
        );
    }

    #[test]
    fn empty_keyword_hash_counts_as_positional() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().keyword("a").build(&mut symbols).unwrap();
        let check = KeywordArityCheck::new(&arity);
        let empty = KeywordHash::new();
        assert_eq!(
            check.check(1, Some(&empty), &symbols, &mut NoopTracer),
            Err(ArityError::ArgumentCount { given: 1, required: 0 })
        );
        assert_eq!(check.check(0, Some(&empty), &symbols, &mut NoopTracer), Ok(()));
    }

    #[test]
    fn missing_required_keyword_is_not_detected_here() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().keyword("a").build(&mut symbols).unwrap();
        let check = KeywordArityCheck::new(&arity);
        assert_eq!(check.check(0, None, &symbols, &mut NoopTracer), Ok(()));
    }

    #[test]
    fn tracer_sees_keys_until_failure() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().optional_keyword("a").build(&mut symbols).unwrap();
        let hash: KeywordHash = [
            (sym(&mut symbols, "a"), Value::Nil),
            (sym(&mut symbols, "b"), Value::Nil),
            (sym(&mut symbols, "c"), Value::Nil),
        ]
        .into_iter()
        .collect();
        let check = KeywordArityCheck::new(&arity);
        let mut tracer = RecordingTracer::new();
        assert!(check.check(1, Some(&hash), &symbols, &mut tracer).is_err());
        assert_eq!(
            tracer.into_events(),
            vec![
                TraceEvent::Check { given: 1, keyword_count: 3 },
                TraceEvent::Keyword { symbol: true },
                TraceEvent::Keyword { symbol: true },
                TraceEvent::UnknownKeyword { name: "b".to_owned() },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "SymbolId from another table")]
    fn unknown_key_from_another_table_panics() {
        let mut symbols = SymbolTable::new();
        let arity = ArityDef::new().keyword("a").build(&mut symbols).unwrap();
        let mut other = SymbolTable::new();
        let hash: KeywordHash = [(sym(&mut other, "stranger"), Value::Nil)].into_iter().collect();
        let _ = KeywordArityCheck::new(&arity).check(1, Some(&hash), &symbols, &mut NoopTracer);
    }

    #[test]
    fn check_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeywordArityCheck>();
        assert_send_sync::<KeywordChecker>();
    }
}
