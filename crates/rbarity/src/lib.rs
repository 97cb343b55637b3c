#![doc = include_str!("../../../README.md")]

mod args;
mod arity;
mod check;
mod error;
pub mod identifiers;
mod intern;
mod object;
pub mod tracer;
mod value;

pub use crate::{
    args::CallArgs,
    arity::{Arity, ArityDef, KeywordDef, KeywordParam},
    check::{KeywordArityCheck, KeywordChecker, check_call},
    error::{ArityDefinitionError, ArityError, ArityResult, ExcClass},
    identifiers::{IdentifierType, classify, inspect_symbol},
    intern::{StaticSymbols, SymbolId, SymbolTable},
    object::Object,
    tracer::{
        ArityTracer, NoopTracer, ProfilingReport, ProfilingTracer, RecordingTracer, StderrTracer, TraceEvent,
    },
    value::{KeywordHash, Value},
};
