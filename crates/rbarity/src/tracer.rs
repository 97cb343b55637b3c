//! Arity check tracing.
//!
//! The [`ArityTracer`] trait defines hook points inside a keyword arity check.
//! The checker is generic over the tracer, so with [`NoopTracer`] every hook is
//! monomorphized away.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | No-op (default) |
//! | [`StderrTracer`] | Human-readable check log to stderr |
//! | [`ProfilingTracer`] | Counters for checks, keys and failures |
//! | [`RecordingTracer`] | Full event recording for post-mortem analysis |
//!
//! ```ignore
//! let check = KeywordArityCheck::new(&arity);
//! let mut tracer = RecordingTracer::new();
//! check.check(args.given(), args.keywords(), &symbols, &mut tracer)?;
//! for event in tracer.events() { ... }
//! ```

/// Trace event emitted during a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A check started.
    Check {
        /// Raw argument count, including the keyword hash slot.
        given: usize,
        /// Number of entries in the keyword hash (0 if absent).
        keyword_count: usize,
    },
    /// The positional count was out of range.
    BasicCheckFailed { given: usize, required: usize },
    /// Keyword entries were not inspected because the callee takes `**kwrest`.
    KeywordsRestSkip,
    /// A keyword entry was inspected.
    Keyword {
        /// Whether the key is a symbol.
        symbol: bool,
    },
    /// A symbol key matched no declared keyword.
    UnknownKeyword { name: String },
    /// A non-symbol key would have needed an extra positional slot.
    ExtraArgumentRejected { given: usize, required: usize },
    /// The call was accepted.
    Accept,
}

/// Hooks called by [`KeywordArityCheck`](crate::KeywordArityCheck).
///
/// All methods default to no-ops; implementations override only what they need.
pub trait ArityTracer: std::fmt::Debug {
    /// Called when a check starts.
    #[inline(always)]
    fn on_check(&mut self, _given: usize, _keyword_count: usize) {}

    /// Called when the positional count fails [`Arity::basic_check`](crate::Arity::basic_check).
    #[inline(always)]
    fn on_basic_check_failed(&mut self, _given: usize, _required: usize) {}

    /// Called when keyword entries are skipped because of `**kwrest`.
    #[inline(always)]
    fn on_keywords_rest_skip(&mut self) {}

    /// Called for each keyword entry inspected, in hash order.
    #[inline(always)]
    fn on_keyword(&mut self, _symbol: bool) {}

    /// Called when a symbol key is not a declared keyword.
    #[inline(always)]
    fn on_unknown_keyword(&mut self, _name: &str) {}

    /// Called when a non-symbol key cannot be split into an extra positional hash.
    #[inline(always)]
    fn on_extra_argument_rejected(&mut self, _given: usize, _required: usize) {}

    /// Called when the check succeeds.
    #[inline(always)]
    fn on_accept(&mut self) {}
}

// ============================================================================
// NoopTracer
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl ArityTracer for NoopTracer {}

// ============================================================================
// StderrTracer: human-readable check log
// ============================================================================

/// Tracer that prints each check to stderr.
///
/// Output format:
/// ```text
/// >>> CHECK given=2 keywords=2
///   ... key symbol
///   !!! unknown keyword :b
/// ```
#[derive(Debug, Default)]
pub struct StderrTracer {
    /// Maximum number of lines to print. None = unlimited.
    limit: Option<usize>,
    lines: usize,
    stopped: bool,
}

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracer that goes quiet after `limit` lines.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) {
        if self.stopped {
            return;
        }
        eprintln!("{line}");
        self.lines += 1;
        if let Some(limit) = self.limit
            && self.lines >= limit
        {
            eprintln!("--- trace limit reached ({limit} lines) ---");
            self.stopped = true;
        }
    }
}

impl ArityTracer for StderrTracer {
    fn on_check(&mut self, given: usize, keyword_count: usize) {
        self.line(format_args!(">>> CHECK given={given} keywords={keyword_count}"));
    }

    fn on_basic_check_failed(&mut self, given: usize, required: usize) {
        self.line(format_args!("  !!! positional count given={given} required={required}"));
    }

    fn on_keywords_rest_skip(&mut self) {
        self.line(format_args!("  ... **kwrest, keys not inspected"));
    }

    fn on_keyword(&mut self, symbol: bool) {
        let kind = if symbol { "symbol" } else { "non-symbol" };
        self.line(format_args!("  ... key {kind}"));
    }

    fn on_unknown_keyword(&mut self, name: &str) {
        let name = crate::identifiers::inspect_symbol(name);
        self.line(format_args!("  !!! unknown keyword {name}"));
    }

    fn on_extra_argument_rejected(&mut self, given: usize, required: usize) {
        self.line(format_args!("  !!! extra positional hash given={given} required={required}"));
    }

    fn on_accept(&mut self) {
        self.line(format_args!("<<< OK"));
    }
}

// ============================================================================
// ProfilingTracer: counters
// ============================================================================

/// Tracer that counts checks, inspected keys and failures by kind.
#[derive(Debug, Default)]
pub struct ProfilingTracer {
    checks: u64,
    accepted: u64,
    keys_inspected: u64,
    non_symbol_keys: u64,
    keywords_rest_skips: u64,
    count_failures: u64,
    unknown_keyword_failures: u64,
    extra_argument_failures: u64,
}

/// Summary report from a profiling trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilingReport {
    pub checks: u64,
    pub accepted: u64,
    pub keys_inspected: u64,
    pub non_symbol_keys: u64,
    pub keywords_rest_skips: u64,
    /// Basic positional count failures.
    pub count_failures: u64,
    pub unknown_keyword_failures: u64,
    /// Non-symbol keys rejected for lack of an extra positional slot.
    pub extra_argument_failures: u64,
}

impl ProfilingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn report(&self) -> ProfilingReport {
        ProfilingReport {
            checks: self.checks,
            accepted: self.accepted,
            keys_inspected: self.keys_inspected,
            non_symbol_keys: self.non_symbol_keys,
            keywords_rest_skips: self.keywords_rest_skips,
            count_failures: self.count_failures,
            unknown_keyword_failures: self.unknown_keyword_failures,
            extra_argument_failures: self.extra_argument_failures,
        }
    }
}

impl ArityTracer for ProfilingTracer {
    #[inline]
    fn on_check(&mut self, _given: usize, _keyword_count: usize) {
        self.checks += 1;
    }

    fn on_basic_check_failed(&mut self, _given: usize, _required: usize) {
        self.count_failures += 1;
    }

    fn on_keywords_rest_skip(&mut self) {
        self.keywords_rest_skips += 1;
    }

    #[inline]
    fn on_keyword(&mut self, symbol: bool) {
        self.keys_inspected += 1;
        if !symbol {
            self.non_symbol_keys += 1;
        }
    }

    fn on_unknown_keyword(&mut self, _name: &str) {
        self.unknown_keyword_failures += 1;
    }

    fn on_extra_argument_rejected(&mut self, _given: usize, _required: usize) {
        self.extra_argument_failures += 1;
    }

    #[inline]
    fn on_accept(&mut self) {
        self.accepted += 1;
    }
}

impl std::fmt::Display for ProfilingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Arity Check Report ===")?;
        writeln!(f, "Checks:              {}", self.checks)?;
        writeln!(f, "Accepted:            {}", self.accepted)?;
        writeln!(f, "Keys inspected:      {}", self.keys_inspected)?;
        writeln!(f, "Non-symbol keys:     {}", self.non_symbol_keys)?;
        writeln!(f, "**kwrest skips:      {}", self.keywords_rest_skips)?;
        writeln!(f)?;
        writeln!(f, "--- Failures ---")?;
        writeln!(f, "  wrong arg count    {:>10}", self.count_failures)?;
        writeln!(f, "  unknown keyword    {:>10}", self.unknown_keyword_failures)?;
        writeln!(f, "  extra positional   {:>10}", self.extra_argument_failures)?;
        Ok(())
    }
}

// ============================================================================
// RecordingTracer: full event recording
// ============================================================================

/// Tracer that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
    limit: Option<usize>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording tracer that stops recording after `limit` events.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    fn record(&mut self, event: TraceEvent) {
        if self.limit.is_some_and(|l| self.events.len() >= l) {
            return;
        }
        self.events.push(event);
    }
}

impl ArityTracer for RecordingTracer {
    fn on_check(&mut self, given: usize, keyword_count: usize) {
        self.record(TraceEvent::Check { given, keyword_count });
    }

    fn on_basic_check_failed(&mut self, given: usize, required: usize) {
        self.record(TraceEvent::BasicCheckFailed { given, required });
    }

    fn on_keywords_rest_skip(&mut self) {
        self.record(TraceEvent::KeywordsRestSkip);
    }

    fn on_keyword(&mut self, symbol: bool) {
        self.record(TraceEvent::Keyword { symbol });
    }

    fn on_unknown_keyword(&mut self, name: &str) {
        self.record(TraceEvent::UnknownKeyword { name: name.to_owned() });
    }

    fn on_extra_argument_rejected(&mut self, given: usize, required: usize) {
        self.record(TraceEvent::ExtraArgumentRejected { given, required });
    }

    fn on_accept(&mut self) {
        self.record(TraceEvent::Accept);
    }
}
