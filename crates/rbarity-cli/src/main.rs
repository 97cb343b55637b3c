use std::{env, fmt, fs, process::ExitCode};

use rbarity::{
    ArityDef, ArityDefinitionError, ArityTracer, CallArgs, KeywordArityCheck, NoopTracer, Object, ProfilingTracer,
    StderrTracer, SymbolTable,
};

/// A case file: one arity and the calls to check against it.
#[derive(Debug, serde::Deserialize)]
struct CaseFile {
    arity: ArityDef,
    calls: Vec<CallCase>,
}

#[derive(Debug, serde::Deserialize)]
struct CallCase {
    #[serde(default)]
    args: Vec<Object>,
    /// Keyword hash as ordered pairs; absent or null for a call without keywords.
    #[serde(default)]
    keywords: Option<Vec<(Object, Object)>>,
    /// `"ok"` or the expected error message.
    #[serde(default)]
    expect: Option<String>,
}

#[derive(Debug)]
enum CliError {
    Read(String),
    Parse(serde_json::Error),
    Arity(ArityDefinitionError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "{msg}"),
            Self::Parse(err) => write!(f, "invalid case file: {err}"),
            Self::Arity(err) => write!(f, "invalid arity: {err}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ArityDefinitionError> for CliError {
    fn from(err: ArityDefinitionError) -> Self {
        Self::Arity(err)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let file_path: &str = if args.len() > 1 { &args[1] } else { "cases.json" };

    let trace = env::var("RBARITY_TRACE").unwrap_or_default();
    let result = match trace.as_str() {
        "stderr" => run(file_path, &mut StderrTracer::new()),
        "profile" => {
            let mut tracer = ProfilingTracer::new();
            let result = run(file_path, &mut tracer);
            eprintln!("{}", tracer.report());
            result
        }
        _ => run(file_path, &mut NoopTracer),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(mismatches) => {
            eprintln!("{mismatches} call(s) did not match their expectation");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Checks every call in the case file, returning the number of unmet expectations.
fn run(file_path: &str, tracer: &mut impl ArityTracer) -> Result<usize, CliError> {
    let contents = read_file(file_path).map_err(CliError::Read)?;
    let cases: CaseFile = serde_json::from_str(&contents)?;

    let mut symbols = SymbolTable::new();
    let arity = cases.arity.build(&mut symbols)?;
    let check = KeywordArityCheck::new(&arity);
    println!(
        "arity: expects {} positional, Method#arity {}",
        arity.expected_description(),
        arity.method_arity()
    );

    let mut mismatches = 0;
    for (index, call) in cases.calls.into_iter().enumerate() {
        let positional = call.args.into_iter().map(|arg| arg.into_value(&mut symbols)).collect();
        let keywords = call.keywords.map(|pairs| Object::pairs_into_hash(pairs, &mut symbols));
        let call_args = CallArgs::new(positional, keywords);

        let outcome = match check.check(call_args.given(), call_args.keywords(), &symbols, &mut *tracer) {
            Ok(()) => "ok".to_owned(),
            Err(err) => err.to_string(),
        };
        match call.expect {
            Some(expected) if expected != outcome => {
                println!("call {index}: {outcome} (expected: {expected})");
                mismatches += 1;
            }
            _ => println!("call {index}: {outcome}"),
        }
    }
    Ok(mismatches)
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("Error: {file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("Error reading {file_path}: {err}"));
        }
    }
    fs::read_to_string(file_path).map_err(|err| format!("Error reading file: {err}"))
}
