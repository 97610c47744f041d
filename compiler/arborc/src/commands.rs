//! Command handlers. Each returns `false` after reporting a failure.

use ariadne::{Label, Report, ReportKind, Source};

use arbor_json::{
    copy_events, parse_document, JsonError, JsonEvent, JsonExpr, TreeReader, TreeWriter,
};

fn read_file(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            None
        }
    }
}

/// Read and parse a document, rendering parse failures against the source.
fn load(path: &str) -> Option<JsonExpr> {
    let text = read_file(path)?;
    match parse_document(&text) {
        Ok(doc) => Some(doc),
        Err(err) => {
            let start = err.offset.min(text.len());
            let report = Report::build(ReportKind::Error, path, start)
                .with_message(format!("malformed JSON: {}", err.kind))
                .with_label(Label::new((path, start..start)).with_message(err.kind.to_string()))
                .finish();
            if report.eprint((path, Source::from(text.as_str()))).is_err() {
                eprintln!("{path}: {err}");
            }
            None
        }
    }
}

fn report(path: &str, err: &JsonError) -> bool {
    eprintln!("{path}: {err}");
    false
}

/// One line per event, indented by container depth.
pub(crate) fn render_events(doc: JsonExpr) -> Result<String, JsonError> {
    let mut reader = TreeReader::new(doc);
    let mut out = String::new();
    let mut depth = 0usize;
    while let Some(event) = reader.next_event()? {
        if matches!(event, JsonEvent::EndObject | JsonEvent::EndArray) {
            depth = depth.saturating_sub(1);
        }
        let line = match event {
            JsonEvent::PropertyName(name) => format!("PropertyName {}", JsonExpr::string(&**name)),
            JsonEvent::String(text) => format!("String {}", JsonExpr::string(&**text)),
            JsonEvent::Number(text) => format!("Number {text}"),
            JsonEvent::Bool(value) => format!("Bool {value}"),
            other => format!("{other:?}"),
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&line);
        out.push('\n');
        if matches!(event, JsonEvent::StartObject | JsonEvent::StartArray) {
            depth += 1;
        }
    }
    Ok(out)
}

/// Rebuild a document by replaying its events into a fresh writer.
pub(crate) fn reformat(doc: JsonExpr) -> Result<JsonExpr, JsonError> {
    let mut reader = TreeReader::new(doc);
    let mut writer = TreeWriter::new();
    copy_events(&mut reader, &mut writer)?;
    writer.into_result()
}

/// Print the structural event stream of a document.
#[tracing::instrument(level = "debug")]
pub fn tokens_file(path: &str) -> bool {
    let Some(doc) = load(path) else {
        return false;
    };
    match render_events(doc) {
        Ok(text) => {
            print!("{text}");
            true
        }
        Err(err) => report(path, &err),
    }
}

/// Re-emit a document as compact JSON.
#[tracing::instrument(level = "debug")]
pub fn format_file(path: &str) -> bool {
    let Some(doc) = load(path) else {
        return false;
    };
    match reformat(doc) {
        Ok(doc) => {
            println!("{doc}");
            true
        }
        Err(err) => report(path, &err),
    }
}

/// `<text> [--seed <u64>]`
pub(crate) fn parse_hash_args(args: &[String]) -> Result<(&str, u64), String> {
    let mut text = None;
    let mut seed = arbor_hash::DEFAULT_SEED;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--seed" {
            let Some(value) = args.get(i + 1) else {
                return Err("--seed needs a value".to_owned());
            };
            seed = parse_seed(value)?;
            i += 2;
        } else if let Some(value) = arg.strip_prefix("--seed=") {
            seed = parse_seed(value)?;
            i += 1;
        } else if text.is_none() {
            text = Some(arg);
            i += 1;
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    text.map(|text| (text, seed)).ok_or_else(|| "missing text".to_owned())
}

fn parse_seed(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| format!("invalid seed '{value}'"))
}

/// Print the seeded stable hash of a string.
pub fn string_hash(args: &[String]) -> bool {
    match parse_hash_args(args) {
        Ok((text, seed)) => {
            println!("{}", arbor_hash::marvin32(text, seed));
            true
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Usage: arbor strhash <text> [--seed <u64>]");
            false
        }
    }
}
