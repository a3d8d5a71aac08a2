//! Log record formatters.
//!
//! Two renderers share one contract: turn a tracing event into exactly one
//! complete line. [`JsonFormat`] is the machine-readable production format
//! whose `timestamp`/`level`/`message` keys are the wire contract log
//! collectors parse; [`ConsoleFormat`] is the colored format for local
//! development. Both stamp the event with the trace id from
//! [`context`](crate::observability::context) immediately before rendering,
//! for every event regardless of level, and both degrade rather than fail:
//! absent fields render as the sentinel, non-scalar fields are dropped.

use std::fmt;

use chrono::{Local, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::observability::context;

/// Keys the formatters own. Same-named event fields are dropped so call
/// sites cannot overwrite the bookkeeping values.
const RESERVED_FIELDS: &[&str] = &["timestamp", "level", "message", "trace_id", "error_message"];

const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const BRIGHT_MAGENTA: &str = "\x1b[35;1m";

fn level_label(level: &Level) -> &'static str {
    if *level == Level::TRACE {
        "TRACE"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::WARN {
        "WARN"
    } else {
        "ERROR"
    }
}

fn level_color(level: &Level) -> &'static str {
    if *level == Level::TRACE || *level == Level::DEBUG {
        CYAN
    } else if *level == Level::INFO {
        GREEN
    } else if *level == Level::WARN {
        YELLOW
    } else if *level == Level::ERROR {
        RED
    } else {
        BRIGHT_MAGENTA
    }
}

/// Collects an event's fields into the four scalar kinds the formatters
/// accept. The `message` field is kept apart from the extras, and an error
/// value becomes the rendered source chain.
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    error_message: Option<String>,
    fields: Vec<(String, Value)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: Value) {
        let name = field.name();
        if RESERVED_FIELDS.contains(&name) {
            return;
        }
        self.fields.push((name.to_string(), value));
    }
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push(field, Value::from(value));
        }
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn std::error::Error + 'static)) {
        let mut rendered = value.to_string();
        let mut source = value.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        self.error_message = Some(rendered);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // Only the message is taken from debug values; other non-scalar
        // fields are dropped rather than rendered as opaque text.
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

/// Machine-readable formatter: one JSON object per line on stdout.
///
/// Always emits `timestamp` (RFC 3339 UTC), `level`, `message`, and
/// `trace_id`, then merges every scalar event field. Keys are unique; a
/// serialization failure falls back to a minimal line instead of erroring
/// out of the log call.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl<S, N> FormatEvent<S, N> for JsonFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let mut record = Map::new();
        record.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        record.insert(
            "level".to_string(),
            Value::from(level_label(event.metadata().level())),
        );
        record.insert(
            "message".to_string(),
            Value::from(collector.message.unwrap_or_default()),
        );
        record.insert(
            "trace_id".to_string(),
            Value::from(context::current_trace_id()),
        );
        if let Some(error_message) = collector.error_message {
            record.insert("error_message".to_string(), Value::from(error_message));
        }
        for (key, value) in collector.fields {
            record.entry(key).or_insert(value);
        }

        match serde_json::to_string(&record) {
            Ok(line) => writeln!(writer, "{line}"),
            Err(_) => writeln!(
                writer,
                "{{\"level\":\"ERROR\",\"message\":\"log record could not be serialized\"}}"
            ),
        }
    }
}

/// Human-readable formatter for local development.
///
/// One line per event: local timestamp with millisecond precision, a
/// fixed-width color-coded level, the trace id in brackets, the source
/// location, and the message followed by any extra fields. Colors are only
/// emitted when the writer supports ANSI escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let color = if ansi { level_color(meta.level()) } else { "" };
        let cyan = if ansi { CYAN } else { "" };
        let yellow = if ansi { YELLOW } else { "" };
        let magenta = if ansi { MAGENTA } else { "" };
        let reset = if ansi { RESET } else { "" };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        write!(writer, "{cyan}{timestamp}{reset} ")?;
        write!(writer, "{}{:<5}{} ", color, level_label(meta.level()), reset)?;
        write!(writer, "{yellow}[{}]{reset} ", context::current_trace_id())?;
        write!(
            writer,
            "{magenta}{}:{}{reset}",
            meta.file().unwrap_or("?"),
            meta.line()
                .map(|line| line.to_string())
                .unwrap_or_else(|| "?".to_string()),
        )?;
        write!(
            writer,
            " : {color}{}{reset}",
            collector.message.as_deref().unwrap_or("")
        )?;
        for (key, value) in &collector.fields {
            write!(writer, " {key}={value}")?;
        }
        if let Some(error_message) = &collector.error_message {
            write!(writer, " error_message={error_message}")?;
        }
        writeln!(writer)
    }
}
