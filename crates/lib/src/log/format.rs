use std::fmt;

use chrono::Local;
use owo_colors::{OwoColorize, Style};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Event formatter producing `<timestamp>  <LEVEL> <message> key=value ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
  S: Subscriber + for<'a> LookupSpan<'a>,
  N: for<'a> FormatFields<'a> + 'static,
{
  fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
    let mut fields = FieldCollector::default();
    event.record(&mut fields);

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let line = render_line(
      &timestamp,
      *event.metadata().level(),
      &fields.message,
      &fields.fields,
      writer.has_ansi_escapes(),
    );
    writeln!(writer, "{}", line)
  }
}

/// Renders a single log line.
///
/// Fields keep the order they were given in. With `ansi` set, the timestamp
/// is dimmed, the level bold and colored, and field keys cyan.
pub fn render_line(timestamp: &str, level: Level, message: &str, fields: &[(String, String)], ansi: bool) -> String {
  let level_str = format!("{:<5}", level.as_str());

  let mut line = if ansi {
    format!(
      "{}  {} {}",
      timestamp.dimmed(),
      level_str.style(level_style(level)),
      message
    )
  } else {
    format!("{}  {} {}", timestamp, level_str, message)
  };

  for (key, value) in fields {
    if ansi {
      line.push_str(&format!(" {}={}", key.cyan(), value));
    } else {
      line.push_str(&format!(" {}={}", key, value));
    }
  }

  line
}

fn level_style(level: Level) -> Style {
  let style = Style::new().bold();
  match level {
    Level::ERROR => style.red(),
    Level::WARN => style.yellow(),
    Level::INFO => style.green(),
    Level::DEBUG => style.blue(),
    Level::TRACE => style.white(),
  }
}

#[derive(Default)]
struct FieldCollector {
  message: String,
  fields: Vec<(String, String)>,
}

impl FieldCollector {
  fn push(&mut self, field: &Field, value: String) {
    if field.name() == "message" {
      self.message = value;
    } else {
      self.fields.push((field.name().to_string(), value));
    }
  }
}

impl Visit for FieldCollector {
  fn record_str(&mut self, field: &Field, value: &str) {
    self.push(field, value.to_string());
  }

  fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
    self.push(field, format!("{:?}", value));
  }
}
