use std::io::{self, IsTerminal, Write};

use taskboard_core::filter::{self, BoardEntry, Filters};
use taskboard_core::{Mode, Priority, Stats};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Colour follows the `color` setting, and only ever applies on a terminal.
    pub fn new(cfg: &Config) -> Self {
        Self::with_color(cfg, io::stdout().is_terminal())
    }

    fn with_color(cfg: &Config, terminal: bool) -> Self {
        let wanted = cfg.get_bool("color").unwrap_or(true);
        Self {
            color: wanted && terminal,
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn print_mode<W: Write>(&self, out: &mut W, mode: Mode) -> anyhow::Result<()> {
        match mode {
            Mode::Demo => writeln!(
                out,
                "{}",
                self.paint("demo mode: task API unreachable, changes stay local", "33")
            )?,
            Mode::Connected => writeln!(out, "{}", self.paint("connected", "32"))?,
            Mode::Unknown => {}
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, out, entries), fields(count = entries.len()))]
    pub fn print_board<W: Write>(
        &self,
        out: &mut W,
        entries: &[BoardEntry],
        filters: &Filters,
    ) -> anyhow::Result<()> {
        if entries.is_empty() {
            writeln!(out, "{}", filter::empty_state_message(filters))?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Done".to_string(),
            "Priority".to_string(),
            "Category".to_string(),
            "Title".to_string(),
        ];

        let rows = entries
            .iter()
            .map(|entry| {
                let done = if entry.task.completed { "✓" } else { "" };
                vec![
                    self.paint(&entry.task.id.to_string(), "33"),
                    done.to_string(),
                    self.priority_cell(entry.meta.priority),
                    entry.meta.category.clone(),
                    entry.task.title.clone(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn print_stats<W: Write>(&self, out: &mut W, stats: &Stats) -> anyhow::Result<()> {
        writeln!(out, "completion rate  {}%", stats.completion_rate)?;
        writeln!(out, "completed        {}", stats.completed)?;
        writeln!(out, "active           {}", stats.active)?;
        writeln!(out, "high priority    {}", stats.high_priority)?;
        writeln!(out, "total            {}", stats.total)?;
        Ok(())
    }

    pub fn print_categories<W: Write>(
        &self,
        out: &mut W,
        categories: &[String],
    ) -> anyhow::Result<()> {
        if categories.is_empty() {
            writeln!(out, "No categories yet")?;
        }
        for category in categories {
            writeln!(out, "{category}")?;
        }
        Ok(())
    }

    fn priority_cell(&self, priority: Priority) -> String {
        let text = format!("{} {}", priority.icon(), priority.label());
        let code = match priority {
            Priority::High => "31",
            Priority::Medium => "33",
            Priority::Low => "32",
        };
        self.paint(&text, code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    for (idx, header) in headers.iter().enumerate() {
        if idx == last {
            write!(writer, "{header}")?;
        } else {
            write!(writer, "{:width$} ", header, width = widths[idx])?;
        }
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx == last {
                write!(writer, "{cell}")?;
                continue;
            }
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
