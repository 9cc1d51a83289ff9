use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::application::{parse_category, ExpenseFilter, ExpenseService, ExpenseUpdate};
use crate::domain::format_money;
use crate::io::Exporter;

use super::render;

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Record a new expense dated today
    Add {
        /// Amount (e.g., "4.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category label or key (see `categories`)
        category: String,

        /// Description of the expense
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        description: Vec<String>,
    },

    /// Change an expense; omitted fields keep their current value
    Edit {
        /// List position, id, or id prefix
        reference: String,

        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New description
        #[arg(short, long, num_args = 1..)]
        description: Option<Vec<String>>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// List position, id, or id prefix
        reference: String,
    },

    /// List expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// From date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// To date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Show only the most recent N expenses
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one expense in detail
    Show {
        /// List position, id, or id prefix
        reference: String,
    },

    /// Show the overall total
    Total,

    /// Show the total for every category
    Totals,

    /// Category spending breakdown
    Report {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export the session to CSV or JSON
    Export {
        /// What to export: expenses, report, snapshot
        what: String,

        /// Output file (shell output if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format: csv, json (default: csv, json for snapshot)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List the available categories
    Categories,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// What the session loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session over a single in-memory ledger.
///
/// Command failures are reported on the output and the session keeps going;
/// only errors writing to the output itself are returned.
pub struct Shell<W: Write> {
    service: ExpenseService,
    out: W,
    currency: String,
}

impl<W: Write> Shell<W> {
    pub fn new(service: ExpenseService, out: W, currency: impl Into<String>) -> Self {
        Self {
            service,
            out,
            currency: currency.into(),
        }
    }

    pub fn service(&self) -> &ExpenseService {
        &self.service
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and execute lines until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;

            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Execute a single line of input.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_line(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(self.out, "Error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `<command> --help` as well as usage errors
                write!(self.out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "Executing shell command");

        if let ShellCommand::Quit = command {
            return Ok(Flow::Quit);
        }

        if let Err(e) = self.dispatch(command) {
            writeln!(self.out, "Error: {e:#}")?;
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Add {
                amount,
                category,
                description,
            } => {
                let record = self
                    .service
                    .add_expense(&description.join(" "), &amount, &category)?;
                let position = self.service.ledger().len();
                writeln!(
                    self.out,
                    "Added #{}: {}",
                    position,
                    render::expense_line(&record, &self.currency)
                )?;
                self.write_total()?;
            }

            ShellCommand::Edit {
                reference,
                amount,
                category,
                description,
            } => {
                let update = ExpenseUpdate {
                    description: description.map(|words| words.join(" ")),
                    amount,
                    category,
                };
                if update.is_empty() {
                    bail!("Nothing to change. Use --amount, --category or --description");
                }

                let record = self.service.edit_expense(&reference, update)?;
                writeln!(
                    self.out,
                    "Updated: {}",
                    render::expense_line(&record, &self.currency)
                )?;
                self.write_total()?;
            }

            ShellCommand::Delete { reference } => {
                let record = self.service.delete_expense(&reference)?;
                writeln!(
                    self.out,
                    "Deleted: {}",
                    render::expense_line(&record, &self.currency)
                )?;
                self.write_total()?;
            }

            ShellCommand::List {
                category,
                from,
                to,
                limit,
            } => {
                let filter = ExpenseFilter {
                    category: category.as_deref().map(parse_category).transpose()?,
                    from_date: from.as_deref().map(parse_date).transpose()?,
                    to_date: to.as_deref().map(parse_date).transpose()?,
                    limit,
                };
                let entries = self.service.list_expenses(&filter);
                render::write_expense_table(&mut self.out, &entries, &self.currency)?;
            }

            ShellCommand::Show { reference } => {
                let entry = self.service.get_expense(&reference)?;
                render::write_expense_detail(&mut self.out, &entry, &self.currency)?;
            }

            ShellCommand::Total => self.write_total()?,

            ShellCommand::Totals => {
                render::write_category_totals(
                    &mut self.out,
                    &self.service.category_totals(),
                    self.service.total_expenses(),
                    &self.currency,
                )?;
            }

            ShellCommand::Report { format } => {
                let as_of = Utc::now().date_naive();
                let exporter = Exporter::new(self.service.ledger());
                match format.as_str() {
                    "json" => {
                        exporter.export_report_json(&mut self.out, as_of)?;
                    }
                    "csv" => {
                        exporter.export_report_csv(&mut self.out, as_of)?;
                    }
                    "table" => {
                        let report = self.service.category_report(as_of);
                        render::write_report_table(&mut self.out, &report, &self.currency)?;
                    }
                    other => bail!("Unknown format '{}'. Use table, json or csv", other),
                }
            }

            ShellCommand::Export {
                what,
                output,
                format,
            } => self.export(&what, output, format.as_deref())?,

            ShellCommand::Categories => render::write_categories(&mut self.out)?,

            ShellCommand::Quit => {}
        }

        Ok(())
    }

    fn export(&mut self, what: &str, output: Option<PathBuf>, format: Option<&str>) -> Result<()> {
        let target = ExportTarget::parse(what, format)?;
        let exporter = Exporter::new(self.service.ledger());
        let today = Utc::now().date_naive();

        match output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let writer = BufWriter::new(file);
                let written = match target {
                    ExportTarget::ExpensesCsv => exporter.export_expenses_csv(writer)?,
                    ExportTarget::ReportCsv => exporter.export_report_csv(writer, today)?,
                    ExportTarget::ReportJson => {
                        exporter.export_report_json(writer, today)?.categories.len()
                    }
                    ExportTarget::SnapshotJson => {
                        exporter.export_snapshot_json(writer)?.expenses.len()
                    }
                };
                writeln!(
                    self.out,
                    "Exported {} {} to {}",
                    written,
                    target.unit(),
                    path.display()
                )?;
            }
            None => {
                let out = &mut self.out;
                match target {
                    ExportTarget::ExpensesCsv => {
                        exporter.export_expenses_csv(out)?;
                    }
                    ExportTarget::ReportCsv => {
                        exporter.export_report_csv(out, today)?;
                    }
                    ExportTarget::ReportJson => {
                        exporter.export_report_json(out, today)?;
                    }
                    ExportTarget::SnapshotJson => {
                        exporter.export_snapshot_json(out)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn write_total(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "Total expenses: {}",
            format_money(self.service.total_expenses(), &self.currency)
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportTarget {
    ExpensesCsv,
    ReportCsv,
    ReportJson,
    SnapshotJson,
}

impl ExportTarget {
    fn parse(what: &str, format: Option<&str>) -> Result<Self> {
        match (what, format) {
            ("expenses", None | Some("csv")) => Ok(ExportTarget::ExpensesCsv),
            ("expenses", Some("json")) => {
                bail!("Expenses export is CSV only; use 'export snapshot' for JSON")
            }
            ("report", None | Some("csv")) => Ok(ExportTarget::ReportCsv),
            ("report", Some("json")) => Ok(ExportTarget::ReportJson),
            ("snapshot", None | Some("json")) => Ok(ExportTarget::SnapshotJson),
            ("snapshot", Some("csv")) => {
                bail!("Snapshot export is JSON only; use 'export expenses' for CSV")
            }
            ("expenses" | "report" | "snapshot", Some(other)) => {
                bail!("Unknown format '{}'. Use csv or json", other)
            }
            (other, _) => bail!(
                "Unknown export type '{}'. Use expenses, report or snapshot",
                other
            ),
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            ExportTarget::ExpensesCsv | ExportTarget::SnapshotJson => "expense(s)",
            ExportTarget::ReportCsv | ExportTarget::ReportJson => "category row(s)",
        }
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", date_str))
}

/// Split a line into words. Single or double quotes group words together.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("add 4.50 \"Food & Dining\" Coffee").unwrap(),
            ["add", "4.50", "Food & Dining", "Coffee"]
        );
        assert_eq!(
            split_line("  edit 1   -d 'big lunch' ").unwrap(),
            ["edit", "1", "-d", "big lunch"]
        );
        assert_eq!(split_line("show \"\"").unwrap(), ["show", ""]);
        assert!(split_line("add 1 food \"oops").is_err());
    }

    #[test]
    fn test_export_target_parse() {
        assert_eq!(
            ExportTarget::parse("expenses", None).unwrap(),
            ExportTarget::ExpensesCsv
        );
        assert_eq!(
            ExportTarget::parse("report", Some("json")).unwrap(),
            ExportTarget::ReportJson
        );
        assert_eq!(
            ExportTarget::parse("snapshot", None).unwrap(),
            ExportTarget::SnapshotJson
        );
        assert!(ExportTarget::parse("snapshot", Some("csv")).is_err());
        assert!(ExportTarget::parse("report", Some("xml")).is_err());
        assert!(ExportTarget::parse("invoices", None).is_err());
    }

    #[test]
    fn test_command_line_parsing() {
        let parsed = ShellLine::try_parse_from(["add", "4.50", "food", "Morning", "coffee"]).unwrap();
        match parsed.command {
            ShellCommand::Add {
                amount,
                category,
                description,
            } => {
                assert_eq!(amount, "4.50");
                assert_eq!(category, "food");
                assert_eq!(description, ["Morning", "coffee"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let parsed = ShellLine::try_parse_from(["rm", "2"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Delete { .. }));

        let parsed = ShellLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Quit));
    }
}
