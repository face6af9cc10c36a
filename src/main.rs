//! Purpose: `assertion` CLI entry point; exposes each helper as a subcommand.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit one JSON value on stdout (pretty on a terminal, compact otherwise).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs go to stderr only so stdout stays machine-readable.
use std::ffi::OsString;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use assertion::api::{Error, ErrorKind, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<RunOutcome, (Error, ColorMode)>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "assertion",
    version,
    about = "Presence, intersection, glob, and resource-type helpers for policy assertions",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Values are compared as JSON text. `null`, `[]`, and "" count as absent.
"#,
    after_help = r#"EXAMPLES
  $ assertion presence '[]'
  $ assertion intersect '["a","b"]' '["b"]'
  $ assertion files --pattern '*.tf' modules/vpc/main.tf README.md
  $ assertion filter --type aws_s3_bucket resources.json

LEARN MORE
  $ assertion <command> --help
  Set RUST_LOG=debug to see why a comparison returned false."#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        arg_required_else_help = true,
        about = "Wrap a value in double quotes",
        after_help = r#"EXAMPLES
  $ assertion quote private
  {"quoted":"\"private\""}"#
    )]
    Quote {
        #[arg(help = "Raw value", allow_hyphen_values = true)]
        value: String,
    },
    #[command(
        arg_required_else_help = true,
        about = "Strip one pair of surrounding double quotes",
        after_help = r#"EXAMPLES
  $ assertion unquote '"private"'
  {"unquoted":"private"}

NOTES
  - Values that do not start with a quote are returned unchanged
  - A leading quote without a matching trailing quote is an error"#
    )]
    Unquote {
        #[arg(help = "Possibly quoted value", allow_hyphen_values = true)]
        value: String,
    },
    #[command(
        arg_required_else_help = true,
        about = "Classify a JSON-encoded value as missing, null, empty, or populated",
        after_help = r#"EXAMPLES
  $ assertion presence null
  $ assertion presence '["a"]'"#
    )]
    Presence {
        #[arg(help = "JSON-encoded value (use '' for missing)", allow_hyphen_values = true)]
        value: String,
    },
    #[command(
        arg_required_else_help = true,
        about = "Test two JSON string arrays for a common element",
        after_help = r#"EXAMPLES
  $ assertion intersect '["a","b"]' '["b","c"]'
  {"intersect":true}

NOTES
  - Malformed input counts as no intersection unless --strict is set"#
    )]
    Intersect {
        #[arg(help = "JSON array of strings")]
        left: String,
        #[arg(help = "JSON array of strings")]
        right: String,
        #[arg(long, help = "Fail on input that is not a JSON array of strings")]
        strict: bool,
    },
    #[command(
        arg_required_else_help = true,
        about = "Split paths by whether their file name matches a glob pattern",
        after_help = r#"EXAMPLES
  $ assertion files --pattern '*.tf' --pattern '*.tfvars' main.tf docs/README.md

NOTES
  - Patterns match the file name only; directories are ignored
  - Syntax: *, ?, [abc], [a-z], [!abc] or [^abc], \c for a literal c
  - Runs of * act as a single *"#
    )]
    Files {
        #[arg(short = 'p', long = "pattern", help = "Repeatable glob pattern")]
        patterns: Vec<String>,
        #[arg(required = true, help = "Paths to test", value_hint = ValueHint::FilePath)]
        paths: Vec<String>,
    },
    #[command(
        arg_required_else_help = true,
        about = "Select resources of one type from a JSON resource document",
        after_help = r#"EXAMPLES
  $ assertion filter --type aws_s3_bucket resources.json
  $ cat resources.json | assertion filter --type '*'

NOTES
  - Input is a JSON array of resources or a single resource object
  - Output is pretty-printed JSON with two-space indentation"#
    )]
    Filter {
        #[arg(long = "type", help = "Resource type to keep, or * for all")]
        resource_type: String,
        #[arg(
            default_value = "-",
            help = "Resource document path (use - for stdin)",
            value_hint = ValueHint::FilePath
        )]
        file: String,
    },
    #[command(about = "Show version")]
    Version,
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ assertion completion bash > ~/.local/share/bash-completion/completions/assertion
  $ assertion completion zsh > ~/.zfunc/_assertion"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(file: &str) -> Result<String, Error> {
    let mut text = String::new();
    if file == "-" {
        io::stdin().read_to_string(&mut text).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        return Ok(text);
    }
    let path = PathBuf::from(file);
    std::fs::File::open(&path)
        .and_then(|mut reader| reader.read_to_string(&mut text))
        .map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message("failed to read resource document")
                .with_path(&path)
                .with_source(err)
        })?;
    Ok(text)
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint("Check the path, or pass - to read from stdin."),
        ErrorKind::Io => err.with_hint("I/O error. Check the path and its permissions."),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share command/context if it persists.",
    )
}

fn emit_version_output() {
    if io::stdout().is_terminal() {
        println!("assertion {}", env!("CARGO_PKG_VERSION"));
    } else {
        emit_json(json!({
            "name": "assertion",
            "version": env!("CARGO_PKG_VERSION"),
        }));
    }
}

fn emit_json(value: Value) {
    let pretty = io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::InvalidInput => "invalid input".to_string(),
        ErrorKind::Pattern => "invalid pattern".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::Encode => "json encode failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `assertion --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "assertion") else {
        return "Try `assertion --help`.".to_string();
    };

    let mut parts = Vec::new();
    for token in tokens.iter().skip(pos + 1) {
        if token.starts_with('-') || token.starts_with('<') || token.starts_with('[') {
            break;
        }
        parts.push(*token);
    }

    if parts.is_empty() {
        return "Try `assertion --help`.".to_string();
    }

    format!("Try `assertion {} --help`.", parts.join(" "))
}
