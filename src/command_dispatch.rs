//! Purpose: Hold top-level CLI command dispatch for `assertion`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Each command emits exactly one stdout payload or returns an `Error`.
//! Invariants: Business logic lives in the library `api`; this layer only shapes output.

use assertion::api::{
    FilePatterns, Presence, filter_resources_by_type, is_absent, is_empty, is_not_null,
    is_present, json_lists_intersect, json_stringify, parse_resources, quoted,
    try_json_lists_intersect, unquoted,
};
use tracing::debug;

use super::*;

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Quote { value } => {
            emit_json(json!({ "quoted": quoted(&value) }));
            Ok(RunOutcome::ok())
        }
        Command::Unquote { value } => {
            let value = unquoted(&value)?;
            emit_json(json!({ "unquoted": value }));
            Ok(RunOutcome::ok())
        }
        Command::Presence { value } => {
            emit_json(presence_json(&value));
            Ok(RunOutcome::ok())
        }
        Command::Intersect {
            left,
            right,
            strict,
        } => {
            let found = if strict {
                try_json_lists_intersect(&left, &right)?
            } else {
                json_lists_intersect(&left, &right)
            };
            emit_json(json!({ "intersect": found }));
            Ok(RunOutcome::ok())
        }
        Command::Files { patterns, paths } => {
            let patterns = FilePatterns::compile(&patterns)?;
            let (included, excluded): (Vec<String>, Vec<String>) =
                paths.into_iter().partition(|path| patterns.matches(path));
            debug!(
                included = included.len(),
                excluded = excluded.len(),
                "classified paths"
            );
            emit_json(json!({ "included": included, "excluded": excluded }));
            Ok(RunOutcome::ok())
        }
        Command::Filter {
            resource_type,
            file,
        } => {
            let text = read_input(&file)?;
            let resources = parse_resources(&text).map_err(|err| {
                if file == "-" {
                    err
                } else {
                    err.with_path(&file)
                }
            })?;
            let selected = filter_resources_by_type(&resources, &resource_type);
            println!("{}", json_stringify(selected.as_ref())?);
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output();
            Ok(RunOutcome::ok())
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "assertion", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}

fn presence_json(value: &str) -> Value {
    json!({
        "value": value,
        "presence": Presence::classify(value).as_str(),
        "absent": is_absent(value),
        "present": is_present(value),
        "not_null": is_not_null(value),
        "empty": is_empty(value),
    })
}
