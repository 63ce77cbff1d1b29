mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use headerkit_core::directive::codes;
use headerkit_core::{
    AnyHeader, HEADER_NAMES, HeaderError, SecurityPolicy, load_policy_from_str,
    parse_directive_list,
};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, render_directive_error, render_failure};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "headerkit",
    version,
    about = "Parse, check, and emit HTTP directive-list headers (HSTS, XSS, HPKP, CORS)"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log parser activity to stderr (-v for debug, -vv for trace).
    /// `RUST_LOG` is honoured when this flag is absent.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Tokenize a directive list such as `max-age=60; includeSubDomains`.
    Directives {
        /// Header value, or `-` to read it from stdin.
        value: String,
    },

    /// Parse a header value with its typed record.
    Parse {
        /// Header name (case-insensitive), e.g. Strict-Transport-Security.
        header: String,
        /// Header value, or `-` to read it from stdin.
        value: String,
    },

    /// Print the header fields of a security policy.
    Emit {
        /// Policy JSON file. Without it the built-in baseline is used.
        #[arg(long)]
        policy: Option<String>,
    },

    /// Explain a diagnostic ID (e.g. HDR1003), or list them all.
    Explain { id: Option<String> },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.cmd, format) {
        render_failure(&err, format);
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Directives { value } => cmd_directives(&read_value(&value)?, format),
        Cmd::Parse { header, value } => cmd_parse(&header, &read_value(&value)?, format),
        Cmd::Emit { policy } => cmd_emit(policy.as_deref(), format),
        Cmd::Explain { id } => cmd_explain(id.as_deref(), format),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => {
            let Ok(filter) = EnvFilter::try_from_default_env() else {
                return;
            };
            filter
        }
        1 => EnvFilter::new("headerkit_core=debug"),
        _ => EnvFilter::new("headerkit_core=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_directives(raw: &str, format: Format) -> Result<()> {
    let list = match parse_directive_list(raw) {
        Ok(list) => list,
        Err(err) => {
            render_directive_error(raw, "<value>", &err, format);
            process::exit(1);
        }
    };

    match format {
        Format::Json => {
            // Duplicate names keep their last value, as in `parse_directives`.
            let map: serde_json::Map<String, serde_json::Value> = list
                .iter()
                .map(|d| (d.name.clone(), d.value.clone().into()))
                .collect();
            let out = serde_json::json!({
                "ok": true,
                "directives": list,
                "map": map,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for d in &list {
                if d.value.is_empty() {
                    println!("{}", d.name);
                } else {
                    println!("{} = {}", d.name, d.value);
                }
            }
            if list.is_empty() {
                eprintln!("no directives");
            }
        }
    }
    Ok(())
}

fn cmd_parse(header: &str, raw: &str, format: Format) -> Result<()> {
    let parsed = match AnyHeader::parse_named(header, raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            if let Some(directive_err) = err.directive_error() {
                render_directive_error(raw, header, directive_err, format);
                process::exit(1);
            }
            if let HeaderError::UnknownHeader(_) = err {
                bail!("{err} (known headers: {})", HEADER_NAMES.join(", "));
            }
            return Err(err).with_context(|| format!("cannot parse {header} value {raw:?}"));
        }
    };

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "header": parsed.name(),
                "value": parsed.value(),
                "record": parsed,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => println!("{}: {}", parsed.name(), parsed.value()),
    }
    Ok(())
}

fn cmd_emit(policy_path: Option<&str>, format: Format) -> Result<()> {
    let policy = match policy_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read policy file '{path}'"))?;
            load_policy_from_str(&text).with_context(|| format!("invalid policy file '{path}'"))?
        }
        None => SecurityPolicy::default(),
    };
    let fields = policy.fields();

    match format {
        Format::Json => {
            let headers: Vec<serde_json::Value> = fields
                .iter()
                .map(|(name, value)| serde_json::json!({ "name": name, "value": value }))
                .collect();
            let out = serde_json::json!({ "ok": true, "headers": headers });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for (name, value) in &fields {
                println!("{name}: {value}");
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: Option<&str>, format: Format) -> Result<()> {
    let ids: Vec<&str> = match id {
        Some(id) => vec![id],
        None => codes::all().collect(),
    };

    match format {
        Format::Json => {
            let mut out: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| serde_json::json!({ "id": id, "explanation": codes::explain(id) }))
                .collect();
            // A single lookup prints one object, a listing prints an array.
            let out = match id {
                Some(_) => out.pop().unwrap_or_default(),
                None => serde_json::Value::Array(out),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            use ariadne::Fmt;
            for id in ids {
                match codes::explain(id) {
                    Some(text) => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
                    None => println!("{id}: (no explanation available)"),
                }
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// The literal value, or stdin when it is `-`. A trailing newline from
/// stdin is dropped.
fn read_value(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read header value from stdin")?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_owned())
}
