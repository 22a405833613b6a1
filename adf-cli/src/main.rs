// Command-line interface for adf
//
// This binary converts Markdown to Atlassian Document Format (ADF) JSON and offers
// a few tools around that conversion: per-stage inspection, validation of ADF
// produced elsewhere, and parsing of ticket templates.
//
// All conversion logic lives in the adf-babel crate; this crate only deals with
// arguments, files, configuration and exit codes.
//
// Usage:
//  adf <input> [--to <format>] [--from <format>] [-o <file>]  - Convert (default command)
//  adf convert <input> [--to <format>] [--from <format>] [-o <file>] [--compact]
//  adf inspect <path> [<view>]           - Show one pipeline stage (defaults to "ir-treeviz")
//  adf validate <input>                  - Check an ADF JSON or Markdown file
//  adf template <input> [--description-only]
//  adf --list-formats                    - List formats and inspection views
//
// Exit codes: 0 on success, 1 on any error or an invalid document in `validate`,
// 2 when `convert` produced output that failed validation.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/view.
// Example:
//  adf inspect notes.md --extra-inlines
//  adf convert notes.md --extra-pretty false

use adf_babel::inspect::{self, AVAILABLE_VIEWS, DEFAULT_VIEW};
use adf_babel::template::{parse_template, TemplateDefaults};
use adf_babel::{Document, FormatRegistry, StructuralValidator, ValidationReport, Validator};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use log::{debug, LevelFilter};
use std::collections::HashMap;
use std::fs;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "validate", "template", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to Atlassian Document Format")
        .long_about(
            "adf converts Markdown into Atlassian Document Format (ADF) JSON, the rich\n\
            text format used by Jira and Confluence.\n\n\
            Commands:\n  \
            - convert:  Markdown (or ADF) to ADF JSON or a tree view\n  \
            - inspect:  View one stage of the conversion pipeline\n  \
            - validate: Check an ADF JSON or Markdown file\n  \
            - template: Parse a ticket template\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            adf notes.md                       # Convert to ADF JSON (stdout)\n  \
            adf notes.md --compact -o out.json # Single-line JSON to a file\n  \
            adf inspect notes.md blocks        # Show the segmented blocks\n  \
            adf validate body.json             # Check ADF from elsewhere",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspection views")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline decisions to stderr (same as RUST_LOG=debug)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert a document to ADF JSON or another output format.\n\n\
                    Formats:\n  \
                    - markdown: Markdown subset (.md, .markdown), input only\n  \
                    - adf:      ADF JSON (.json, .adf)\n  \
                    - treeviz:  Tree view of the document, output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    With output.validate enabled, validation issues go to stderr and\n\
                    the exit status is 2.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .default_value("adf")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Write single-line JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect one stage of the Markdown conversion")
                .long_about(
                    "View a Markdown file at different processing stages.\n\n\
                    Views:\n  \
                    - preprocessed: normalized Markdown\n  \
                    - blocks:       segmented blocks before inline parsing\n  \
                    - ir-treeviz:   document tree visualization (default)\n  \
                    - adf-json:     final ADF JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-inlines       List inline runs in ir-treeviz\n  \
                    --extra-pretty false  Single-line adf-json",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to show. Defaults to 'ir-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_VIEWS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate an ADF JSON file, or the conversion of a Markdown file")
                .arg(
                    Arg::new("input")
                        .help("Input file path (.json or .md)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Parse a ticket template")
                .long_about(
                    "Parse a Markdown ticket template into its title, metadata and\n\
                    sections, printed as JSON.\n\n\
                    With --description-only, print the ADF JSON of the combined\n\
                    description instead.",
                )
                .arg(
                    Arg::new("input")
                        .help("Template file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("description-only")
                        .long("description-only")
                        .help("Print only the description as ADF JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the convert subcommand was left out
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches
                .get_one::<String>("to")
                .expect("to has a default");
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            if sub_matches.get_flag("compact") {
                config.output.pretty = false;
            }
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_VIEW);
            handle_inspect_command(path, view, &extra_params, &config);
        }
        Some(("validate", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_validate_command(input);
        }
        Some(("template", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let description_only = sub_matches.get_flag("description-only");
            handle_template_command(input, description_only, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Installs the logger. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn detect_format(input: &str) -> String {
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn print_issues(report: &ValidationReport) {
    for issue in &report.errors {
        eprintln!("  {issue}");
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    debug!("parsed '{input}' as {from}: {} blocks", doc.blocks.len());

    let report = if config.output.validate {
        Some(StructuralValidator.validate(&doc))
    } else {
        None
    };

    let format_options = serialize_options(to, config, extra_params);
    let text = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{}", text.trim_end()),
    }

    if let Some(report) = report.filter(|report| !report.is_valid()) {
        eprintln!("Validation failed:");
        print_issues(&report);
        std::process::exit(2);
    }
}

/// Options passed to the target format: configured defaults, then `--extra-*`.
fn serialize_options(
    to: &str,
    config: &AdfConfig,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if to == "adf" {
        options.insert("pretty".to_string(), config.output.pretty.to_string());
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let source = read_input(path);
    let params = build_inspect_params(view, config, extra_params);

    let output = inspect::execute_view(&source, view, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{}", output.trim_end());
}

fn build_inspect_params(
    view: &str,
    config: &AdfConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if view == "adf-json" {
        params.insert("pretty".to_string(), config.output.pretty.to_string());
    }
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

/// Handle the validate command
fn handle_validate_command(input: &str) {
    let from = detect_format(input);
    let source = read_input(input);

    let doc: Document = FormatRegistry::default()
        .parse(&source, &from)
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });

    let report = StructuralValidator.validate(&doc);
    if report.is_valid() {
        println!("valid");
    } else {
        println!("invalid ({} issues)", report.errors.len());
        for issue in &report.errors {
            println!("  {issue}");
        }
        std::process::exit(1);
    }
}

/// Handle the template command
fn handle_template_command(input: &str, description_only: bool, config: &AdfConfig) {
    let source = read_input(input);
    let defaults = TemplateDefaults::from(&config.template);
    let ticket = parse_template(&source, &defaults);

    let rendered = if description_only {
        adf_babel::formats::adf::to_json(&ticket.description_document(), config.output.pretty)
            .map_err(|e| e.to_string())
    } else if config.output.pretty {
        serde_json::to_string_pretty(&ticket).map_err(|e| e.to_string())
    } else {
        serde_json::to_string(&ticket).map_err(|e| e.to_string())
    };

    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();

    println!("Conversion formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut modes = Vec::new();
            if format.supports_parsing() {
                modes.push("in");
            }
            if format.supports_serialization() {
                modes.push("out");
            }
            println!(
                "  {:<10} {:<8} {}",
                name,
                modes.join("/"),
                format.description()
            );
        }
    }

    println!("\nInspection views:");
    for view in AVAILABLE_VIEWS {
        println!("  {view}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut AdfConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("pretty") {
        config.output.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = extra_params.remove("validate") {
        config.output.validate = parse_bool_arg("validate", &raw);
    }
    if let Some(project) = take_override(extra_params, &["project", "default-project"]) {
        config.template.default_project = project;
    }
    if let Some(priority) = take_override(extra_params, &["priority", "default-priority"]) {
        config.template.default_priority = priority;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
