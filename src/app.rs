use std::io::Write;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use env_logger::Env;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::dataset::PROPERTY_LABEL_COLUMN;
use crate::input::{self, InputFormat};
use crate::output::{FormRenderer, RenderOptions, DEFAULT_TITLE};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label.bold(), value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    input: String,
    input_format: InputFormat,
    delimiter: u8,
    output: Option<String>,
    render: RenderOptions,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let input = args
        .input
        .or(cfg.input)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "input is required (use --input or set 'input' in config)".to_string())?;
    let input = if input == "-" {
        input
    } else {
        config::expand_tilde_string(&input)
    };

    let explicit_format = args.input_format.or(cfg.input_format);
    let input_format = input::resolve_format(explicit_format.as_deref(), &input)
        .map_err(|e| e.to_string())?;

    let delimiter = match args.delimiter.or(cfg.csv_delimiter) {
        Some(raw) => validation::parse_delimiter(&raw)
            .map_err(|e| format!("invalid delimiter '{raw}': {e}"))?,
        None => explicit_format
            .as_deref()
            .and_then(input::delimiter_for_format)
            .or_else(|| input::infer_delimiter_from_path(&input))
            .unwrap_or(b','),
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && p != "-")
        .map(|p| config::expand_tilde_string(&p));

    let standalone = args.standalone || cfg.standalone.unwrap_or(false);
    let title = args
        .title
        .or(cfg.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(RunConfig {
        input,
        input_format,
        delimiter,
        output,
        render: RenderOptions { standalone, title },
        no_color,
    })
}

fn run(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let dataset = input::load_path(&run.input, run.input_format, run.delimiter)
        .map_err(|e| e.to_string())?;

    format_kv_line("Input", &run.input);
    format_kv_line("Rows", &dataset.len().to_string());
    format_kv_line(
        "Unlabeled",
        &dataset.unlabeled_rows(PROPERTY_LABEL_COLUMN).to_string(),
    );

    let renderer = FormRenderer::new(run.render);
    let document = renderer.render(&dataset).map_err(|e| e.to_string())?;

    match run.output.as_deref() {
        Some(path) => {
            std::fs::write(path, document.as_str())
                .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
            format_kv_line("Output", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(document.as_str().as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|e| format!("failed to write document to stdout: {e}"))?;
        }
    }

    eprintln!(
        ":: {} :: {} bytes ::",
        "Completed".green().bold(),
        document.len()
    );
    Ok(())
}

fn init_config(args: &CliArgs) -> Result<(), String> {
    let path = match args.config.as_deref() {
        Some(p) => config::expand_tilde(p),
        None => config::default_config_path()
            .ok_or_else(|| "cannot locate home directory for default config".to_string())?,
    };
    let written = config::ensure_default_config_file(&path)?;
    let state = if written { "written" } else { "already exists" };
    format_kv_line("Config", &format!("{} ({state})", path.display()));
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                print!("{}", cmd.render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => e.exit(),
        },
    };

    init_logging(args.verbose);

    if args.init_config {
        return init_config(&args);
    }

    let cfg = match args.config.as_deref().map(config::expand_tilde) {
        Some(path) => config::load_config(&path, false)?,
        None => ConfigFile::default(),
    };

    let run_config = build_run_config(args, cfg)?;
    log::debug!("run config: {run_config:?}");
    run(run_config)
}
