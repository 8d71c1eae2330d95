use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "propform",
    version,
    about = "render a property filter form for observation data",
    long_about = "propform turns a table of observations into a self-contained HTML fragment: a property dropdown wired to a sortable, exportable table.\n\nExamples:\n  propform -i observations.json -o form.html\n  propform -i observations.csv --standalone --title 'Station A'\n  cat rows.json | propform -i - > form.html\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help_heading = "Input",
        help = "Dataset file (JSON array of objects or CSV); '-' reads stdin."
    )]
    pub input: Option<String>,

    #[arg(
        short = 'f',
        long = "input-format",
        value_name = "FORMAT",
        help_heading = "Input",
        help = "Input format (json, csv or tsv). Inferred from the file extension when omitted."
    )]
    pub input_format: Option<String>,

    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        help_heading = "Input",
        help = "CSV field delimiter (single byte, default ',', '\\t' for tsv format or .tsv files)."
    )]
    pub delimiter: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file (at --config or ~/.propform/config.yml) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the document to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 's',
        long = "standalone",
        help_heading = "Output",
        help = "Wrap the fragment in a complete HTML page."
    )]
    pub standalone: bool,

    #[arg(
        short = 't',
        long = "title",
        value_name = "TITLE",
        help_heading = "Output",
        help = "Page title used with --standalone."
    )]
    pub title: Option<String>,
}
