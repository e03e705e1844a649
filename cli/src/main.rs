//! unbb CLI - forum markup rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unbb::model::{MarkupNode, Tag};
use unbb::parser::{self, Token};
use unbb::{render, Attachments, CleanupPreset, JsonFormat, RenderOptions, RenderStats};

#[derive(Parser)]
#[command(name = "unbb")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render forum BBCode markup to text and JSON", long_about = None)]
struct Cli {
    /// Input markup file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Attachment table (JSON array)
    #[arg(short, long, value_name = "FILE")]
    attachments: Option<PathBuf>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markup file
    Render {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render several markup files into a directory
    Batch {
        /// Input markup files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Dump the token stream
    Tokens {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Dump the parsed markup tree
    Tree {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show rendering statistics
    Info {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Attachment table (JSON array)
        #[arg(short, long, value_name = "FILE")]
        attachments: Option<PathBuf>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Options shared by the rendering commands.
#[derive(clap::Args)]
struct RenderArgs {
    /// Attachment table (JSON array)
    #[arg(short, long, value_name = "FILE")]
    attachments: Option<PathBuf>,

    /// strftime pattern for merge timestamps
    #[arg(long, env = "UNBB_DATE_FORMAT")]
    date_format: Option<String>,

    /// UTC offset for merge timestamps, in minutes
    #[arg(long, env = "UNBB_UTC_OFFSET", allow_negative_numbers = true)]
    utc_offset: Option<i32>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        if let Some(format) = &self.date_format {
            options = options.with_date_format(format.clone());
        }
        if let Some(minutes) = self.utc_offset {
            options = options.with_utc_offset(minutes);
        }
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup
    Standard,
    /// Aggressive cleanup
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Display text
    Text,
    /// Content blocks as JSON
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            render,
            format,
            compact,
            output,
        }) => cmd_render(&input, &render, format, compact, output.as_deref()),
        Some(Commands::Batch {
            inputs,
            render,
            format,
            output,
        }) => cmd_batch(&inputs, &render, format, output.as_deref()),
        Some(Commands::Tokens { input }) => cmd_tokens(&input),
        Some(Commands::Tree { input }) => cmd_tree(&input),
        Some(Commands::Info {
            input,
            attachments,
            json,
        }) => cmd_info(&input, attachments.as_deref(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render to text if input is provided
            if let Some(input) = cli.input {
                let args = RenderArgs {
                    attachments: cli.attachments,
                    date_format: None,
                    utc_offset: None,
                    cleanup: cli.cleanup,
                };
                cmd_render(&input, &args, OutputFormat::Text, false, None)
            } else {
                println!("{}", "Usage: unbb <FILE>".yellow());
                println!("       unbb --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_attachments(path: Option<&Path>) -> Result<Attachments, unbb::Error> {
    match path {
        Some(path) => {
            let table = unbb::load_attachments(path)?;
            log::debug!("loaded {} attachments from {}", table.len(), path.display());
            Ok(table)
        }
        None => Ok(Attachments::new()),
    }
}

fn format_blocks(
    blocks: &[unbb::ContentBlock],
    format: OutputFormat,
    compact: bool,
) -> Result<String, unbb::Error> {
    match format {
        OutputFormat::Text => Ok(render::to_text(blocks)),
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(blocks, json_format)
        }
    }
}

fn cmd_render(
    input: &Path,
    args: &RenderArgs,
    format: OutputFormat,
    compact: bool,
    output: Option<&Path>,
) -> CliResult {
    let attachments = load_attachments(args.attachments.as_deref())?;
    let blocks = unbb::render_file(input, &attachments, &args.options())?;
    let content = format_blocks(&blocks, format, compact)?;

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    args: &RenderArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("unbb_output"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading posts...");
    let posts = inputs
        .iter()
        .map(fs::read_to_string)
        .collect::<Result<Vec<_>, _>>()?;
    let attachments = load_attachments(args.attachments.as_deref())?;
    let rendered = unbb::render_many(&posts, &attachments, &args.options());
    pb.inc(1);

    let mut written = Vec::with_capacity(inputs.len());
    for (input, blocks) in inputs.iter().zip(&rendered) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(format!("Writing {}...", stem));
        let name = format!("{}.{}", stem, format.extension());
        fs::write(output_dir.join(&name), format_blocks(blocks, format, false)?)?;
        written.push(name);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_tokens(input: &Path) -> CliResult {
    let markup = fs::read_to_string(input)?;
    let options = parser::ParseOptions::default();

    for token in parser::tokenize(&markup, &options) {
        match &token {
            Token::Open { raw, .. } => println!("{} {}", "OPEN ".green(), raw),
            Token::Close { raw, .. } => println!("{} {}", "CLOSE".red(), raw),
            Token::Leaf { raw, .. } => println!("{} {}", "LEAF ".cyan(), raw),
            Token::Text(text) => println!("{} {:?}", "TEXT ".dimmed(), text),
        }
    }

    Ok(())
}

fn cmd_tree(input: &Path) -> CliResult {
    let markup = fs::read_to_string(input)?;
    let nodes = parser::parse(&markup, &parser::ParseOptions::default());
    for node in &nodes {
        print_node(node, 0);
    }
    Ok(())
}

fn print_node(node: &MarkupNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        MarkupNode::Text(text) => println!("{}{:?}", indent, text),
        MarkupNode::Tagged {
            tag,
            attribute,
            children,
        } => {
            let name = match tag {
                Tag::Format(_) => tag.name().as_str().yellow(),
                Tag::Structure(_) => tag.name().as_str().cyan().bold(),
                Tag::Leaf(_) => tag.name().as_str().magenta(),
            };
            match attribute {
                Some(attribute) => println!("{}{} {}", indent, name, attribute.dimmed()),
                None => println!("{}{}", indent, name),
            }
            for child in children {
                print_node(child, depth + 1);
            }
        }
    }
}

fn cmd_info(input: &Path, attachments: Option<&Path>, json: bool) -> CliResult {
    let table = load_attachments(attachments)?;
    let markup = fs::read_to_string(input)?;
    let result = unbb::render_with_stats(&markup, &table, &RenderOptions::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
        return Ok(());
    }

    println!("{}", "Post Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Markup".bold(), markup.len());
    println!("{}: {}", "Attachments".bold(), table.len());
    println!("{}: {}", "Top-level blocks".bold(), result.len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_stats(&result.stats);

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Text blocks".bold(), stats.text_block_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Files".bold(), stats.attachment_count);
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Spoilers".bold(), stats.spoiler_count);
    println!("{}: {}", "Lists".bold(), stats.list_count);
    println!("{}: {}", "Smiles".bold(), stats.smile_count);
}

fn cmd_version() {
    println!("{} {}", "unbb".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Forum markup rendering tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unbb".dimmed());
    println!("License: MIT");
}
