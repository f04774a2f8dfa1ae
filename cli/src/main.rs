//! docpress CLI - Markdown and plain text to PDF/DOCX

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpress::convert::analyze_for_conversion;
use docpress::render::{to_json, Template};
use docpress::source::read_source;
use docpress::{
    ConversionStats, Docpress, JsonFormat, OutputFormat, PageSize, StructureMode, TemplateName,
    Warning,
};

#[derive(Parser)]
#[command(name = "docpress")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert Markdown and plain text into PDF and DOCX", long_about = None)]
struct Cli {
    /// Input file (.md, .ipynb, or plain text)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct StyleArgs {
    /// Typographic template (classic, modern, minimal)
    #[arg(short, long, env = "DOCPRESS_TEMPLATE", default_value = "classic")]
    template: TemplateName,

    /// Output format (pdf, docx)
    #[arg(short, long, env = "DOCPRESS_FORMAT", default_value = "pdf")]
    format: OutputFormat,

    /// Page size (a4, letter, legal)
    #[arg(long, env = "DOCPRESS_PAGE_SIZE", default_value = "a4")]
    page_size: PageSize,

    /// Structure mode (markdown, auto, literal, bulletize); by file type if omitted
    #[arg(short, long)]
    mode: Option<StructureMode>,

    /// Document title (defaults to the first heading or the file name)
    #[arg(long)]
    title: Option<String>,

    /// Do not add the title as a heading or title line
    #[arg(long)]
    no_title_heading: bool,
}

impl StyleArgs {
    fn builder(&self) -> Docpress {
        let mut docpress = Docpress::new()
            .with_template(self.template)
            .with_format(self.format)
            .with_page_size(self.page_size);
        if let Some(mode) = self.mode {
            docpress = docpress.with_mode(mode);
        }
        if let Some(ref title) = self.title {
            docpress = docpress.with_title(title.clone());
        }
        if self.no_title_heading {
            docpress = docpress.without_title_heading();
        }
        docpress
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more files
    Convert {
        /// Input files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the analyzed structure of a file as JSON
    Inspect {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Structure mode; by file type if omitted
        #[arg(short, long)]
        mode: Option<StructureMode>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print block statistics instead of the document
        #[arg(long)]
        stats: bool,
    },

    /// List the available templates
    Templates,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            style,
        }) => cmd_convert(&inputs, output.as_deref(), &style),
        Some(Commands::Inspect {
            input,
            mode,
            compact,
            stats,
        }) => cmd_inspect(&input, mode, compact, stats),
        Some(Commands::Templates) => {
            cmd_templates();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&[input], cli.output.as_deref(), &cli.style)
            } else {
                println!("{}", "Usage: docpress <FILE> [OUTPUT]".yellow());
                println!("       docpress --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let docpress = style.builder();
    log::debug!(
        "Converting {} files to {} with template {} into {}",
        inputs.len(),
        style.format,
        style.template,
        output_dir.display()
    );

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut failures = 0;
    let mut totals = ConversionStats::new();

    for input in inputs {
        pb.set_message(input.display().to_string());
        match docpress.convert_file(input) {
            Ok(result) => {
                let path = result.persist_in(&output_dir)?;
                for warning in &result.warnings {
                    pb.suspend(|| print_warning(input, warning));
                }
                totals.merge(&result.stats);
                written.push((path, result.stats.page_count));
            }
            Err(e) => {
                failures += 1;
                pb.suspend(|| {
                    eprintln!("{} {}: {}", "Failed".red().bold(), input.display(), e)
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    if !written.is_empty() {
        println!("\n{}", "Output files:".green().bold());
        let last = written.len() - 1;
        for (i, (path, pages)) in written.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            if style.format == OutputFormat::Pdf {
                println!("  {} {} ({} pages)", branch.dimmed(), path.display(), pages);
            } else {
                println!("  {} {}", branch.dimmed(), path.display());
            }
        }
        println!(
            "{} {} blocks, {} words",
            "Total:".bold(),
            totals.block_count(),
            totals.word_count
        );
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn print_warning(input: &Path, warning: &Warning) {
    eprintln!("{} {}: {}", "Warning".yellow().bold(), input.display(), warning);
}

fn cmd_inspect(
    input: &Path,
    mode: Option<StructureMode>,
    compact: bool,
    stats_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (kind, text) = read_source(input)?;

    let mut docpress = Docpress::new();
    if let Some(mode) = mode {
        docpress = docpress.with_mode(mode);
    }
    let mut options = docpress.options_for(kind);
    if let Some(name) = input.file_name().and_then(|n| n.to_str()) {
        options = options.with_file_name(name);
    }

    let analysis = analyze_for_conversion(&text, &options);
    for warning in &analysis.warnings {
        print_warning(input, warning);
    }

    let stats = ConversionStats::from_document(&analysis.document);
    if stats_only {
        let json = if compact {
            serde_json::to_string(&stats)?
        } else {
            serde_json::to_string_pretty(&stats)?
        };
        println!("{}", json);
        return Ok(());
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    println!("{}", to_json(&analysis.document, format)?);

    eprintln!(
        "{} {:?} source, {} mode, {} blocks, {} words",
        "Analyzed".cyan().bold(),
        kind,
        options.analyze.mode,
        stats.block_count(),
        stats.word_count
    );

    Ok(())
}

fn cmd_templates() {
    println!("{}", "Templates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for name in TemplateName::ALL {
        let template: &Template = name.template();
        println!(
            "{:<8} body {} {}pt, headings {}, code {} {}pt, margin {}pt",
            name.as_str().bold(),
            template.body_font.word_name(),
            template.body_size,
            template.head_font.word_name(),
            template.code_font.word_name(),
            template.code_size,
            template.margin
        );
    }
}

fn cmd_version() {
    println!("{} {}", "docpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown and plain text to PDF/DOCX converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docpress".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "docpress",
            "convert",
            "a.md",
            "b.txt",
            "--template",
            "modern",
            "--format",
            "word",
            "--page-size",
            "letter",
            "--mode",
            "bulletize",
        ])
        .unwrap();

        let Some(Commands::Convert { inputs, style, .. }) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(inputs.len(), 2);
        assert_eq!(style.template, TemplateName::Modern);
        assert_eq!(style.format, OutputFormat::Docx);
        assert_eq!(style.page_size, PageSize::LETTER);
        assert_eq!(style.mode, Some(StructureMode::Bulletize));
    }

    #[test]
    fn test_rejects_unknown_template() {
        let parsed = Cli::try_parse_from(["docpress", "convert", "a.md", "--template", "fancy"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_convert_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.md");
        fs::write(&input, "# Notes\n\n- one\n- two").unwrap();
        let out = dir.path().join("out");

        let cli = Cli::try_parse_from(["docpress", "convert", "x", "--format", "docx"]).unwrap();
        let Some(Commands::Convert { style, .. }) = cli.command else {
            panic!("expected convert command");
        };

        cmd_convert(&[input], Some(&out), &style).unwrap();
        assert!(out.join("notes.docx").exists());
    }

    #[test]
    fn test_convert_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["docpress", "convert", "x"]).unwrap();
        let Some(Commands::Convert { style, .. }) = cli.command else {
            panic!("expected convert command");
        };

        let missing = dir.path().join("missing.md");
        assert!(cmd_convert(&[missing], Some(dir.path()), &style).is_err());
    }
}
