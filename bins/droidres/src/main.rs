//! droidres CLI
//!
//! Android string resources and Eclipse linked-resource generation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use droidres_android::linked_resources::{self, LinkOptions, LinkScanner, LinkSummary};
use droidres_android::project_file;
use droidres_android::strings_xml::{self, StringsOptions};
use droidres_cli::args::GlobalArgs;
use droidres_cli::logging::{self, LogConfig};
use droidres_cli::output::{display_path, format_count, format_duration, print_json, Status};
use droidres_core::config::{expand_path, Config};
use droidres_core::error::{exit_codes, Error, ResultExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "droidres")]
#[command(about = "Android string resources and Eclipse linked-resource generator")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a key=value properties file into an Android strings.xml
    Strings {
        /// Properties file to read
        input: PathBuf,
        /// strings.xml to write (defaults to `strings.output` from config)
        output: Option<PathBuf>,
        /// Emit values verbatim, without escaping
        #[arg(long)]
        no_escape: bool,
        /// Print the XML instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate Eclipse linked resources for symlink stand-ins
    Links {
        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Directory under the root to walk
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Descriptor file to write (defaults to `links.output` under the root)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Eclipse .project file to update in place
        #[arg(long)]
        project: Option<PathBuf>,
        /// Marker that identifies .java link stand-ins
        #[arg(long)]
        marker: Option<String>,
        /// Print the descriptor instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let Cli { global, command } = Cli::parse();

    global.apply_color();
    logging::init(&LogConfig::from_args(&global))?;

    let exit_code = match run(&global, command) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            report_error(&global, &err);
            err.exit_code()
        }
    };

    std::process::exit(exit_code);
}

fn run(global: &GlobalArgs, command: Commands) -> droidres_core::Result<()> {
    let config = Config::load(global.config.as_deref())?;
    if let Some(path) = &config.path {
        tracing::info!(config = %path.display(), "loaded configuration");
    }

    match command {
        Commands::Strings {
            input,
            output,
            no_escape,
            dry_run,
        } => run_strings(global, &config, &input, output, no_escape, dry_run),
        Commands::Links {
            root,
            source_dir,
            output,
            project,
            marker,
            dry_run,
        } => {
            let mut options = LinkOptions::from(&config.schema.links);
            if let Some(dir) = source_dir {
                options.source_dir = dir;
            }
            if let Some(marker) = marker {
                if marker.is_empty() {
                    return Err(Error::config_invalid("--marker", "must not be empty"));
                }
                options.marker = marker;
            }

            if dry_run {
                run_links_dry(global, &root, &options, project.is_some())
            } else {
                let output =
                    output.unwrap_or_else(|| root.join(expand_path(&config.schema.links.output)));
                run_links(global, &root, &output, project.as_deref(), &options)
            }
        }
    }
}

fn report_error(global: &GlobalArgs, err: &Error) {
    if global.json {
        if print_json(&err.to_report()).is_ok() {
            return;
        }
    }
    Status::failure(err);
}

fn run_strings(
    global: &GlobalArgs,
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    no_escape: bool,
    dry_run: bool,
) -> droidres_core::Result<()> {
    let mut options = StringsOptions::from(&config.schema.strings);
    if no_escape {
        options.escape = false;
    }

    if dry_run {
        let text = strings_xml::read_properties_file(input)?;
        let converted = strings_xml::convert_text(&text, &options)
            .context(format!("Converting {}", input.display()))?;
        print!("{}", converted.xml);
        if converted.duplicates > 0 && !global.quiet {
            Status::warning(&format!(
                "{} repeated",
                format_count(converted.duplicates, "resource name", "resource names")
            ));
        }
        return Ok(());
    }

    let output = output.unwrap_or_else(|| expand_path(&config.schema.strings.output));
    let start = Instant::now();
    let summary = strings_xml::convert_file(input, &output, &options)?;

    if global.json {
        print_json(&summary)?;
        return Ok(());
    }

    if global.show_status() {
        let cwd = std::env::current_dir().unwrap_or_default();
        Status::success(&format!(
            "Wrote {} to {} in {}",
            format_count(summary.strings, "string", "strings"),
            display_path(&summary.output, &cwd),
            format_duration(start.elapsed())
        ));
        if !summary.escaped {
            Status::info("Values written without escaping");
        }
    }
    if summary.duplicates > 0 && !global.quiet {
        Status::warning(&format!(
            "{} repeated; Android keeps the last definition",
            format_count(summary.duplicates, "resource name", "resource names")
        ));
    }

    Ok(())
}

fn run_links_dry(
    global: &GlobalArgs,
    root: &Path,
    options: &LinkOptions,
    has_project: bool,
) -> droidres_core::Result<()> {
    let links = LinkScanner::new(root).with_options(options).scan()?;
    print!("{}", linked_resources::render_linked_resources(&links));

    if has_project && !global.quiet {
        Status::warning("Dry run: .project left untouched");
    }
    Ok(())
}

#[derive(Serialize)]
struct LinksReport<'a> {
    #[serde(flatten)]
    summary: &'a LinkSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a Path>,
}

fn run_links(
    global: &GlobalArgs,
    root: &Path,
    output: &Path,
    project: Option<&Path>,
    options: &LinkOptions,
) -> droidres_core::Result<()> {
    let start = Instant::now();
    let summary = linked_resources::generate(root, output, options)?;

    if let Some(project) = project {
        let block = linked_resources::render_linked_resources(&summary.links);
        project_file::update_project_file(project, &block)?;
    }

    if global.json {
        print_json(&LinksReport {
            summary: &summary,
            project,
        })?;
        return Ok(());
    }

    if global.show_status() {
        Status::success(&format!(
            "Found {} ({} to files, {} to folders) in {}",
            format_count(summary.total(), "linked resource", "linked resources"),
            summary.files,
            summary.folders,
            format_duration(start.elapsed())
        ));
        Status::info(&format!("Wrote {}", display_path(&summary.output, root)));
        if let Some(project) = project {
            Status::info(&format!("Updated {}", project.display()));
        } else if summary.total() > 0 {
            Status::info("Paste the block into .project, or rerun with --project");
        }
    }

    Ok(())
}
