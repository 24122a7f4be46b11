mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::render::{OutputFormat, RenderOptions};
use commands::{EXIT_CONTEXT_ERROR, EXIT_FAILURE, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "devcompose",
    version,
    about = "Synthesize local Compose files from device deployment manifests"
)]
struct Cli {
    /// Platform context file (TOML). Defaults to ~/.config/devcompose/context.toml.
    #[arg(long, global = true)]
    context: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize a Compose document from device deployments and packages.
    Render {
        /// Manifest files (YAML or JSON, multi-document allowed).
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Document encoding.
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        /// Write the document to this path instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Add depends_on edges for deployment-to-deployment dependencies.
        #[arg(long, default_value_t = false)]
        link_dependencies: bool,
        /// Fail if any deployment had to be skipped.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// List device deployments and packages found in manifest files.
    List {
        /// Manifest files (YAML or JSON, multi-document allowed).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DEVCOMPOSE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;
    let context = cli.context.as_deref();

    let result = match cli.command {
        Commands::Render {
            files,
            format,
            output,
            link_dependencies,
            strict,
        } => commands::render::run(
            &files,
            context,
            &RenderOptions {
                format,
                output,
                link_dependencies,
                strict,
            },
            json_output,
        ),
        Commands::List { files } => commands::list::run(&files, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:") {
                EXIT_MANIFEST_ERROR
            } else if msg.starts_with("context error:") {
                EXIT_CONTEXT_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
