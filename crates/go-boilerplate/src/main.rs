//! go-boilerplate - Interactive scaffolding for Go HTTP services

mod toolchain;

use anyhow::{Context, Result};
use boilerplate_core::templates::version::{parse_version, DEFAULT_PROJECT_VERSION};
use boilerplate_core::tui::{restore_terminal, WizardOptions};
use boilerplate_core::{
    check_toolchain, resolve_template_dir, GenerateOptions, Generator, ProjectSpec,
    TemplateStore, Toolchain, WizardSettings,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use toolchain::GoToolchain;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "go-boilerplate")]
#[command(about = "Interactive wizard for scaffolding Go service boilerplate")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive wizard (default)
    Create(CreateArgs),
    /// Generate a project without the wizard
    Generate(GenerateArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CreateArgs {
    /// Directory containing the `*.template` files
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Directory the new project is created in (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Version written into the generated project
    #[arg(long = "project-version")]
    pub project_version: Option<String>,

    /// Skip `go mod init` and `go get`
    #[arg(long = "skip-deps")]
    pub skip_deps: bool,

    /// YAML file overriding wizard timings and limits
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Project name (letters, digits, `-` and `_`)
    #[arg(short, long)]
    pub name: String,

    #[command(flatten)]
    pub create: CreateArgs,
}

/// Settings, template store, and generation options shared by both commands
struct Prepared {
    settings: WizardSettings,
    version: String,
    store: TemplateStore,
    generate: GenerateOptions,
}

fn prepare(args: &CreateArgs, toolchain: &GoToolchain) -> Result<Prepared> {
    let settings = match &args.config {
        Some(path) => WizardSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => WizardSettings::default(),
    };

    let version = parse_version(
        args.project_version
            .as_deref()
            .unwrap_or(DEFAULT_PROJECT_VERSION),
    )?
    .to_string();

    let template_dir = resolve_template_dir(
        args.template_dir.as_deref(),
        toolchain.template_dir_env(),
        toolchain.template_subdir(),
    );
    let store = TemplateStore::new(template_dir);

    let parent_dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    if !parent_dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", parent_dir.display());
    }

    let generate = GenerateOptions {
        parent_dir,
        skip_dependencies: args.skip_deps,
        command_timeout: settings.command_timeout(),
    };

    Ok(Prepared {
        settings,
        version,
        store,
        generate,
    })
}

async fn run_wizard(args: CreateArgs, toolchain: &GoToolchain) -> Result<()> {
    let prepared = prepare(&args, toolchain)?;

    cliclack::intro(format!("{} boilerplate v{}", toolchain.display_name(), CLI_VERSION))?;

    if prepared.store.exists() {
        cliclack::log::info(format!(
            "Using templates from {}",
            prepared.store.dir().display()
        ))?;
    } else {
        cliclack::log::warning(format!(
            "Template directory {} not found; files will get placeholder content",
            prepared.store.dir().display()
        ))?;
    }

    if args.skip_deps {
        cliclack::log::info("Skipping dependency fetching")?;
    } else {
        let info = check_toolchain(toolchain.display_name(), &toolchain.version_command());
        if info.available {
            cliclack::log::success(format!(
                "{} installed ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown")
            ))?;
        } else {
            cliclack::log::warning(format!(
                "{} is not installed; project initialization and dependency fetching will fail",
                info.name
            ))?;
        }
    }

    boilerplate_core::run(
        toolchain,
        prepared.store,
        WizardOptions {
            version: prepared.version,
            settings: prepared.settings,
            generate: prepared.generate,
        },
    )
    .await
}

async fn run_generate(args: GenerateArgs, toolchain: &GoToolchain) -> Result<()> {
    let prepared = prepare(&args.create, toolchain)?;
    let spec = ProjectSpec::new(&args.name, &prepared.version)?;

    println!(
        "{}",
        format!("Generating {} {}...", spec.name, spec.version)
            .cyan()
            .bold()
    );
    println!();

    let generator = Generator::new(*toolchain, prepared.store, prepared.generate);
    let result = generator.generate(&spec).await;

    for path in &result.written {
        println!("  {} {}", "->".blue(), path.display());
    }
    for warning in &result.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
    for (_, error) in &result.dependency_errors {
        eprintln!("{} {}", "Warning:".yellow(), error);
    }
    for (path, error) in &result.file_errors {
        eprintln!("{} {}: {}", "Error:".red(), path.display(), error);
    }

    println!();
    if result.overall_succeeded {
        println!(
            "{} {} file(s) in {}",
            "Created".green().bold(),
            result.tree_files().len(),
            result.root.display()
        );
    } else {
        println!(
            "{} with {} file error(s) in {}",
            "Finished".red().bold(),
            result.file_errors.len(),
            result.root.display()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal mode and cursor are restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_panic(info);
    }));

    // Handle an external SIGINT gracefully; Ctrl+C typed in the wizard arrives as a key
    ctrlc::set_handler(move || {
        restore_terminal();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let toolchain = GoToolchain;

    match args.command {
        Some(Command::Create(create_args)) => run_wizard(create_args, &toolchain).await,
        Some(Command::Generate(generate_args)) => run_generate(generate_args, &toolchain).await,
        // No subcommand provided, default to the interactive wizard
        None => run_wizard(CreateArgs::default(), &toolchain).await,
    }
}
