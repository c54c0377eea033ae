//! binlaunch CLI - run the prebuilt native tool for this platform

mod logging;

use anyhow::{Context, Result};
use binlaunch_core::constants::{DEFAULT_NAMESPACE, DEFAULT_TOOL_NAME, ENV_NAMESPACE, ENV_TOOL};
use binlaunch_sdk::{
    terminate_gracefully, PlatformKey, ProcessExit, SetupOptions, Shim, ShimError, ShimSettings,
    SpawnOptions, StdioMode, ToolSpec,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::info;

/// Grace period between SIGTERM and SIGKILL when interrupted
const INTERRUPT_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "binlaunch")]
#[command(about = "Run the prebuilt native tool for this platform", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Executable base name of the wrapped tool
    #[arg(long, global = true, env = ENV_TOOL, default_value = DEFAULT_TOOL_NAME)]
    tool: String,

    /// Package scope of the per-platform packages
    #[arg(long, global = true, env = ENV_NAMESPACE, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Log resolution and process lifecycle to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved executable path
    Locate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported platforms and their package names
    Platforms,

    /// Run the tool with the given arguments and exit with its exit code
    #[command(trailing_var_arg = true)]
    Exec {
        /// Arguments passed through verbatim (after --)
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run the tool in JSON mode and print the parsed result
    Setup {
        /// Path to the tool's configuration file
        #[arg(short, long)]
        config: String,

        /// Maximum number of errors before the tool gives up (0 = unlimited)
        #[arg(long)]
        max_error: Option<u32>,
    },
}

#[derive(Tabled)]
struct PlatformRow {
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Executable")]
    executable: String,
    #[tabled(rename = "Host")]
    host: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{} {:#}", "warning: logging disabled:".yellow(), e);
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<ShimError>() {
                Some(shim_err) => eprintln!(
                    "{} [{}] {}",
                    "✗".red().bold(),
                    shim_err.kind(),
                    shim_err
                ),
                None => eprintln!("{} {:#}", "✗".red().bold(), e),
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let mut settings = ShimSettings::from_env();
    settings.tool = ToolSpec::new(cli.tool, cli.namespace);

    match cli.command {
        Commands::Locate { json } => {
            let location = binlaunch_sdk::locate(&settings)?;
            if json {
                let out = json!({
                    "tool": settings.tool,
                    "location": location,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", location.path().display());
            }
            Ok(0)
        }

        Commands::Platforms => {
            print_platforms(&settings.tool);
            Ok(0)
        }

        Commands::Exec { args } => {
            let shim = Shim::resolve(&settings)?;
            run_exec(&shim, args).await
        }

        Commands::Setup { config, max_error } => {
            let shim = Shim::resolve(&settings)?;
            let options = SetupOptions { config, max_error };
            let value = shim.setup(&options).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(0)
        }
    }
}

/// Forward argv, stream stdout through, mirror the exit code
async fn run_exec(shim: &Shim, args: Vec<String>) -> Result<i32> {
    let options = SpawnOptions {
        stdin: StdioMode::Inherit,
        stderr: StdioMode::Inherit,
        ..SpawnOptions::default()
    };

    let mut handle = shim.exec(args, options)?;

    let placeholder: Box<dyn tokio::io::AsyncRead + Send + Unpin> = Box::new(tokio::io::empty());
    let mut child_stdout = std::mem::replace(&mut handle.stdout, placeholder);
    let pump = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        tokio::io::copy(&mut child_stdout, &mut stdout).await
    });

    let exit = tokio::select! {
        exit = handle.wait() => exit.context("Failed to wait for child process")?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, stopping child process");
            terminate_gracefully(&mut handle, INTERRUPT_GRACE).await?
        }
    };

    pump.await
        .context("stdout forwarding task panicked")?
        .context("Failed to forward child stdout")?;

    Ok(exit_code(exit))
}

/// Shell convention: 128 + signal number for signal deaths
fn exit_code(exit: ProcessExit) -> i32 {
    match exit {
        ProcessExit::Code(code) => code,
        ProcessExit::Signal(sig) => 128 + sig,
        ProcessExit::Unknown => 1,
    }
}

fn print_platforms(tool: &ToolSpec) {
    let (os, arch) = PlatformKey::host_raw();
    let host = PlatformKey::parse(os, arch);

    let rows: Vec<PlatformRow> = PlatformKey::all()
        .map(|key| PlatformRow {
            platform: key.to_string(),
            package: tool.package_id(key),
            executable: tool.executable_file_name(key.os),
            host: if Some(key) == host {
                "*".green().to_string()
            } else {
                String::new()
            },
        })
        .collect();

    println!("{}", Table::new(rows));

    if host.is_none() {
        println!(
            "{}",
            format!("Host platform {}/{} is not supported", os, arch).yellow()
        );
    }
}
