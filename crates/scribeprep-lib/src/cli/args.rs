use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Provision {
        config_path: String,
        bin_dir: Option<String>,
        skip_packages: bool,
        skip_artifacts: bool,
    },
    Serve {
        config_path: String,
        host: Option<String>,
        port: Option<u16>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "scribeprep",
    version,
    about = "Provision the transcription backend's dependencies and bootstrap its server"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Install package groups via the host package manager and fetch prebuilt artifacts
    Provision {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "scribeprep.yaml"
        )]
        config: String,

        #[arg(
            long = "bin-dir",
            value_name = "DIR",
            help = "Overrides the target directory for prebuilt artifacts"
        )]
        bin_dir: Option<String>,

        #[arg(
            long = "skip-packages",
            help = "Skip the package-manager installation step",
            action = ArgAction::SetTrue
        )]
        skip_packages: bool,

        #[arg(
            long = "skip-artifacts",
            help = "Skip the prebuilt-artifact download step",
            action = ArgAction::SetTrue
        )]
        skip_artifacts: bool,
    },

    /// Apply the runtime environment and start the application server
    Serve {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "scribeprep.yaml"
        )]
        config: String,

        #[arg(
            long = "host",
            value_name = "ADDR",
            help = "Overrides the bind address"
        )]
        host: Option<String>,

        #[arg(short = 'p', long = "port", value_name = "PORT", help = "Overrides the bind port")]
        port: Option<u16>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("opendal=warn".parse().unwrap()),
        )
        .init();

    let command = match cli.command {
        CliCommand::Provision {
            config,
            bin_dir,
            skip_packages,
            skip_artifacts,
        } => Command::Provision {
            config_path: config,
            bin_dir,
            skip_packages,
            skip_artifacts,
        },
        CliCommand::Serve { config, host, port } => Command::Serve {
            config_path: config,
            host,
            port,
        },
    };

    Args { command, log_level }
}
