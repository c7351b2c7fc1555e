use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use spotlight_feed::{Config, FeedPipeline, WebServer};

#[derive(Parser, Debug)]
#[command(version, about = "Gamefound spotlight events to RSS 2.0")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the trigger service (default).
    Serve,
    /// Run the pipeline once and exit.
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Upstream API URL.
    #[arg(long)]
    api: Option<String>,
    /// Output RSS path.
    #[arg(long)]
    out: Option<String>,
    /// Channel title.
    #[arg(long)]
    title: Option<String>,
    /// Channel link.
    #[arg(long)]
    link: Option<String>,
    /// Channel description.
    #[arg(long)]
    desc: Option<String>,
}

impl RunArgs {
    /// Command-line flags take precedence over the file and environment.
    fn apply(&self, config: &mut Config) {
        if let Some(api) = &self.api {
            config.upstream.api_url = api.clone();
        }
        if let Some(out) = &self.out {
            config.output.path = out.clone();
        }
        if let Some(title) = &self.title {
            config.feed.title = title.clone();
        }
        if let Some(link) = &self.link {
            config.feed.link = link.clone();
        }
        if let Some(desc) = &self.desc {
            config.feed.description = desc.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            return exit_code(e.exit_code());
        }
    };
    let command = cli.command.unwrap_or(Command::Serve);

    if let Command::Run(args) = &command {
        args.apply(&mut config);
    }

    // Initialize logging
    if let Err(e) = spotlight_feed::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        spotlight_feed::logging::init_console_only(&config.logging.level);
    }

    match command {
        Command::Serve => serve(&config).await,
        Command::Run(_) => run_once(&config).await,
    }
}

async fn serve(config: &Config) -> ExitCode {
    let server = match WebServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Cannot start trigger service: {}", e);
            return exit_code(e.exit_code());
        }
    };

    info!("spotlight-feed trigger service on {}", server.addr());
    info!("Writing feed to {}", config.output.path);

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Web server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_once(config: &Config) -> ExitCode {
    let pipeline = match FeedPipeline::from_config(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("{}", e);
            return exit_code(e.exit_code());
        }
    };

    match pipeline.run().await {
        Ok(summary) => {
            println!("Wrote {}", summary.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            exit_code(e.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
