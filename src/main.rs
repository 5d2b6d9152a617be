use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use termfolio::content::ContentProvider;
use termfolio::core::config::{
    CliOverrides, ResolvedConfig, TermfolioConfig, load_config, load_config_from, resolve,
};
use termfolio::serve;
use termfolio::tui;
use termfolio::tui::ui::ViewOptions;

#[derive(Parser)]
#[command(name = "termfolio", version, about = "Portfolio and blog in the terminal, locally or over SSH")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ~/.termfolio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding blog/, pages/ and projects.toml
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Directory of markdown blog posts
    #[arg(long, global = true)]
    blog_dir: Option<PathBuf>,

    /// error, warn, info, debug, trace or off
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide the clock in the status bar
    #[arg(long, global = true)]
    no_clock: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Browse in this terminal (default)
    Local,
    /// Serve one session per SSH connection
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// OpenSSH private key to use as the host key
        #[arg(long)]
        host_key: Option<PathBuf>,
    },
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        let mut cli = CliOverrides {
            content_root: self.content_dir.clone(),
            blog_dir: self.blog_dir.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            no_clock: self.no_clock,
            ..Default::default()
        };
        if let Some(Command::Serve {
            host,
            port,
            host_key,
        }) = &self.command
        {
            cli.host = host.clone();
            cli.port = *port;
            cli.host_key = host_key.clone();
        }
        cli
    }
}

fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match File::create(&config.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(config.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "termfolio: logging disabled, cannot open {}: {}",
            config.log_file.display(),
            e
        ),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let (file_config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (TermfolioConfig::default(), Some(e)),
    };
    let config = resolve(&file_config, &args.overrides());

    init_logging(&config);
    if let Some(e) = config_error {
        eprintln!("termfolio: using default settings, {e}");
        warn!("Config file ignored: {}", e);
    }

    let library = Arc::new(
        ContentProvider::new(&config.content_root)
            .with_blog_dir(&config.blog_dir)
            .load(),
    );
    let options = ViewOptions {
        title: config.title.clone(),
        show_clock: config.clock,
    };

    match args.command {
        None | Some(Command::Local) => {
            info!("termfolio starting in local mode");
            tui::run(library, options)?;
        }
        Some(Command::Serve { .. }) => {
            info!("termfolio starting in server mode");
            eprintln!(
                "termfolio: serving on {}:{} (log: {})",
                config.host,
                config.port,
                config.log_file.display()
            );
            serve::run(&config, library, options).await?;
        }
    }
    Ok(())
}
