use anyhow::{Context, Result};
use clap::Parser;
use vista_engine::assets::FileAssets;
use vista_engine::builders::{self, BuilderOptions, DEFAULT_FONT};
use vista_engine::device::GpuInit;
use vista_engine::logging::{init_logging, LoggingConfig};
use vista_engine::stage::StopToken;
use vista_engine::window::{Runtime, RuntimeConfig};

/// Opens a window and runs one of the sample scenes.
#[derive(Debug, Parser)]
#[command(name = "vista-studio", version)]
struct Cli {
    /// Scene to show (see --list).
    #[arg(default_value = "cube")]
    scene: String,

    /// Font file for the text scene, relative to the asset root.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FONT)]
    font: String,

    /// Directory assets are loaded from.
    #[arg(long, value_name = "DIR", default_value = ".")]
    assets: String,

    /// Print the available scene names and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for name in builders::NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    init_logging(LoggingConfig::default());

    let options = BuilderOptions { font_path: cli.font };
    let builder = builders::by_name(&cli.scene, &options)
        .with_context(|| format!("choose one of: {}", builders::NAMES.join(", ")))?;

    log::info!("starting scene `{}`", builder.name());

    let config = RuntimeConfig {
        title: format!("vista · {}", cli.scene),
        ..RuntimeConfig::default()
    };

    Runtime::run(
        config,
        GpuInit::from_env(),
        builder,
        Box::new(FileAssets::new(cli.assets)),
        StopToken::new(),
    )
}
