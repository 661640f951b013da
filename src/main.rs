//! botdeck - a terminal console for remotely-hosted bot processes
//!
//! This is the binary entry point. All logic lives in the workspace
//! crates.

use clap::Parser;

use botdeck_app::Settings;

/// botdeck - operate remotely-hosted bots from the terminal
#[derive(Parser, Debug)]
#[command(name = "botdeck")]
#[command(about = "A terminal console for remotely-hosted bot processes", long_about = None)]
struct Args {
    /// Supervisor base URL (overrides the config file and BOTDECK_SERVER)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Open this bot's console directly
    #[arg(long, value_name = "ID")]
    bot: Option<i64>,

    /// Print the bot list as JSON and exit (no TUI)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let settings = botdeck_app::load_settings(args.server.as_deref())?;

    if args.headless {
        return run_headless(&settings).await;
    }

    botdeck_core::logging::init()?;
    tracing::info!(server = %settings.server, "starting console");
    botdeck_tui::run(settings, args.bot).await?;
    Ok(())
}

/// Scripting escape hatch: dump the bot list and exit
async fn run_headless(settings: &Settings) -> color_eyre::Result<()> {
    let gateway = botdeck_api::Gateway::new(&settings.server);
    let bots = gateway.list_bots().await?;
    println!("{}", serde_json::to_string_pretty(&bots)?);
    Ok(())
}
