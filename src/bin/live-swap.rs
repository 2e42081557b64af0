mod output;

use clap::Parser;
use live_swap::{LiveSwapError, LiveSwapper, RunConfig, SpotifyClient};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Replace a band's studio tracks in your playlists with live bootlegs
#[derive(Parser)]
#[command(
    name = "live-swap",
    about = "Replace studio tracks in your playlists with live bootleg recordings",
    long_about = None
)]
struct Cli {
    /// Simulate changes without modifying playlists
    #[arg(long)]
    simulate: bool,

    /// Skip the confirmation prompt before modifying playlists
    #[arg(long, short = 'y')]
    yes: bool,

    /// JSON settings file (any subset of the run configuration)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON exception list overriding the built-in one
    #[arg(long)]
    exceptions: Option<PathBuf>,

    /// Artist whose studio tracks should be replaced
    #[arg(long)]
    artist: Option<String>,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show detailed debug information
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn get_access_token() -> Result<String, LiveSwapError> {
    std::env::var("SPOTIFY_ACCESS_TOKEN").map_err(|_| {
        LiveSwapError::Config("SPOTIFY_ACCESS_TOKEN environment variable not set".to_string())
    })
}

fn confirm_modification() -> io::Result<bool> {
    print!("WARN: This will modify your playlists. Proceed? No shows simulated output. (y/N): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn build_config(args: &Cli) -> Result<RunConfig, LiveSwapError> {
    let mut config = match &args.settings {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(path) = &args.exceptions {
        config.exceptions_path = Some(path.clone());
    }
    if let Some(artist) = &args.artist {
        config.target_artist = artist.clone();
    }
    config.simulate = config.simulate || args.simulate;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            if let Some(path) = &args.settings {
                eprintln!("❌ Failed to load settings from {}: {e}", path.display());
            } else {
                eprintln!("❌ Error: {e}");
            }
            std::process::exit(1);
        }
    };

    let access_token = match get_access_token() {
        Ok(token) => token,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  SPOTIFY_ACCESS_TOKEN=<token with playlist-read-private, playlist-modify-private and playlist-modify-public scopes>");
            std::process::exit(1);
        }
    };

    if !config.simulate && !args.yes && !confirm_modification()? {
        println!("Running in simulation mode.");
        config.simulate = true;
    }

    let http_client = http_client::native::NativeClient::new();
    let client = SpotifyClient::new(Box::new(http_client), access_token);

    let exceptions_path = config
        .exceptions_path
        .clone()
        .or_else(RunConfig::default_exceptions_path);
    let swapper = match LiveSwapper::new(&client, config) {
        Ok(swapper) => swapper,
        Err(e) => {
            match exceptions_path {
                Some(path) => eprintln!(
                    "❌ Failed to load exception list from {}: {e}",
                    path.display()
                ),
                None => eprintln!("❌ Failed to load exception list: {e}"),
            }
            std::process::exit(1);
        }
    };

    let report = match swapper.run().await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Failed to fetch playlists: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        output::output_json(&report);
    } else {
        output::output_text(&report, &swapper.config().target_artist);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_defaults() {
        let args = Cli::parse_from([
            "live-swap",
            "--simulate",
            "--artist",
            "Tropical Fuck Storm",
            "--exceptions",
            "/tmp/exceptions.json",
        ]);
        let config = build_config(&args).unwrap();
        assert!(config.simulate);
        assert_eq!(config.target_artist, "Tropical Fuck Storm");
        assert_eq!(
            config.exceptions_path,
            Some(PathBuf::from("/tmp/exceptions.json"))
        );
    }

    #[test]
    fn test_cli_defaults() {
        let args = Cli::parse_from(["live-swap"]);
        let config = build_config(&args).unwrap();
        assert!(!config.simulate);
        assert_eq!(config, RunConfig::default());
    }
}
