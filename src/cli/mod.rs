use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config;
use crate::domain::window::TimeWindow;
use crate::upstream::{cache::CachedApi, export::ExportApi, session::Session};
use crate::views;

mod report;

#[derive(Parser)]
#[command(name = "tastedeck")]
#[command(version = "0.1")]
#[command(about = "Listening analytics over exported music platform data")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Print the view as JSON instead of a text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the connected account
    Profile,
    /// Top artists, tracks and genres
    Top {
        /// recent, medium or all
        #[arg(short, long, default_value = "medium")]
        window: TimeWindow,
    },
    /// Sonic profile of the top tracks
    Features {
        /// recent, medium or all
        #[arg(short, long, default_value = "medium")]
        window: TimeWindow,
    },
    /// When you listen and how your library grew
    Patterns,
    /// List playlists
    Playlists,
    /// Analyse one playlist
    Playlist {
        id: String,
        /// Only list tracks whose name or artist contains this
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Run http server serving the views as JSON
    Serve,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = config::Config::load(&cli.config)?;

    let api = CachedApi::new(ExportApi::new(&cfg.source.export_dir), &cfg.cache);
    let session = Session::connect(api).with_context(|| {
        format!(
            "Failed to connect using export at {}",
            cfg.source.export_dir.display()
        )
    })?;
    let limits = cfg.limits;

    match cli.command {
        Commands::Profile => {
            let view = views::profile::profile(&session);
            print_view(cli.json, &view, report::profile)
        }

        Commands::Top { window } => {
            let view = views::charts::top_charts(&session, window, &limits)?;
            print_view(cli.json, &view, report::top_charts)
        }

        Commands::Features { window } => {
            let view = views::audio::audio_features(&session, window, &limits)?;
            print_view(cli.json, &view, report::audio_features)
        }

        Commands::Patterns => {
            let view = views::patterns::listening_patterns(&session, &limits)?;
            print_view(cli.json, &view, report::listening_patterns)
        }

        Commands::Playlists => {
            let view = views::playlists::playlists(&session)?;
            print_view(cli.json, &view, report::playlists)
        }

        Commands::Playlist { id, search } => {
            let view = views::playlists::playlist_analysis(&session, &id, &search)?;
            print_view(cli.json, &view, report::playlist_analysis)
        }

        Commands::Serve => {
            println!("Starting HTTP server...");

            let http_server = crate::http::server::HttpServer::new(session, limits, cfg.http);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
            Ok(())
        }
    }
}

fn print_view<T: Serialize>(
    json: bool,
    view: &T,
    text: fn(&mut dyn Write, &T) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(view)?)?;
    } else {
        text(&mut out, view)?;
    }
    Ok(())
}
