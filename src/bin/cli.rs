// MediaCat - Chaptered Audiobook Assembly
// Copyright (C) 2025 MediaCat contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::Context;
use clap::{Parser, Subcommand};
use mediacat::archive::ArchiveExtractor;
use mediacat::listing::FileLister;
use mediacat::{BuildConfig, BuildOrchestrator, BuildSource, MatchMode, DEFAULT_BITRATE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediacat")]
#[command(version, about = "MediaCat: a tool for media file management", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an audiobook from media files
    #[command(alias = "cat")]
    Build {
        /// Re-encode audio bitrate
        #[arg(short, long, default_value = DEFAULT_BITRATE)]
        bitrate: String,

        /// Do not delete temporary files
        #[arg(long)]
        not_cleanup: bool,

        /// Copy files already in .m4a format instead of re-encoding them
        #[arg(long)]
        not_re_encode: bool,

        /// Fail when a file matches more than one keyword
        #[arg(long)]
        strict_match: bool,

        /// Keyword list (directory input) or chapter definitions (file input)
        #[arg(short, long, default_value = "list.txt")]
        list: PathBuf,

        /// Output file name (with .m4b extension)
        #[arg(short, long, default_value = "output.m4b")]
        output: PathBuf,

        /// Input directory containing media files, or a single media file
        path: PathBuf,
    },

    /// List files in a directory or archive
    List {
        /// Directory or archive to list files from
        path: PathBuf,

        /// Regex filters whose matches are removed from each printed name
        filters: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Build {
            bitrate,
            not_cleanup,
            not_re_encode,
            strict_match,
            list,
            output,
            path,
        } => {
            let config = BuildConfig {
                bitrate,
                re_encode: !not_re_encode,
                verbose: cli.verbose,
                cleanup: !not_cleanup,
                match_mode: if strict_match {
                    MatchMode::Strict
                } else {
                    MatchMode::Permissive
                },
            };

            let source = BuildSource::for_path(&path, &list, &config)?;
            let orchestrator = BuildOrchestrator::new(source, config.cleanup)?;
            let outcome = orchestrator
                .build(&output)
                .await
                .context("audiobook build failed")?;

            if let Some(kept) = &outcome.retained_workspace {
                println!("Temporary files kept in: {}", kept.display());
            }
            println!("Output file: {}", outcome.output.display());
        }

        Commands::List { path, filters } => {
            let lister = FileLister::new(&filters)?;
            let names = if path.is_file() {
                let extractor = ArchiveExtractor::open(&path)?;
                lister.list(extractor.path())?
            } else {
                lister.list(&path)?
            };
            for name in names {
                println!("{name}");
            }
        }
    }

    Ok(())
}
