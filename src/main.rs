mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use searchav_client::{ApiError, Client, ClientConfig, Preferences};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;
    let prefs = Preferences::open_default();
    let client = Client::new(&config, prefs.clone())?;

    match cli.command {
        Commands::Search { query, adult } => {
            let results = match client.search(&query, adult.then_some(true)).await {
                Ok(results) => results,
                Err(e) => fail(e),
            };
            if results.is_empty() {
                println!("No results.");
            }
            for video in results {
                let sources: Vec<String> = video
                    .sources
                    .iter()
                    .map(|s| format!("{}:{}", s.source_code, s.vod_id))
                    .collect();
                match &video.vod_remarks {
                    Some(remarks) => {
                        println!("{} ({}) [{}]", video.vod_name, remarks, sources.join(", "))
                    }
                    None => println!("{} [{}]", video.vod_name, sources.join(", ")),
                }
            }
        }
        Commands::Detail { source, id } => {
            let detail = match client.get_detail(&source, id).await {
                Ok(detail) => detail,
                Err(e) => fail(e),
            };
            println!("{}", detail.vod_name);
            if let Some(year) = &detail.vod_year {
                println!("Year: {year}");
            }
            if let Some(area) = &detail.vod_area {
                println!("Area: {area}");
            }
            if let Some(director) = &detail.vod_director {
                println!("Director: {director}");
            }
            if let Some(actor) = &detail.vod_actor {
                println!("Actors: {actor}");
            }
            if let Some(content) = &detail.vod_content {
                println!("\n{content}");
            }
            println!("\nEpisodes: {}", detail.episodes.len());
        }
        Commands::Login { password } => {
            prefs.save_password(&password);
            println!("Password saved.");
        }
        Commands::Logout => {
            prefs.clear_password();
            println!("Password cleared.");
        }
        Commands::Adult { state } => match state.as_str() {
            "on" => {
                prefs.set_adult_mode(true);
                println!("Adult mode enabled.");
            }
            "off" => {
                prefs.set_adult_mode(false);
                println!("Adult mode disabled.");
            }
            other => anyhow::bail!("expected \"on\" or \"off\", got {other:?}"),
        },
    }
    Ok(())
}

fn fail(err: ApiError) -> ! {
    match err {
        ApiError::Unauthorized => {
            eprintln!("Unauthorized. Save a password with `searchav-client login <password>`.")
        }
        other => eprintln!("Error: {other}"),
    }
    std::process::exit(1);
}
