use clap::{Parser, Subcommand};
use lastfm_feed::{LastFmFeedClient, LastFmFeedClientImpl, Track, UserInfo};

/// Show a Last.fm user's profile and recent listening
#[derive(Parser)]
#[command(
    name = "lastfm-feed",
    about = "Show a Last.fm user's profile and recent listening",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the user's profile
    User,
    /// List the user's most recent tracks
    Tracks {
        /// Maximum number of tracks to show (0 shows the whole page)
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let http_client = http_client::native::NativeClient::new();
    let client = match LastFmFeedClientImpl::from_env(Box::new(http_client)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  LASTFM_USER=your_lastfm_username");
            eprintln!("  LASTFM_API_KEY=your_lastfm_api_key");
            std::process::exit(1);
        }
    };

    log::debug!("Using username: {}", client.username());

    match args.command {
        Commands::User => {
            let user = client.get_user().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                print_user(&user);
            }
        }
        Commands::Tracks { limit } => {
            let tracks = client.get_tracks(limit).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&tracks)?);
            } else if tracks.is_empty() {
                println!("No recent tracks");
            } else {
                for (index, track) in tracks.iter().enumerate() {
                    print_track(index + 1, track);
                }
            }
        }
    }

    Ok(())
}

fn print_user(user: &UserInfo) {
    println!("👤 {user}");
    if !user.country.is_empty() {
        println!("   Country: {}", user.country);
    }
    println!("   Scrobbles: {}", user.playcount);
    let registered = user.registered.short_date();
    if !registered.is_empty() {
        println!("   Registered: {registered}");
    }
    println!("   Profile: {}", user.url);
    if !user.image().is_empty() {
        println!("   Avatar: {}", user.image());
    }
}

fn print_track(position: usize, track: &Track) {
    let when = if track.is_now_playing() {
        "▶ now playing".to_string()
    } else {
        track.date.relative_date()
    };

    if track.album.name.is_empty() {
        println!("{position:>3}. {track} ({when})");
    } else {
        println!("{position:>3}. {track} [{}] ({when})", track.album.name);
    }
}
