//! Callframe TUI entry point.

use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use callframe_app::{CallConfig, RealtimeClient, Runtime, SignalEvent};
use callframe_media::MediaStream;
use callframe_tui::{LoopbackSignaling, PeerConfig, TerminalDriver, spawn_peer};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Redraw interval while nothing else happens.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Callframe terminal call screen
#[derive(Parser, Debug)]
#[command(name = "callframe-tui")]
#[command(about = "One-to-one call screen against a simulated peer")]
#[command(version)]
struct Args {
    /// Your display name
    #[arg(short, long, default_value = "You")]
    user: String,

    /// Display name of the simulated peer
    #[arg(short, long, default_value = "peer")]
    peer: String,

    /// Join with the camera off
    #[arg(long)]
    camera_off: bool,

    /// Audio tracks on each stream
    #[arg(long, default_value_t = 1)]
    audio_tracks: usize,

    /// Video tracks on each stream
    #[arg(long, default_value_t = 1)]
    video_tracks: usize,

    /// Milliseconds before the peer joins
    #[arg(long, default_value_t = 1500)]
    connect_delay_ms: u64,

    /// Drop the connection every N seconds to exercise reconnects
    #[arg(long)]
    drop_every_secs: Option<u64>,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "callframe.log")]
    log_file: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(args: &Args) -> std::io::Result<()> {
    let file = File::create(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args)?;

    let realtime = RealtimeClient::<SignalEvent>::new();
    let topic = format!("call:{:08x}", rand::random::<u32>());
    let subscription = realtime.subscribe(&topic)?;

    let local = Arc::new(MediaStream::synthetic("local", args.audio_tracks, args.video_tracks));
    let peer_config = PeerConfig {
        name: args.peer.clone(),
        connect_delay: Duration::from_millis(args.connect_delay_ms),
        drop_every: args.drop_every_secs.map(Duration::from_secs),
        audio_tracks: args.audio_tracks,
        video_tracks: args.video_tracks,
    };
    let peer = spawn_peer(realtime.clone(), topic.clone(), local, peer_config);

    let config = CallConfig {
        self_name: args.user,
        peer_name: args.peer,
        initial_video_enabled: !args.camera_off,
    };

    tracing::info!(%topic, "Callframe starting");

    let driver = TerminalDriver::new(TICK_INTERVAL)?;
    let mut runtime = Runtime::new(driver, LoopbackSignaling::new(subscription, peer), config);
    let result = runtime.run().await;

    drop(runtime);
    realtime.shutdown();
    tracing::info!("Callframe stopped");

    Ok(result?)
}
