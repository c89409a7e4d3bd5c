use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taskjson::store::RecordStore;

mod app;
mod listener;
mod shutdown;

use self::app::{build_app_router, build_state};
use self::listener::bind_and_announce;
use self::shutdown::shutdown_signal;

#[derive(Parser)]
#[command(name = "taskjson-server")]
#[command(about = "Stores per-task JSON datasets and serves them by task, tag, commit and version", long_about = None)]
pub(super) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub(super) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(super) addr_file: Option<PathBuf>,

    /// Directory holding the record, task and version documents
    #[arg(long, default_value = "./taskjson-data")]
    pub(super) data_dir: PathBuf,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    let store = RecordStore::open(&args.data_dir)
        .with_context(|| format!("open record store {}", args.data_dir.display()))?;

    let state = build_state(store);
    let app = build_app_router(state.clone());
    let listener = bind_and_announce(args.addr, args.addr_file.as_deref()).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state
        .write_store(|store| store.close())
        .await
        .context("close record store")?;
    Ok(())
}
