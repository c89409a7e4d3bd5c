use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

/// Bind `addr` and publish the bound address (port 0 resolves here).
pub(super) async fn bind_and_announce(
    addr: SocketAddr,
    addr_file: Option<&Path>,
) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!("taskjson-server listening on {}", local_addr);

    if let Some(addr_file) = addr_file {
        publish_addr(addr_file, local_addr)?;
    }
    Ok(listener)
}

// Readers poll this file; they must never see a partial address.
fn publish_addr(addr_file: &Path, local_addr: SocketAddr) -> Result<()> {
    let tmp = addr_file.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, local_addr.to_string())
        .with_context(|| format!("write addr file {}", tmp.display()))?;
    std::fs::rename(&tmp, addr_file)
        .with_context(|| format!("publish addr file {}", addr_file.display()))
}
