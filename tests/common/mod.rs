use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use serde_json::{Value, json};

pub struct ServerGuard {
    pub base_url: String,
    pub data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let (child, base_url) = spawn_server_at(data_dir.path(), "addr.txt")?;
    Ok(ServerGuard {
        base_url,
        data_dir,
        child,
    })
}

/// Start a server over an existing data dir; the caller owns the child.
pub fn spawn_server_at(data_dir: &Path, addr_name: &str) -> Result<(Child, String)> {
    let addr_file = data_dir.join(addr_name);
    let _ = std::fs::remove_file(&addr_file);

    let child = Command::new(env!("CARGO_BIN_EXE_taskjson-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--data-dir",
            data_dir.join("store").to_str().unwrap(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn taskjson-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;
    Ok((child, base_url))
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Mainline `bench` task in project `proj`, revision `rev<order>`.
#[allow(dead_code)]
pub fn task_doc(id: &str, version: &str, variant: &str, order: i64) -> Value {
    json!({
        "id": id,
        "display_name": "bench",
        "project": "proj",
        "build_id": format!("{}-{}", version, variant),
        "build_variant": variant,
        "version": version,
        "create_time": "2024-01-01T00:00:00Z",
        "revision": format!("rev{}", order),
        "order": order,
        "requester": "mainline",
    })
}

#[allow(dead_code)]
pub fn version_doc(id: &str, revision: &str) -> Value {
    json!({
        "id": id,
        "project": "proj",
        "author": "dev",
        "message": format!("commit {}", revision),
        "create_time": "2024-01-01T00:00:00Z",
        "revision": revision,
    })
}

#[allow(dead_code)]
pub fn put_task(client: &Client, base_url: &str, task: &Value) -> Result<()> {
    let id = task["id"].as_str().context("task doc without id")?;
    client
        .put(format!("{}/host/tasks/{}", base_url, id))
        .json(task)
        .send()
        .context("PUT task")?
        .error_for_status()
        .context("PUT task status")?;
    Ok(())
}

#[allow(dead_code)]
pub fn put_version(client: &Client, base_url: &str, version: &Value) -> Result<()> {
    let id = version["id"].as_str().context("version doc without id")?;
    client
        .put(format!("{}/host/versions/{}", base_url, id))
        .json(version)
        .send()
        .context("PUT version")?
        .error_for_status()
        .context("PUT version status")?;
    Ok(())
}

/// POST `data` as dataset `name` of `task_id`.
#[allow(dead_code)]
pub fn send_data(client: &Client, base_url: &str, task_id: &str, name: &str, data: &Value) -> Result<()> {
    let resp = client
        .post(format!("{}/api/json/data/{}", base_url, name))
        .header("Task-Id", task_id)
        .json(data)
        .send()
        .context("POST data")?
        .error_for_status()
        .context("POST data status")?;
    let body: Value = resp.json().context("parse POST data response")?;
    anyhow::ensure!(body == json!("ok"), "unexpected ingest response {}", body);
    Ok(())
}

#[allow(dead_code)]
pub fn api_get(client: &Client, base_url: &str, task_id: &str, path: &str) -> Result<Response> {
    client
        .get(format!("{}/api/json/{}", base_url, path))
        .header("Task-Id", task_id)
        .send()
        .with_context(|| format!("GET /api/json/{}", path))
}

#[allow(dead_code)]
pub fn ui_get(client: &Client, base_url: &str, path: &str) -> Result<Response> {
    client
        .get(format!("{}/ui/json/{}", base_url, path))
        .send()
        .with_context(|| format!("GET /ui/json/{}", path))
}
