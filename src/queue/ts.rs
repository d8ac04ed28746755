use super::QueueInspector;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Backed by the task-spooler binary (`ts -l`, `ts -i <id>`).
pub struct TsQueue {
    bin: PathBuf,
    list_timeout: Duration,
    info_timeout: Duration,
}

impl TsQueue {
    pub fn new(cfg: &Config) -> Self {
        Self {
            bin: resolve_ts_bin(&cfg.queue.ts_bin),
            list_timeout: Duration::from_secs(cfg.queue.list_timeout_seconds),
            info_timeout: Duration::from_secs(cfg.queue.info_timeout_seconds),
        }
    }

    fn run_capture(&self, args: &[&str], timeout: Duration) -> Result<String> {
        debug!("queue call {:?} {:?} timeout={:?}", self.bin, args, timeout);
        let mut cmd = Command::new(&self.bin);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning queue tool: {}", self.bin.display()))?;

        let output = wait_with_timeout(&mut child, timeout)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "queue tool failed ({} {}): {}",
                self.bin.display(),
                args.join(" "),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl QueueInspector for TsQueue {
    fn queued_count(&self) -> Result<u32> {
        let listing = self.run_capture(&["-l"], self.list_timeout)?;
        let count = listing.lines().filter(|line| line.contains("queued")).count();
        Ok(count as u32)
    }

    fn job_details(&self, job_id: &str) -> Result<String> {
        self.run_capture(&["-i", job_id], self.info_timeout)
    }
}

fn resolve_ts_bin(raw: &str) -> PathBuf {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
        if let Ok(env_val) = std::env::var("TS") {
            let p = expand_tilde(&env_val);
            if p.exists() {
                return p;
            }
        }
        return PathBuf::from("ts");
    }
    expand_tilde(raw)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    // Drain both pipes while waiting so a chatty queue tool can't deadlock
    // on a full stdout/stderr buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf).with_context(|| "read stdout")?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf).with_context(|| "read stderr")?;
        }
        Ok(buf)
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().with_context(|| "try_wait")? {
            let stdout = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("queue tool timed out after {:?}", timeout);
            let _ = child.kill();
            let _ = child.wait().with_context(|| "wait after kill")?;
            let _ = stdout_thread.join();
            let _ = stderr_thread.join();
            return Err(anyhow!("queue tool exceeded timeout ({:?})", timeout));
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
