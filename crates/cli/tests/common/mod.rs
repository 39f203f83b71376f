#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use assert_cmd::Command;
use tempfile::TempDir;

pub const PROFILE: &str = r#"<html><body>
  <h1 class="ql-display-small">Ada Lovelace</h1>
  <div class="profile-league"><h2>Gold League</h2></div>
  <div class="profile-badge">
    <img src="https://cdn.example/trivia.png">
    <span class="ql-title-medium">Trivia Week 3</span>
    <span class="ql-body-medium">Earned Jan 3, 2026</span>
  </div>
  <div class="profile-badge">
    <span class="ql-title-medium">Level 1: Game On</span>
    <span class="ql-body-medium">Earned Jan 9, 2026</span>
  </div>
  <div class="profile-badge">
    <span class="ql-title-medium">Level 2: Retro Game</span>
    <span class="ql-body-medium">Earned Dec 9, 2025</span>
  </div>
</body></html>"#;

pub const CATALOG: &str = "<html><body><div data-code=\"\
<div class=&quot;card&quot;><h3 class=&quot;card-title&quot;>Trivia Week 3</h3><p>Access code: 1q-trivia-3</p></div>\
<div class=&quot;card&quot;><h3 class=&quot;card-title&quot;>Level 3: Space Race</h3><p>Access code: 1q-space-3</p></div>\
\"></div></body></html>";

/// Scratch directory holding a config that points every URL at `server_url`.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Sandbox {
    pub fn new(server_url: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.toml");
        let history = dir.path().join("profiles.json");
        let toml = format!(
            "season = '2026'\n\
             profile_hosts = ['127.0.0.1']\n\
             catalog_url = '{server_url}/arcade'\n\
             catalog_base_url = '{server_url}'\n\
             request_timeout_seconds = 5\n\
             history_path = '{}'\n",
            history.display()
        );
        std::fs::write(&config, toml).expect("write config");
        Self { dir, config }
    }

    pub fn history_file(&self) -> PathBuf {
        self.dir.path().join("profiles.json")
    }

    pub fn command(&self) -> Command {
        command_with_config(&self.config)
    }
}

pub fn command_with_config(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("arcade-calc").expect("binary built");
    cmd.arg("--config").arg(config);
    cmd.env("NO_COLOR", "1");
    cmd.env("NO_TABLE", "1");
    cmd.env("ARCADE_CALC_NO_METRICS", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let text = String::from_utf8(output.stdout.clone()).expect("utf8");
    serde_json::from_str(&text).expect("stdout is JSON")
}
