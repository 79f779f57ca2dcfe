// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The built-in Ollama + Cloudflare tunnel runbook
//!
//! Expects these variables from the caller: `model`, `tunnel_token`,
//! `ollama_host`, `ollama_origins`, `log_dir` and `work_dir`.

use crate::{parse_runbook, ParseError, RawRunbook};

pub const BUILTIN_RUNBOOK: &str = r#"
[vars]
model = "llama3.2"

[[phase]]
name = "prepare"
run = "mkdir -p /usr/local/bin"
parallel = true
critical = false

[[phase]]
name = "fetch-ollama-installer"
run = "mkdir -p {work_dir} && curl -fsSL https://ollama.com/install.sh -o {work_dir}/ollama_install.sh"
parallel = true
retries = 2

[[phase]]
name = "install-ollama"
run = "sh {work_dir}/ollama_install.sh"
timeout = "5m"
retries = 1

[[phase]]
name = "start-ollama"
launch = "ollama serve"
log = "{log_dir}/ollama.log"
env = { OLLAMA_HOST = "{ollama_host}", OLLAMA_ORIGINS = "{ollama_origins}" }

[phase.ready]
http = "http://127.0.0.1:11434/api/version"
attempts = 20
interval = "500ms"
on_timeout = "proceed"

[[phase]]
name = "remove-old-cloudflared"
run = "rm -f /usr/local/bin/cloudflared"
parallel = true
critical = false

[[phase]]
name = "apt-clean"
run = "apt-get clean"
parallel = true
critical = false

[[phase]]
name = "dpkg-configure"
run = "dpkg --configure -a"
parallel = true
critical = false

[[phase]]
name = "create-keyrings-dir"
run = "mkdir -p --mode=0755 /usr/share/keyrings"
parallel = true
critical = false

[[phase]]
name = "add-cloudflare-repo"
run = [
    "curl -fsSL https://pkg.cloudflare.com/cloudflare-main.gpg -o /usr/share/keyrings/cloudflare-main.gpg",
    "echo 'deb [signed-by=/usr/share/keyrings/cloudflare-main.gpg] https://pkg.cloudflare.com/cloudflared any main' > /etc/apt/sources.list.d/cloudflared.list",
]
retries = 2

[[phase]]
name = "apt-update"
run = "apt-get update -y"
critical = false
retries = 2

[[phase]]
name = "install-cloudflared"
run = "apt-get install -y cloudflared"
retries = 1

[[phase]]
name = "start-tunnel"
launch = "cloudflared tunnel run --token {tunnel_token}"
log = "{log_dir}/cloudflared.log"

[phase.ready]
process = "cloudflared tunnel run"
attempts = 20
interval = "500ms"
on_timeout = "proceed"

[[phase]]
name = "pull-model"
run = "ollama pull {model}"
timeout = "2h"
retries = 1
"#;

/// Parse the built-in runbook
pub fn builtin_runbook() -> Result<RawRunbook, ParseError> {
    parse_runbook(BUILTIN_RUNBOOK)
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
