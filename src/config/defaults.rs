use std::path::PathBuf;

use super::Provider;

pub fn default_version() -> u32 {
    1
}

pub fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_timeout_sec() -> u64 {
    60
}

pub fn default_synthesis_timeout_sec() -> u64 {
    90
}

pub fn default_provider() -> Provider {
    Provider::ClaudeCli
}

pub fn default_claude_binary() -> PathBuf {
    // Check common install location first
    if let Some(home) = std::env::var_os("HOME") {
        let local_path = PathBuf::from(home).join(".claude/local/claude");
        if local_path.exists() {
            return local_path;
        }
    }
    // Fall back to PATH lookup
    PathBuf::from("claude")
}

pub fn default_claude_model() -> String {
    "sonnet".to_string()
}

pub fn default_codex_binary() -> PathBuf {
    PathBuf::from("codex")
}

pub fn default_codex_model() -> String {
    "gpt-4.1".to_string()
}

pub fn default_max_attempts() -> u32 {
    2
}

pub fn default_backoff_base_ms() -> u64 {
    500
}
