use crate::interface_adapters::state::StreamSettings;
use crate::use_cases::CadencePolicy;
use std::{env, net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

// Runtime/server settings. Unset or unparsable values fall back to defaults.

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid setting");
            None
        }
    }
}

fn flag(key: &str, default: bool) -> bool {
    match env::var(key).ok().as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => true,
        Some("0") | Some("false") | Some("FALSE") | Some("no") => false,
        Some(other) => {
            tracing::warn!(key, value = other, "ignoring invalid flag");
            default
        }
        None => default,
    }
}

pub fn http_host() -> IpAddr {
    parsed("FEED_SERVER_HOST").unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

pub fn http_port() -> u16 {
    parsed("FEED_SERVER_PORT").unwrap_or(8080)
}

pub fn push_tick() -> Duration {
    // A zero interval would make the ticker panic.
    let millis = parsed::<u64>("PUSH_TICK_MS")
        .filter(|ms| *ms > 0)
        .unwrap_or(100);
    Duration::from_millis(millis)
}

pub fn loot_refresh_interval() -> Duration {
    Duration::from_secs(parsed("LOOT_REFRESH_SECS").unwrap_or(5))
}

pub fn send_timeout() -> Duration {
    let millis = parsed::<u64>("SEND_TIMEOUT_MS")
        .filter(|ms| *ms > 0)
        .unwrap_or(2000);
    Duration::from_millis(millis)
}

pub fn containers_enabled() -> bool {
    flag("CONTAINERS_ENABLED", false)
}

pub fn process_loot() -> bool {
    flag("PROCESS_LOOT", true)
}

/// `LOG_FORMAT=json` switches log output to JSON lines.
pub fn json_logs() -> bool {
    env::var("LOG_FORMAT").is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Optional JSON world fixture published at startup.
pub fn world_snapshot_path() -> Option<PathBuf> {
    env::var_os("WORLD_SNAPSHOT_PATH")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn stream_settings() -> StreamSettings {
    StreamSettings {
        push_tick: push_tick(),
        send_timeout: send_timeout(),
        policy: CadencePolicy {
            player_interval: Duration::ZERO,
            loot_interval: loot_refresh_interval(),
            containers_enabled: containers_enabled(),
            loose_loot_enabled: process_loot(),
        },
    }
}
