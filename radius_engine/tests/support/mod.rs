use std::sync::Mutex;

/// Every variable `EngineConfig::with_env_overrides` reads.
pub const RADIUS_VARS: [&str; 3] = [
    "RADIUS_SERVICE_URL",
    "RADIUS_LAND_CLASS",
    "RADIUS_REQUEST_TIMEOUT_SECS",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with only the given `RADIUS_*` variables set.
///
/// All of [`RADIUS_VARS`] are unset first, then `vars` are applied. The
/// prior environment comes back when `f` returns or panics. Callers are
/// serialized because the process environment is shared across test threads.
pub fn with_radius_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = RadiusEnv::apply(vars);
    f()
}

struct RadiusEnv {
    saved: Vec<(&'static str, Option<String>)>,
}

impl RadiusEnv {
    fn apply(vars: &[(&str, &str)]) -> Self {
        let saved = RADIUS_VARS.iter().map(|&key| (key, std::env::var(key).ok())).collect();
        for key in RADIUS_VARS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            assert!(RADIUS_VARS.contains(key), "{} is not a RADIUS_* config variable", key);
            std::env::set_var(key, value);
        }
        Self { saved }
    }
}

impl Drop for RadiusEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
