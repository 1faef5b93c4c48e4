use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::MutexGuard;

/// Serializes tests that touch process environment variables.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

/// Holds `ENV_LOCK` and restores the previous value of `key` on drop.
pub struct ScopedEnvVar {
    key: &'static str,
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnvVar {
    /// Blocking variant for synchronous tests.
    pub fn set(key: &'static str, value: Option<&str>) -> Self {
        let lock = ENV_LOCK.blocking_lock();
        let previous = std::env::var(key).ok();
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
        Self {
            key,
            previous,
            _lock: lock,
        }
    }

    /// Change the value again while still holding the lock.
    pub fn update(&self, value: Option<&str>) {
        match value {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

impl Drop for ScopedEnvVar {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}
