use std::time::Instant;
use tracing::info;

/// Reports how long a labeled scope took once it is dropped.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> ScopedTimer {
        ScopedTimer {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        info!("{} took {}ms", self.label, self.start.elapsed().as_millis());
    }
}
