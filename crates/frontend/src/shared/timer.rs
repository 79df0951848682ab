use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Source of delays for debouncing. The browser uses `setTimeout`; tests
/// drive a paused tokio clock.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()>>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}
