//! Deadline source backed by the tokio clock

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::Timer;

/// Timer that sleeps on the tokio runtime clock
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}
