use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::shared::timer::Timer;

/// Trailing-edge debounce.
///
/// Each [`Debouncer::arm`] supersedes the previous one; only the future from
/// the latest call resolves to `true`, and only once the quiet period has
/// passed without another call. After [`Debouncer::dispose`] every pending
/// future resolves to `false`.
#[derive(Clone)]
pub struct Debouncer {
    timer: Rc<dyn Timer>,
    quiet: Duration,
    generation: Rc<Cell<u64>>,
    disposed: Rc<Cell<bool>>,
}

impl Debouncer {
    pub fn new(timer: Rc<dyn Timer>, quiet: Duration) -> Self {
        Self {
            timer,
            quiet,
            generation: Rc::new(Cell::new(0)),
            disposed: Rc::new(Cell::new(false)),
        }
    }

    pub fn arm(&self) -> impl Future<Output = bool> + 'static {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);

        let sleep = self.timer.sleep(self.quiet);
        let generation = Rc::clone(&self.generation);
        let disposed = Rc::clone(&self.disposed);

        async move {
            sleep.await;
            !disposed.get() && generation.get() == ticket
        }
    }

    /// Drops whatever is pending without scheduling anything new.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    pub fn dispose(&self) {
        self.disposed.set(true);
        self.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::TokioTimer;
    use std::cell::RefCell;
    use tokio::task::{spawn_local, LocalSet};
    use tokio::time::{sleep, Instant};

    const QUIET: Duration = Duration::from_millis(500);

    type Settled = Rc<RefCell<Vec<(&'static str, Instant)>>>;

    fn fire(debouncer: &Debouncer, settled: &Settled, value: &'static str) {
        let pending = debouncer.arm();
        let settled = Rc::clone(settled);
        spawn_local(async move {
            if pending.await {
                settled.borrow_mut().push((value, Instant::now()));
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_on_last_value() {
        LocalSet::new()
            .run_until(async {
                let debouncer = Debouncer::new(Rc::new(TokioTimer), QUIET);
                let settled: Settled = Rc::default();

                for value in ["b", "ba", "ban", "bank"] {
                    fire(&debouncer, &settled, value);
                    sleep(Duration::from_millis(200)).await;
                }
                let last_call = Instant::now() - Duration::from_millis(200);
                sleep(Duration::from_secs(2)).await;

                let settled = settled.borrow();
                assert_eq!(settled.len(), 1);
                assert_eq!(settled[0].0, "bank");
                let waited = settled[0].1 - last_call;
                assert!(waited >= QUIET && waited < QUIET + Duration::from_millis(5));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_settle() {
        LocalSet::new()
            .run_until(async {
                let debouncer = Debouncer::new(Rc::new(TokioTimer), QUIET);
                let settled: Settled = Rc::default();

                fire(&debouncer, &settled, "first");
                sleep(Duration::from_millis(700)).await;
                fire(&debouncer, &settled, "second");
                sleep(Duration::from_millis(700)).await;

                let values: Vec<_> = settled.borrow().iter().map(|(v, _)| *v).collect();
                assert_eq!(values, vec!["first", "second"]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_drops_pending_value() {
        LocalSet::new()
            .run_until(async {
                let debouncer = Debouncer::new(Rc::new(TokioTimer), QUIET);
                let settled: Settled = Rc::default();

                fire(&debouncer, &settled, "late");
                sleep(Duration::from_millis(100)).await;
                debouncer.dispose();
                sleep(Duration::from_secs(1)).await;

                assert!(settled.borrow().is_empty());
                assert!(debouncer.is_disposed());
                assert!(!debouncer.arm().await);
            })
            .await;
    }
}
