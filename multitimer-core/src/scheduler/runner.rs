//! The countdown loop
//!
//! One instance at a time, started by ingress through the session's wake
//! signal and ending by itself once the registry is empty. Sleeps are the
//! only suspension points; a delete that lands during a sleep is picked up on
//! the next pass.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use super::frames::{countdown_frame, spinner_frame, SPINNER};
use super::phase::Phase;
use crate::config::GadgetConfig;
use crate::session::GadgetSession;
use crate::traits::{DisplayFrame, SegmentDisplay, WallClock};

/// One pass of the loop, reported to the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Drew the time left on `token`, then slept one refresh interval
    Countdown { token: u32, remaining_s: i64 },
    /// Played the flourish for `token`, which expired `overdue_s` ago
    Flourish { token: u32, overdue_s: i64 },
    /// Dropped `token`, expired past the stale window
    Evicted { token: u32 },
    /// Registry empty; display cleared and loop released
    Finished,
}

/// Countdown loop bound to one session, display, clock and delay source
pub struct CountdownLoop<'a, M: RawMutex, const N: usize, D, C, T> {
    session: &'a GadgetSession<M, N>,
    display: D,
    clock: C,
    delay: T,
    config: GadgetConfig,
}

impl<'a, M, const N: usize, D, C, T> CountdownLoop<'a, M, N, D, C, T>
where
    M: RawMutex,
    D: SegmentDisplay,
    C: WallClock,
    T: DelayNs,
{
    pub fn new(
        session: &'a GadgetSession<M, N>,
        display: D,
        clock: C,
        delay: T,
        config: GadgetConfig,
    ) -> Self {
        Self {
            session,
            display,
            clock,
            delay,
            config,
        }
    }

    /// Run passes until the registry is empty, handing each one to `observe`
    pub async fn run(&mut self, mut observe: impl FnMut(&Tick)) {
        loop {
            let tick = self.step().await;
            observe(&tick);
            if tick == Tick::Finished {
                return;
            }
        }
    }

    /// One pass: look up the soonest timer and act on its phase
    pub async fn step(&mut self) -> Tick {
        let Some(timer) = self.session.next_or_finish() else {
            self.display.blank().ok();
            return Tick::Finished;
        };
        let token = timer.token.get();

        match Phase::classify(timer.remaining(self.clock.now_s()), self.config.stale_after_s) {
            Phase::Counting { remaining_s } => {
                self.display.draw(&countdown_frame(remaining_s)).ok();
                self.delay.delay_ms(self.config.refresh_ms).await;
                Tick::Countdown { token, remaining_s }
            }
            Phase::Stale => {
                // May already be gone if a delete raced us
                self.session.remove(token).ok();
                Tick::Evicted { token }
            }
            Phase::Expiring { overdue_s } => {
                self.flourish().await;
                Tick::Flourish { token, overdue_s }
            }
        }
    }

    async fn flourish(&mut self) {
        let frames = usize::from(self.config.flourish_cycles) * SPINNER.len();
        for step in 0..frames {
            self.display.draw(&spinner_frame(step)).ok();
            self.delay.delay_us(self.config.flourish_frame_us).await;
        }
    }
}

/// Hold `text` on the display for `ms`, then blank it
///
/// Used for the boot splash and the connection greeting.
pub async fn flash_text<D: SegmentDisplay, T: DelayNs>(
    display: &mut D,
    delay: &mut T,
    text: &str,
    ms: u32,
) {
    display.draw(&DisplayFrame::text(text)).ok();
    delay.delay_ms(ms).await;
    display.blank().ok();
}
