//! Alert directive ingress
//!
//! Validates Set/Delete directives from the voice-assistant device and applies
//! them to the session. Directives for anything other than a timer (alarms,
//! reminders) are ignored.

use embassy_sync::blocking_mutex::raw::RawMutex;
use multitimer_protocol::{DeleteAlert, SetAlert};

use crate::error::AlertError;
use crate::registry::Upsert;
use crate::session::GadgetSession;
use crate::timestamp::parse_timestamp;
use crate::traits::WallClock;

/// Alert type handled by the gadget, compared without regard to case
pub const TIMER_KIND: &str = "TIMER";

/// What a directive did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Timer added or updated
    Scheduled {
        token: u32,
        expiry: i64,
        upsert: Upsert,
        /// A countdown loop was requested by this directive
        loop_started: bool,
    },
    /// Not a timer; nothing changed
    IgnoredNonTimer,
    /// Delete applied; `cleared` is the number of slots emptied (0 or 1)
    Removed { token: u32, cleared: usize },
}

/// Applies directives to a session against a wall clock
pub struct AlertIngress<'a, M: RawMutex, const N: usize, C> {
    session: &'a GadgetSession<M, N>,
    clock: C,
}

impl<'a, M: RawMutex, const N: usize, C: WallClock> AlertIngress<'a, M, N, C> {
    pub fn new(session: &'a GadgetSession<M, N>, clock: C) -> Self {
        Self { session, clock }
    }

    /// Handle a Set directive
    pub fn set_alert(&self, alert: &SetAlert<'_>) -> Result<Outcome, AlertError> {
        if !alert.kind.eq_ignore_ascii_case(TIMER_KIND) {
            return Ok(Outcome::IgnoredNonTimer);
        }

        let expiry = parse_timestamp(alert.scheduled_time)?;
        if expiry <= 0 || expiry <= self.clock.now_s() {
            return Err(AlertError::AlreadyElapsed);
        }

        let scheduled = self.session.schedule(alert.token, expiry)?;
        Ok(Outcome::Scheduled {
            token: alert.token,
            expiry,
            upsert: scheduled.upsert,
            loop_started: scheduled.loop_started,
        })
    }

    /// Handle a Delete directive. Unknown tokens are not an error.
    pub fn delete_alert(&self, alert: &DeleteAlert) -> Outcome {
        let cleared = self.session.remove(alert.token).unwrap_or(0);
        Outcome::Removed {
            token: alert.token,
            cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoopState;
    use core::cell::Cell;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    // 2024-03-01T12:00:00Z
    const NOW: i64 = 1_709_294_400;

    struct FixedClock(Cell<i64>);

    impl WallClock for FixedClock {
        fn now_s(&self) -> i64 {
            self.0.get()
        }
    }

    fn timer(token: u32, at: &str) -> SetAlert<'_> {
        SetAlert {
            token,
            kind: "TIMER",
            scheduled_time: at,
        }
    }

    #[test]
    fn test_set_schedules_and_starts_loop() {
        let session: GadgetSession<NoopRawMutex, 8> = GadgetSession::new();
        let clock = FixedClock(Cell::new(NOW));
        let ingress = AlertIngress::new(&session, &clock);

        let outcome = ingress.set_alert(&timer(5, "2024-03-01T12:00:30+0000"));
        assert_eq!(
            outcome,
            Ok(Outcome::Scheduled {
                token: 5,
                expiry: NOW + 30,
                upsert: Upsert::Inserted { index: 0 },
                loop_started: true,
            })
        );
        assert_eq!(session.loop_state(), LoopState::Running);

        // Same token again updates in place and leaves the loop alone
        let outcome = ingress.set_alert(&timer(5, "2024-03-01T12:01:00Z"));
        assert_eq!(
            outcome,
            Ok(Outcome::Scheduled {
                token: 5,
                expiry: NOW + 60,
                upsert: Upsert::Updated { index: 0 },
                loop_started: false,
            })
        );
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_non_timer_kinds_are_ignored() {
        let session: GadgetSession<NoopRawMutex, 8> = GadgetSession::new();
        let ingress = AlertIngress::new(&session, FixedClock(Cell::new(NOW)));

        for kind in ["ALARM", "REMINDER", ""] {
            let alert = SetAlert {
                token: 1,
                kind,
                scheduled_time: "2024-03-01T13:00:00Z",
            };
            assert_eq!(ingress.set_alert(&alert), Ok(Outcome::IgnoredNonTimer));
        }
        assert!(session.is_empty());
        assert_eq!(session.loop_state(), LoopState::NotRunning);

        let lower = SetAlert {
            token: 1,
            kind: "timer",
            scheduled_time: "2024-03-01T13:00:00Z",
        };
        assert!(matches!(
            ingress.set_alert(&lower),
            Ok(Outcome::Scheduled { .. })
        ));
    }

    #[test]
    fn test_past_and_garbage_times_rejected() {
        let session: GadgetSession<NoopRawMutex, 8> = GadgetSession::new();
        let clock = FixedClock(Cell::new(NOW));
        let ingress = AlertIngress::new(&session, &clock);

        assert_eq!(
            ingress.set_alert(&timer(1, "2024-03-01T12:00:00Z")),
            Err(AlertError::AlreadyElapsed)
        );
        assert_eq!(
            ingress.set_alert(&timer(1, "2024-03-01T11:59:59Z")),
            Err(AlertError::AlreadyElapsed)
        );
        assert_eq!(
            ingress.set_alert(&timer(1, "tomorrow")),
            Err(AlertError::TimestampUnparseable)
        );

        // Before time sync the clock reads zero; the epoch itself is still rejected
        clock.0.set(0);
        assert_eq!(
            ingress.set_alert(&timer(1, "1970-01-01T00:00:00Z")),
            Err(AlertError::AlreadyElapsed)
        );

        assert!(session.is_empty());
        assert_eq!(session.loop_state(), LoopState::NotRunning);
    }

    #[test]
    fn test_registry_errors_pass_through() {
        let session: GadgetSession<NoopRawMutex, 1> = GadgetSession::new();
        let ingress = AlertIngress::new(&session, FixedClock(Cell::new(NOW)));

        assert_eq!(
            ingress.set_alert(&timer(0, "2024-03-01T13:00:00Z")),
            Err(AlertError::InvalidToken)
        );
        ingress.set_alert(&timer(1, "2024-03-01T13:00:00Z")).unwrap();
        assert_eq!(
            ingress.set_alert(&timer(2, "2024-03-01T13:00:00Z")),
            Err(AlertError::CapacityExceeded)
        );
    }

    #[test]
    fn test_delete_is_unconditional() {
        let session: GadgetSession<NoopRawMutex, 8> = GadgetSession::new();
        let ingress = AlertIngress::new(&session, FixedClock(Cell::new(NOW)));

        ingress.set_alert(&timer(5, "2024-03-01T13:00:00Z")).unwrap();
        assert_eq!(
            ingress.delete_alert(&DeleteAlert { token: 5 }),
            Outcome::Removed {
                token: 5,
                cleared: 1
            }
        );
        assert_eq!(
            ingress.delete_alert(&DeleteAlert { token: 5 }),
            Outcome::Removed {
                token: 5,
                cleared: 0
            }
        );
        assert_eq!(
            ingress.delete_alert(&DeleteAlert { token: 0 }),
            Outcome::Removed {
                token: 0,
                cleared: 0
            }
        );
        assert!(session.is_empty());
    }
}
