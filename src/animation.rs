// src/animation.rs
use std::time::{Duration, Instant};

use crate::strength::MeterTier;

pub type Rgb = (u8, u8, u8);

/// Background gradients cycled by the animation, as (start, end) pairs.
pub const PALETTE: [(Rgb, Rgb); 4] = [
    ((0x66, 0x7e, 0xea), (0x76, 0x4b, 0xa2)),
    ((0x2e, 0xd5, 0x73), (0x1e, 0x90, 0xff)),
    ((0xff, 0x6b, 0x6b), (0xee, 0x5a, 0x52)),
    ((0xf3, 0x9c, 0x12), (0xe7, 0x4c, 0x3c)),
];

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2500);
pub const PULSE_DURATION: Duration = Duration::from_millis(900);

/// A running, cancellable repeat timer. Dropping it cancels it.
#[derive(Debug, Clone, Copy)]
struct Ticker {
    started: Instant,
    interval: Duration,
    base_index: usize,
}

impl Ticker {
    fn index_at(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = (elapsed.as_millis() / self.interval.as_millis().max(1)) as usize;
        (self.base_index + steps) % PALETTE.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pulse {
    tier: MeterTier,
    until: Instant,
}

/// Owns the background colour cycle and the short strength pulse.
/// Driven by explicit `tick` calls from the event loop.
#[derive(Debug)]
pub struct AnimationController {
    interval: Duration,
    ticker: Option<Ticker>,
    color_index: usize,
    pulse: Option<Pulse>,
}

impl Default for AnimationController {
    fn default() -> Self {
        AnimationController::new(DEFAULT_INTERVAL)
    }
}

impl AnimationController {
    pub fn new(interval: Duration) -> Self {
        AnimationController {
            interval,
            ticker: None,
            color_index: 0,
            pulse: None,
        }
    }

    /// Starts cycling from the current colour. A running cycle is restarted.
    pub fn start(&mut self, now: Instant) {
        if self.ticker.is_some() {
            log::debug!("Restarting background animation");
        }
        self.ticker = Some(Ticker {
            started: now,
            interval: self.interval,
            base_index: self.color_index,
        });
    }

    /// Cancels the cycle, keeping whatever colour is showing.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            log::debug!("Stopped background animation at colour {}", self.color_index);
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Advances the colour for elapsed intervals; true if it changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(pulse) = self.pulse {
            if now >= pulse.until {
                self.pulse = None;
            }
        }
        let Some(ticker) = self.ticker else {
            return false;
        };
        let next = ticker.index_at(now);
        let changed = next != self.color_index;
        self.color_index = next;
        changed
    }

    #[cfg(test)]
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn colors(&self) -> (Rgb, Rgb) {
        PALETTE[self.color_index]
    }

    pub fn pulse(&mut self, tier: MeterTier, now: Instant) {
        self.pulse = Some(Pulse { tier, until: now + PULSE_DURATION });
    }

    pub fn active_pulse(&self, now: Instant) -> Option<MeterTier> {
        self.pulse.filter(|p| now < p.until).map(|p| p.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_idle_controller_does_not_advance() {
        let mut anim = AnimationController::default();
        let t0 = Instant::now();
        assert!(!anim.is_running());
        assert!(!anim.tick(t0 + ms(10_000)));
        assert_eq!(anim.color_index(), 0);
        assert_eq!(anim.colors(), PALETTE[0]);
    }

    #[test]
    fn test_tick_advances_per_interval_and_wraps() {
        let mut anim = AnimationController::new(ms(2500));
        let t0 = Instant::now();
        anim.start(t0);
        assert!(!anim.tick(t0 + ms(2499)));
        assert!(anim.tick(t0 + ms(2500)));
        assert_eq!(anim.color_index(), 1);
        assert!(anim.tick(t0 + ms(7500)));
        assert_eq!(anim.color_index(), 3);
        assert!(anim.tick(t0 + ms(10_000)));
        assert_eq!(anim.color_index(), 0, "wraps around the palette");
    }

    #[test]
    fn test_stop_keeps_colour_and_restart_continues_from_it() {
        let mut anim = AnimationController::new(ms(100));
        let t0 = Instant::now();
        anim.start(t0);
        anim.tick(t0 + ms(250));
        assert_eq!(anim.color_index(), 2);
        anim.stop();
        assert!(!anim.is_running());
        assert!(!anim.tick(t0 + ms(1000)));
        assert_eq!(anim.color_index(), 2);

        let t1 = t0 + ms(2000);
        anim.start(t1);
        anim.tick(t1 + ms(100));
        assert_eq!(anim.color_index(), 3);
    }

    #[test]
    fn test_start_twice_restarts_timer() {
        let mut anim = AnimationController::new(ms(100));
        let t0 = Instant::now();
        anim.start(t0);
        anim.start(t0 + ms(90));
        assert!(!anim.tick(t0 + ms(150)), "second start reset the interval");
        assert!(anim.tick(t0 + ms(190)));
    }

    #[test]
    fn test_pulse_expires() {
        let mut anim = AnimationController::default();
        let t0 = Instant::now();
        anim.pulse(MeterTier::High, t0);
        assert_eq!(anim.active_pulse(t0 + ms(899)), Some(MeterTier::High));
        assert_eq!(anim.active_pulse(t0 + ms(900)), None);
        anim.tick(t0 + ms(1000));
        assert_eq!(anim.active_pulse(t0), None, "tick drops an expired pulse");
    }
}
