//! Keyboard navigation.
//!
//! Digits (and `x`/`y`, reserved for the sex chromosomes) accumulate in a
//! debounced two-character buffer that Enter commits as a chromosome jump.
//! The action keys dispatch directly without buffering.

use covplot_core::Chromosome;
use std::time::{Duration, Instant};

/// How long the numeric buffer stays alive between keystrokes.
pub const KEYSTROKE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    JumpToChromosome(Chromosome),
    PrevChromosome,
    NextChromosome,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Default)]
pub struct NavigationKeyRouter {
    buffer: String,
    last_key_time: Option<Instant>,
}

impl NavigationKeyRouter {
    pub fn new() -> NavigationKeyRouter {
        NavigationKeyRouter::default()
    }

    /// Translate one keystroke. `input_focused` bypasses routing entirely
    /// so typing in the region field never moves the view.
    pub fn route(&mut self, key: Key, input_focused: bool, now: Instant) -> Option<NavAction> {
        if input_focused {
            return None;
        }
        let within_window = self
            .last_key_time
            .is_some_and(|last| now.duration_since(last) < KEYSTROKE_DELAY);

        match key {
            Key::Enter => {
                if !within_window {
                    return None;
                }
                // An unparseable buffer is silently ignored and kept.
                let chromosome = parse_buffer(&self.buffer)?;
                self.buffer.clear();
                self.last_key_time = Some(now);
                Some(NavAction::JumpToChromosome(chromosome))
            }
            Key::ArrowLeft => self.direct(NavAction::PrevChromosome, now),
            Key::ArrowRight => self.direct(NavAction::NextChromosome, now),
            Key::Char(c) if c.is_ascii_digit() || matches!(c.to_ascii_lowercase(), 'x' | 'y') => {
                if !within_window {
                    self.buffer.clear();
                }
                // Two characters at most; the oldest is discarded.
                if self.buffer.len() > 1 {
                    self.buffer.remove(0);
                }
                self.buffer.push(c);
                self.last_key_time = Some(now);
                None
            }
            Key::Char('a') => self.direct(NavAction::PanLeft, now),
            Key::Char('d') => self.direct(NavAction::PanRight, now),
            Key::Char('w') | Key::Char('+') => self.direct(NavAction::ZoomIn, now),
            Key::Char('s') | Key::Char('-') => self.direct(NavAction::ZoomOut, now),
            Key::Char(_) => None,
        }
    }

    fn direct(&mut self, action: NavAction, now: Instant) -> Option<NavAction> {
        self.buffer.clear();
        self.last_key_time = Some(now);
        Some(action)
    }
}

/// Only `1..=22` and the literal `X`/`Y` commit; the `23`/`24` aliases the
/// region parser accepts are not typeable here.
fn parse_buffer(buffer: &str) -> Option<Chromosome> {
    if buffer.eq_ignore_ascii_case("x") {
        return Some(Chromosome::X);
    }
    if buffer.eq_ignore_ascii_case("y") {
        return Some(Chromosome::Y);
    }
    match buffer.parse::<u8>() {
        Ok(n) if (1..=22).contains(&n) => Chromosome::from_index(n as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn digits_then_enter_jump_to_two_digit_chromosome() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        assert_eq!(router.route(Key::Char('1'), false, at(base, 0)), None);
        assert_eq!(router.route(Key::Char('2'), false, at(base, 300)), None);
        let action = router.route(Key::Enter, false, at(base, 600));
        assert_eq!(
            action,
            Some(NavAction::JumpToChromosome("12".parse().unwrap()))
        );
    }

    #[test]
    fn stale_digit_is_dropped_after_the_window() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        router.route(Key::Char('1'), false, at(base, 0));
        // Past the debounce window the buffer resets to just "2".
        router.route(Key::Char('2'), false, at(base, 1500));
        let action = router.route(Key::Enter, false, at(base, 1800));
        assert_eq!(
            action,
            Some(NavAction::JumpToChromosome("2".parse().unwrap()))
        );
    }

    #[test]
    fn buffer_overflow_keeps_the_last_two_digits() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        for (i, digit) in ['9', '1', '2'].into_iter().enumerate() {
            router.route(Key::Char(digit), false, at(base, i as u64 * 100));
        }
        let action = router.route(Key::Enter, false, at(base, 400));
        assert_eq!(
            action,
            Some(NavAction::JumpToChromosome("12".parse().unwrap()))
        );
    }

    #[test]
    fn sex_chromosomes_commit_by_letter() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        router.route(Key::Char('x'), false, at(base, 0));
        assert_eq!(
            router.route(Key::Enter, false, at(base, 100)),
            Some(NavAction::JumpToChromosome(Chromosome::X))
        );
    }

    #[test]
    fn invalid_buffer_is_silently_ignored() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        router.route(Key::Char('9'), false, at(base, 0));
        router.route(Key::Char('9'), false, at(base, 100));
        assert_eq!(router.route(Key::Enter, false, at(base, 200)), None);
        // Enter with no preceding key is ignored too.
        let mut idle = NavigationKeyRouter::new();
        assert_eq!(idle.route(Key::Enter, false, at(base, 0)), None);
    }

    #[test]
    fn action_keys_dispatch_without_buffering() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        let cases = [
            (Key::Char('a'), NavAction::PanLeft),
            (Key::Char('d'), NavAction::PanRight),
            (Key::Char('w'), NavAction::ZoomIn),
            (Key::Char('+'), NavAction::ZoomIn),
            (Key::Char('s'), NavAction::ZoomOut),
            (Key::Char('-'), NavAction::ZoomOut),
            (Key::ArrowLeft, NavAction::PrevChromosome),
            (Key::ArrowRight, NavAction::NextChromosome),
        ];
        for (i, (key, expected)) in cases.into_iter().enumerate() {
            assert_eq!(router.route(key, false, at(base, i as u64 * 10)), Some(expected));
        }
    }

    #[test]
    fn action_keys_reset_the_buffer() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        router.route(Key::Char('1'), false, at(base, 0));
        router.route(Key::Char('w'), false, at(base, 100));
        router.route(Key::Char('2'), false, at(base, 200));
        assert_eq!(
            router.route(Key::Enter, false, at(base, 300)),
            Some(NavAction::JumpToChromosome("2".parse().unwrap()))
        );
    }

    #[test]
    fn focused_input_swallows_everything() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        assert_eq!(router.route(Key::Char('1'), true, at(base, 0)), None);
        assert_eq!(router.route(Key::Char('w'), true, at(base, 100)), None);
        // The guarded keys left no trace in the buffer.
        router.route(Key::Char('2'), false, at(base, 200));
        assert_eq!(
            router.route(Key::Enter, false, at(base, 300)),
            Some(NavAction::JumpToChromosome("2".parse().unwrap()))
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let base = Instant::now();
        let mut router = NavigationKeyRouter::new();
        assert_eq!(router.route(Key::Char('q'), false, at(base, 0)), None);
        router.route(Key::Char('7'), false, at(base, 100));
        assert_eq!(router.route(Key::Char('z'), false, at(base, 200)), None);
        // An unmapped key neither commits nor clears the buffer.
        assert_eq!(
            router.route(Key::Enter, false, at(base, 300)),
            Some(NavAction::JumpToChromosome("7".parse().unwrap()))
        );
    }
}
