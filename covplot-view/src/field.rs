//! Region input-field state.
//!
//! A failed fetch flips the field into a disabled error state; after
//! [`ERROR_REVERT_DELAY`] it reverts to the placeholder, which always holds
//! the last value that drew successfully.

use covplot_core::GenomicRegion;
use std::time::{Duration, Instant};

pub const ERROR_REVERT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Editable,
    Error { since: Instant },
}

#[derive(Debug, Clone)]
pub struct RegionField {
    value: String,
    placeholder: String,
    state: FieldState,
}

impl RegionField {
    pub fn new(initial: &str) -> RegionField {
        RegionField {
            value: initial.to_string(),
            placeholder: initial.to_string(),
            state: FieldState::Editable,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, FieldState::Error { .. })
    }

    /// User edit; rejected while the field is disabled.
    pub fn set_input(&mut self, text: &str) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.value = text.to_string();
        true
    }

    /// A redraw landed: the region becomes both value and placeholder, the
    /// fallback for the next failure.
    pub fn set_committed(&mut self, region: &GenomicRegion) {
        self.value = region.to_string();
        self.placeholder = self.value.clone();
        self.state = FieldState::Editable;
    }

    /// A fetch failed: show the error state and disable input.
    pub fn mark_error(&mut self, now: Instant) {
        self.state = FieldState::Error { since: now };
    }

    /// Advance the timer; once the revert delay elapses the field restores
    /// the placeholder and re-enables. Returns true on the revert edge.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            FieldState::Error { since } if now.duration_since(since) >= ERROR_REVERT_DELAY => {
                self.value = self.placeholder.clone();
                self.state = FieldState::Editable;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covplot_core::Chromosome;

    #[test]
    fn error_reverts_to_placeholder_after_delay() {
        let base = Instant::now();
        let mut field = RegionField::new("1:0-1000");
        assert!(field.set_input("1:banana"));
        field.mark_error(base);
        assert!(field.is_disabled());
        assert!(!field.set_input("ignored"));

        assert!(!field.poll(base + Duration::from_millis(1000)));
        assert!(field.is_disabled());
        assert!(field.poll(base + Duration::from_millis(1500)));
        assert!(!field.is_disabled());
        assert_eq!(field.value(), "1:0-1000");
        // Poll after recovery is a no-op.
        assert!(!field.poll(base + Duration::from_millis(3000)));
    }

    #[test]
    fn commit_updates_value_and_placeholder() {
        let chrom: Chromosome = "4".parse().unwrap();
        let mut field = RegionField::new("1:0-1000");
        field.set_committed(&GenomicRegion::new(chrom, 100, 900).unwrap());
        assert_eq!(field.value(), "4:100-900");
        assert_eq!(field.placeholder(), "4:100-900");
    }
}
