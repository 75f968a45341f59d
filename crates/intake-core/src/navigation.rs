//! Step navigation on top of [`FormStore::dispatch`].
//!
//! Users may revisit any step they have already reached but can only move forward one step
//! at a time through [`FormStore::next_step`]. Each method returns `true` when the cursor moved.

use crate::action::FormAction;
use crate::store::FormStore;
use intake_types::Step;

impl FormStore {
    pub fn current_step(&self) -> Step {
        self.state().current_step
    }

    pub fn can_go_next(&self) -> bool {
        self.current_step().next().is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step().prev().is_some()
    }

    /// Advance one step. No-op on the last step.
    pub fn next_step(&mut self) -> bool {
        match self.current_step().next() {
            Some(next) => self.dispatch(FormAction::SetStep(i64::from(next.get()))),
            None => false,
        }
    }

    /// Go back one step. No-op on the first step.
    pub fn prev_step(&mut self) -> bool {
        match self.current_step().prev() {
            Some(prev) => self.dispatch(FormAction::SetStep(i64::from(prev.get()))),
            None => false,
        }
    }

    /// Jump to `target` if it is a valid step not ahead of the current one.
    pub fn go_to_step(&mut self, target: i64) -> bool {
        let Ok(target) = Step::new(target) else {
            tracing::debug!(requested = target, "ignoring out of range step");
            return false;
        };
        if target > self.current_step() {
            tracing::debug!(current = %self.current_step(), requested = %target, "ignoring forward jump");
            return false;
        }
        self.dispatch(FormAction::SetStep(i64::from(target.get())))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::IntakeConfig;
    use crate::store::FormStore;
    use chrono::NaiveDate;

    fn store_at(step: u8) -> FormStore {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date");
        let mut store = FormStore::new(IntakeConfig::fixed(today));
        for _ in 1..step {
            assert!(store.next_step());
        }
        store
    }

    #[test]
    fn next_step_stops_at_last() {
        let mut store = store_at(5);
        assert!(!store.can_go_next());
        assert!(!store.next_step());
        assert_eq!(store.current_step().get(), 5);
    }

    #[test]
    fn prev_step_stops_at_first() {
        let mut store = store_at(1);
        assert!(!store.can_go_back());
        assert!(!store.prev_step());
        assert_eq!(store.current_step().get(), 1);

        let mut store = store_at(3);
        assert!(store.prev_step());
        assert_eq!(store.current_step().get(), 2);
    }

    #[test]
    fn go_to_step_allows_backward_and_same_step_only() {
        for current in 1..=5u8 {
            for target in 1..=5i64 {
                let mut store = store_at(current);
                store.go_to_step(target);
                let expected = if target <= i64::from(current) {
                    target
                } else {
                    i64::from(current)
                };
                assert_eq!(
                    i64::from(store.current_step().get()),
                    expected,
                    "current {current}, target {target}"
                );
            }
        }
    }

    #[test]
    fn go_to_step_ignores_out_of_range() {
        let mut store = store_at(3);
        assert!(!store.go_to_step(0));
        assert!(!store.go_to_step(6));
        assert_eq!(store.current_step().get(), 3);
    }

    #[test]
    fn next_step_after_going_back_moves_one_step() {
        let mut store = store_at(4);
        assert!(store.go_to_step(2));
        assert!(store.next_step());
        assert_eq!(store.current_step().get(), 3);
    }
}
