//! This module provides ways to tweak a [`Cache`](crate::cache::Cache) that plays the
//! role of a remote server, so that it can return errors on some tests.
//!
//! The hook is inert unless a test attaches one.

use std::error::Error;

/// This stores some behaviour tweaks, that describe how a mocked source will behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // One counter per TaskSource operation
    pub tasks_for_date_behaviour: (u32, u32),
    pub tasks_between_behaviour: (u32, u32),
    pub add_task_behaviour: (u32, u32),
    pub set_completion_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            tasks_for_date_behaviour: (0, n_fails),
            tasks_between_behaviour: (0, n_fails),
            add_task_behaviour: (0, n_fails),
            set_completion_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_tasks_for_date(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.tasks_for_date_behaviour, "tasks_for_date")
    }
    pub fn can_fetch_tasks_between(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.tasks_between_behaviour, "tasks_between")
    }
    pub fn can_add_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.add_task_behaviour, "add_task")
    }
    pub fn can_set_completion(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_completion_behaviour, "set_completion")
    }
    pub fn can_delete_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_fetch_tasks_between().is_ok());
        assert!(ok.can_fetch_tasks_between().is_ok());
        assert!(ok.can_add_task().is_ok());
        assert!(ok.can_delete_task().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch_tasks_between().is_err());
        assert!(now.can_add_task().is_err());
        assert!(now.can_add_task().is_err());
        assert!(now.can_fetch_tasks_between().is_err());
        assert!(now.can_fetch_tasks_between().is_ok());
        assert!(now.can_add_task().is_ok());

        let mut custom = MockBehaviour{
            tasks_between_behaviour: (0, 1),
            add_task_behaviour: (1, 3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_fetch_tasks_between().is_err());
        assert!(custom.can_fetch_tasks_between().is_ok());
        assert!(custom.can_fetch_tasks_between().is_ok());
        assert!(custom.can_add_task().is_ok());
        assert!(custom.can_add_task().is_err());
        assert!(custom.can_add_task().is_err());
        assert!(custom.can_add_task().is_err());
        assert!(custom.can_add_task().is_ok());

        let mut suspended = MockBehaviour::fail_now(1);
        suspended.suspend();
        assert!(suspended.can_delete_task().is_ok());
        suspended.resume();
        assert!(suspended.can_delete_task().is_err());
        assert!(suspended.can_delete_task().is_ok());
    }
}
