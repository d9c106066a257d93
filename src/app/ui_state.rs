use crate::app::core::{App, InputMode};
use crate::wallet::TipAmount;

impl App {
    pub fn start_editing_tip(&mut self) {
        self.input_mode = InputMode::EditingTip;
    }

    pub fn start_editing_owner(&mut self) {
        self.input_mode = InputMode::EditingOwner;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode != InputMode::Normal
    }

    pub fn push_input_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::EditingTip if c.is_ascii_digit() || c == '.' => self.tip_amount.push(c),
            InputMode::EditingOwner if c.is_ascii_alphanumeric() => self.new_owner.push(c),
            _ => {}
        }
    }

    pub fn pop_input_char(&mut self) {
        match self.input_mode {
            InputMode::EditingTip => {
                self.tip_amount.pop();
            }
            InputMode::EditingOwner => {
                self.new_owner.pop();
            }
            InputMode::Normal => {}
        }
    }

    /// Mirrors the disabled state of the send control
    pub fn can_send_tip(&self) -> bool {
        !self.loading && TipAmount::parse(&self.tip_amount).is_ok()
    }

    pub fn can_change_owner(&self) -> bool {
        !self.loading && !self.new_owner.trim().is_empty()
    }

    /// Claim the in-flight slot at key press time, before the action task
    /// gets the lock. `false` if something is already running.
    pub fn try_begin_action(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn start_reset_confirm(&mut self) {
        if !self.loading {
            self.is_confirming_reset = true;
        }
    }

    pub fn cancel_reset_confirm(&mut self) {
        self.is_confirming_reset = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::app::core::test_support::{test_account, test_config};
    use crate::gateway::mock::MockGateway;
    use crate::wallet::mock::{MockLedger, MockObject};
    use super::*;

    fn app() -> App {
        App::new(
            test_config(),
            Arc::new(MockLedger::new(MockObject::NoContent, vec![])),
            Arc::new(MockGateway::succeeding()),
            Some(test_account()),
        )
    }

    #[test]
    fn test_tip_input_filters_characters() {
        let mut app = app();
        app.start_editing_tip();
        for c in "1a.5x".chars() {
            app.push_input_char(c);
        }
        assert_eq!(app.tip_amount, "1.5");
        assert!(app.can_send_tip());
        app.pop_input_char();
        app.pop_input_char();
        assert_eq!(app.tip_amount, "1");
    }

    #[test]
    fn test_controls_disabled_while_loading() {
        let mut app = app();
        app.tip_amount = "1".to_string();
        app.new_owner = "0xabc".to_string();
        app.loading = true;
        assert!(!app.can_send_tip());
        assert!(!app.can_change_owner());
        app.start_reset_confirm();
        assert!(!app.is_confirming_reset);
    }

    #[test]
    fn test_zero_tip_cannot_be_sent() {
        let mut app = app();
        app.tip_amount = "0.0".to_string();
        assert!(!app.can_send_tip());
    }

    #[test]
    fn test_second_submit_is_refused() {
        let mut app = app();
        app.tip_amount = "1".to_string();
        assert!(app.can_send_tip() && app.try_begin_action());
        assert!(!app.can_send_tip());
        assert!(!app.try_begin_action());
    }
}
