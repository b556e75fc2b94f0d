/// Logical inputs the player integrator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

/// Held state of every [`Action`], sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl KeyState {
    /// Key went down. Auto-repeat events are ignored so a repeat arriving
    /// after a release cannot latch the action again.
    pub fn press(&mut self, action: Action, repeat: bool) {
        if !repeat {
            *self.slot(action) = true;
        }
    }

    pub fn release(&mut self, action: Action) {
        *self.slot(action) = false;
    }

    pub fn held(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
        }
    }

    /// `+1`, `-1` or `0` for forward/backward.
    pub fn thrust(&self) -> f64 {
        axis(self.forward, self.backward)
    }

    /// `+1` turning right, `-1` turning left.
    pub fn turn(&self) -> f64 {
        axis(self.turn_right, self.turn_left)
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::TurnLeft => &mut self.turn_left,
            Action::TurnRight => &mut self.turn_right,
        }
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    positive as u8 as f64 - negative as u8 as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keys = KeyState::default();
        keys.press(Action::Forward, false);
        keys.press(Action::TurnLeft, false);
        assert!(keys.held(Action::Forward));
        assert_eq!(keys.thrust(), 1.);
        assert_eq!(keys.turn(), -1.);

        keys.release(Action::Forward);
        assert!(!keys.held(Action::Forward));
        assert_eq!(keys.thrust(), 0.);
    }

    #[test]
    fn repeat_does_not_retrigger() {
        let mut keys = KeyState::default();
        keys.press(Action::Backward, true);
        assert!(!keys.backward);

        keys.press(Action::Backward, false);
        keys.press(Action::Backward, true);
        assert!(keys.backward);
        keys.release(Action::Backward);
        keys.press(Action::Backward, true);
        assert!(!keys.backward);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = KeyState::default();
        keys.press(Action::TurnLeft, false);
        keys.press(Action::TurnRight, false);
        assert_eq!(keys.turn(), 0.);
    }
}
