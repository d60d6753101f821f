use crate::session::Session;

/// Default generation budget for one session.
pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Retry,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Generating,
    Evaluating,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// A new answer was produced.
    Generated,
    /// The controller ruled on the evaluated answer.
    Decided(Decision),
}

impl LoopState {
    pub const INITIAL: LoopState = LoopState::Generating;

    /// Transition table. `None` means the event is not legal in this state.
    pub fn next(self, event: LoopEvent) -> Option<LoopState> {
        match (self, event) {
            (LoopState::Generating, LoopEvent::Generated) => Some(LoopState::Evaluating),
            (LoopState::Evaluating, LoopEvent::Decided(Decision::Retry)) => {
                Some(LoopState::Generating)
            }
            (LoopState::Evaluating, LoopEvent::Decided(Decision::End)) => Some(LoopState::Done),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == LoopState::Done
    }
}

/// Termination policy: stop on a passing verdict or an exhausted budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    max_attempts: u32,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS)
    }
}

impl Controller {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn decide(&self, session: &Session) -> Decision {
        if session.verdict_passed() || session.attempts() >= self.max_attempts {
            Decision::End
        } else {
            Decision::Retry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;

    fn session_after(attempts: u32, last: Verdict) -> Session {
        let mut session = Session::new("q");
        for n in 1..=attempts {
            session.record_answer(format!("a{n}"));
            session.record_verdict(Verdict::fail("nope"));
        }
        session.record_verdict(last);
        session
    }

    #[test]
    fn pass_ends_immediately() {
        let controller = Controller::default();
        assert_eq!(controller.decide(&session_after(1, Verdict::pass())), Decision::End);
    }

    #[test]
    fn failure_under_budget_retries() {
        let controller = Controller::default();
        for attempts in 1..MAX_ATTEMPTS {
            let session = session_after(attempts, Verdict::fail("wrong"));
            assert_eq!(controller.decide(&session), Decision::Retry, "attempt {attempts}");
        }
    }

    #[test]
    fn exhausted_budget_ends() {
        let controller = Controller::new(3);
        assert_eq!(controller.decide(&session_after(3, Verdict::fail("wrong"))), Decision::End);
        assert_eq!(controller.decide(&session_after(4, Verdict::fail("wrong"))), Decision::End);
    }

    #[test]
    fn transition_table() {
        use LoopEvent::*;
        use LoopState::*;

        assert_eq!(Generating.next(Generated), Some(Evaluating));
        assert_eq!(Evaluating.next(Decided(Decision::Retry)), Some(Generating));
        assert_eq!(Evaluating.next(Decided(Decision::End)), Some(Done));
        assert_eq!(LoopState::INITIAL, Generating);
        assert!(Done.is_terminal());
    }

    #[test]
    fn no_other_transitions() {
        use LoopEvent::*;
        use LoopState::*;

        assert_eq!(Generating.next(Decided(Decision::Retry)), None);
        assert_eq!(Generating.next(Decided(Decision::End)), None);
        assert_eq!(Evaluating.next(Generated), None);
        assert_eq!(Done.next(Generated), None);
        assert_eq!(Done.next(Decided(Decision::Retry)), None);
    }
}
