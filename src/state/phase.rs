use std::time::Duration;

/// Whether the evasive target is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Target not shown yet
    #[default]
    Idle,
    /// Target visible and fleeing the pointer; presses on it do nothing
    Armed,
    /// Accepted; evasion stopped for good
    Resolved,
}

/// Inputs that can move the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The sequence reached the question
    Enter,
    /// Pointer came close to the evasive target
    EvasiveHover,
    /// The evasive target was pressed or clicked
    EvasivePress,
    /// The accept control was pressed
    Accept,
}

impl Phase {
    /// Apply an event. Only `Accept` leads to `Resolved`.
    pub fn transition(self, event: PhaseEvent) -> Phase {
        match (self, event) {
            (Phase::Idle, PhaseEvent::Enter) => Phase::Armed,
            (Phase::Armed, PhaseEvent::Accept) => Phase::Resolved,
            (phase, _) => phase,
        }
    }

    pub fn is_armed(self) -> bool {
        self == Phase::Armed
    }

    pub fn is_resolved(self) -> bool {
        self == Phase::Resolved
    }
}

/// Screens of the proposal, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Congratulations,
    Warning,
    Question,
    Celebration,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::Congratulations,
        Step::Warning,
        Step::Question,
        Step::Celebration,
    ];

    /// The step that follows on timer expiry or acceptance
    pub fn next(self) -> Step {
        match self {
            Step::Congratulations => Step::Warning,
            Step::Warning => Step::Question,
            Step::Question | Step::Celebration => Step::Celebration,
        }
    }

    /// Steps that advance by themselves after a delay
    pub fn is_timed(self) -> bool {
        matches!(self, Step::Congratulations | Step::Warning)
    }

    /// How long the step's content takes to fade in
    pub fn fade_in(self) -> Duration {
        match self {
            Step::Congratulations | Step::Celebration => Duration::from_secs(1),
            Step::Warning | Step::Question => Duration::from_secs(3),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
