/// Success/failure state plus ordered diagnostic messages for one operation.
///
/// Every CRUD call returns one of these; data-layer failures surface here
/// rather than as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    good: bool,
    messages: Vec<String>,
}

impl Outcome {
    /// A new outcome, not yet marked good.
    pub fn new() -> Outcome {
        Outcome::default()
    }

    /// A bad outcome carrying one message. Handy for precondition hooks.
    pub fn bad(message: impl Into<String>) -> Outcome {
        let mut outcome = Outcome::new();
        outcome.push(message);
        outcome
    }

    pub fn is_good(&self) -> bool {
        self.good
    }

    pub fn mark_good(&mut self) {
        self.good = true;
    }

    pub fn mark_bad(&mut self) {
        self.good = false;
    }

    /// Append a diagnostic message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Copy every message from `other`, leaving the good/bad state alone.
    pub fn absorb(&mut self, other: &Outcome) {
        self.messages.extend(other.messages.iter().cloned());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
