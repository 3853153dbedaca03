/// Controls tool-call validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    /// When true, payload keys outside the record are rejected instead of ignored.
    pub strict_mode: bool,
}

impl ValidatorConfig {
    pub fn strict() -> Self {
        Self { strict_mode: true }
    }
}
