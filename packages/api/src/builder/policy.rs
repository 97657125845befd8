//! Address policy settings

use crate::builder::core::DialerBuilder;

impl DialerBuilder {
    /// Only dial addresses inside these IPs/CIDRs.
    #[must_use]
    pub fn allow<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_allow(entries);
        self
    }

    /// Never dial addresses inside these IPs/CIDRs. Deny wins over allow.
    #[must_use]
    pub fn deny<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_deny(entries);
        self
    }
}
