use crate::areas::session::Session;
use crate::commands::Invocation;
use crate::commands::dispatch::forward;

impl Session {
    /// `cvs update` as typed, then a reference cache refresh.
    ///
    /// The metadata cache is still empty at this point, so the refresh sees
    /// the `Entries` files the update just wrote.
    pub fn update(&self, invocation: &Invocation) -> anyhow::Result<i32> {
        let code = forward(self, invocation)?;
        tracing::debug!(code, "update finished, refreshing reference texts");

        self.capture_texts(&[])?;

        Ok(code)
    }
}
