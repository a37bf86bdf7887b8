use crate::areas::session::Session;
use std::io::Write;

impl Session {
    pub fn version(&self) -> anyhow::Result<i32> {
        writeln!(self.writer(), "vc version {}", env!("CARGO_PKG_VERSION"))?;

        Ok(0)
    }
}
