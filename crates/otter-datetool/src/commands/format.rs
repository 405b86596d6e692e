//! Format command - print a time value the way Date.prototype does.

use anyhow::Result;
use clap::Args;
use otter_date_intrinsics::GlobalData;

#[derive(Args)]
pub struct FormatCommand {
    /// Milliseconds since the epoch
    #[arg(allow_hyphen_values = true)]
    pub ms: f64,

    /// Use toUTCString instead of toString
    #[arg(long)]
    pub utc: bool,
}

impl FormatCommand {
    pub fn execute(&self, global: &GlobalData) -> Result<String> {
        let date = global.new_date(self.ms);
        let method = if self.utc { "toUTCString" } else { "toString" };
        let text = global.call_method(&date, method, &[])?;
        text.as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("{} did not return a string", method))
    }
}
