//! Clip command - apply TimeClip to a number.

use anyhow::Result;
use clap::Args;
use otter_date_intrinsics::conversion::{number_to_string, string_to_number};
use otter_datemath::time_clip;

#[derive(Args)]
pub struct ClipCommand {
    /// Number to clip, in any form ToNumber accepts
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

impl ClipCommand {
    pub fn execute(&self) -> Result<String> {
        Ok(number_to_string(time_clip(string_to_number(&self.value))))
    }
}
