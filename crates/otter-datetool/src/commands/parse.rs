//! Parse command - turn a date string into a time value.

use anyhow::Result;
use clap::Args;
use otter_date_intrinsics::GlobalData;
use otter_date_intrinsics::conversion::number_to_string;
use otter_datemath::{format_date_utc_variant, format_time};

#[derive(Args)]
pub struct ParseCommand {
    /// Date string, as passed to Date.parse
    #[arg(allow_hyphen_values = true)]
    pub text: String,
}

impl ParseCommand {
    pub fn execute(&self, global: &GlobalData) -> Result<String> {
        let math = global.date_math();
        let ms = math.parse_date(&self.text);
        if ms.is_nan() {
            return Ok("NaN".to_string());
        }

        let t = math.ms_to_gregorian_date_time(ms, true);
        Ok(format!(
            "{}\n{} {}",
            number_to_string(ms),
            format_date_utc_variant(&t),
            format_time(&t, true)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otter_datemath::FixedOffsetPlatform;
    use std::sync::Arc;

    #[test]
    fn test_parse_command() {
        let global = GlobalData::new(Arc::new(FixedOffsetPlatform::utc()));
        let command = ParseCommand {
            text: "Sat, 01 Jan 2000 08:00:00 GMT".to_string(),
        };
        assert_eq!(
            command.execute(&global).unwrap(),
            "946713600000\nSat, 01 Jan 2000 08:00:00 GMT"
        );

        let command = ParseCommand {
            text: "not a date".to_string(),
        };
        assert_eq!(command.execute(&global).unwrap(), "NaN");
    }
}
