//! Decompose command - break a time value into calendar fields.

use anyhow::Result;
use clap::Args;
use otter_date_intrinsics::GlobalData;
use otter_datemath::format::INVALID_DATE;

#[derive(Args)]
pub struct DecomposeCommand {
    /// Milliseconds since the epoch
    #[arg(allow_hyphen_values = true)]
    pub ms: f64,

    /// Break down in UTC instead of local time
    #[arg(long)]
    pub utc: bool,
}

impl DecomposeCommand {
    pub fn execute(&self, global: &GlobalData) -> Result<String> {
        let t = global.date_math().ms_to_gregorian_date_time(self.ms, self.utc);
        if !t.is_valid() {
            return Ok(INVALID_DATE.to_string());
        }

        let mut lines = vec![
            format!("year       {}", t.full_year()),
            format!("month      {}", t.month),
            format!("month_day  {}", t.month_day),
            format!("hour       {}", t.hour),
            format!("minute     {}", t.minute),
            format!("second     {}", t.second),
            format!("week_day   {}", t.week_day),
            format!("year_day   {}", t.year_day),
            format!("utc_offset {}", t.utc_offset),
            format!("is_dst     {}", t.is_dst),
        ];
        if let Some(zone) = &t.time_zone {
            lines.push(format!("time_zone  {zone}"));
        }
        Ok(lines.join("\n"))
    }
}
