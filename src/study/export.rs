use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::Result;
use crate::trial::FrozenTrial;

use super::Study;

impl Study {
    /// Fetch all trials and write them to `writer` in CSV format.
    ///
    /// Columns: `number`, `value`, `state`, `datetime_start`,
    /// `datetime_complete`, then one column per parameter name (sorted).
    /// Non-complete trials have an empty `value` cell; parameters a trial
    /// did not sample are left empty.
    ///
    /// # Errors
    ///
    /// Returns the error of [`trials`](Self::trials), or
    /// [`Error::Io`](crate::Error::Io) if writing fails.
    pub fn to_csv(&self, writer: impl std::io::Write) -> Result<()> {
        write_csv(&self.trials()?, writer)
    }
}

pub(crate) fn write_csv(trials: &[FrozenTrial], mut writer: impl std::io::Write) -> Result<()> {
    let param_names: BTreeSet<&str> = trials
        .iter()
        .flat_map(|t| t.params().keys().map(String::as_str))
        .collect();

    write!(writer, "number,value,state,datetime_start,datetime_complete")?;
    for name in &param_names {
        write!(writer, ",{}", csv_escape(name))?;
    }
    writeln!(writer)?;

    for trial in trials {
        write!(writer, "{}", trial.number())?;
        if trial.is_complete() {
            write!(writer, ",{}", trial.value())?;
        } else {
            write!(writer, ",")?;
        }
        write!(
            writer,
            ",{},{},{}",
            csv_escape(trial.state().as_str()),
            csv_escape(trial.datetime_start().unwrap_or_default()),
            csv_escape(trial.datetime_complete().unwrap_or_default()),
        )?;

        for name in &param_names {
            match trial.params().get(*name) {
                Some(Value::String(s)) => write!(writer, ",{}", csv_escape(s))?,
                Some(Value::Null) | None => write!(writer, ",")?,
                Some(other) => write!(writer, ",{}", csv_escape(&other.to_string()))?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Quote a CSV field if it contains a comma, quote, or line break.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}
