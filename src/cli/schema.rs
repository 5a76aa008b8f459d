use crate::config::Config;
use schemars::schema_for;
use std::io::Write;

/// Print the JSON Schema of `persona-reflect.yaml`
pub fn execute() -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &schema)?;
    writeln!(stdout)?;
    Ok(())
}
