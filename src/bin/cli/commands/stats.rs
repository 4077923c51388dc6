use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "phrases": app.store.len(),
                "memoryFile": app.config.memory_file,
                "message": app.store.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            println!("{}", app.store.stats());
        }
    }

    Ok(())
}
