use std::path::PathBuf;

use sheetloc::{Localizer, LocalizationConfig, config::load_configs};

/// Options shared by every command that reads the configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: PathBuf,
    pub product: Option<String>,
}

impl RunOptions {
    pub fn load(&self) -> Result<Vec<LocalizationConfig>, String> {
        load_configs(&self.config, self.product.as_deref())
            .map_err(|e| format!("{}: {}", self.config.display(), e))
    }
}

pub fn run_localize_command(opts: &RunOptions) -> Result<(), String> {
    let localizer = Localizer::new();
    for config in opts.load()? {
        let paths = localizer.localize(&config).map_err(|e| e.to_string())?;
        for path in paths {
            println!("✅ Wrote {}", path.display());
        }
    }
    Ok(())
}

/// Checks every configuration, so that all drift is reported in one run.
pub fn run_check_command(opts: &RunOptions) -> Result<(), String> {
    let localizer = Localizer::new();
    let mut failures = Vec::new();
    for config in opts.load()? {
        match localizer.check(&config) {
            Ok(()) => println!(
                "✅ {} is up-to-date",
                config.localization_path.display()
            ),
            Err(e) => failures.push(e.to_string()),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n"))
    }
}
