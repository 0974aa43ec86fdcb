use sheetloc::{Localizer, Platform, SheetSource, open_source};

use crate::localize::RunOptions;

#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub run: RunOptions,
    pub language: String,
    pub platform: Platform,
    pub json: bool,
}

/// Print the classified values of one language.
///
/// With several products configured, the first one (or `--product`) is shown.
pub fn run_show_command(opts: &ShowOptions) -> Result<(), String> {
    let configs = opts.run.load()?;
    let config = configs
        .first()
        .ok_or_else(|| "No configuration found".to_string())?;

    if !config.language_titles.contains(&opts.language) {
        return Err(format!(
            "Language '{}' is not one of language_titles [{}]",
            opts.language,
            config.language_titles.join(", ")
        ));
    }

    let document = open_source(&config.sheet)
        .and_then(|source| source.fetch())
        .map_err(|e| e.to_string())?;
    let localizer = Localizer::new();
    let sheet = localizer
        .parse_sheet(&document, config)
        .map_err(|e| e.to_string())?;
    let values = localizer
        .transformer()
        .project(&opts.language, &sheet, opts.platform)
        .map_err(|e| e.to_string())?;

    if opts.json {
        let json = serde_json::to_string_pretty(&values).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "=== {} values for '{}' ({}) ===",
        opts.platform,
        opts.language,
        values.len()
    );
    for value in &values {
        if let Some(comment) = value.comment() {
            println!("  # {}", comment);
        }
        println!("  [{}] {}", value.kind(), value);
    }
    Ok(())
}
