use colored::Colorize;

use crate::converter::convert;
use crate::error::Result;
use crate::settings::{expand_path, load_settings, save_settings};

use super::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config_file {
        Some(path) => {
            if cli.setting_flags_given {
                log::warn!("config file given, ignoring column and format options");
            }
            load_settings(&expand_path(path))?
        }
        None => cli.flag_settings(),
    };

    if let Some(path) = &cli.write_config {
        let path = expand_path(path);
        save_settings(&settings, &path)?;
        println!("Config saved to {}", path.display());
    }

    let summary = convert(
        &expand_path(&cli.csv_file),
        &expand_path(&cli.qif_file),
        Some(&settings),
    )?;

    println!(
        "{} records written, {} rows skipped (no data)",
        summary.records.to_string().green(),
        summary.empty_rows
    );
    if summary.date_warnings > 0 {
        println!(
            "{}",
            format!("{} dates kept as-is (unparseable)", summary.date_warnings).yellow()
        );
    }
    Ok(())
}
