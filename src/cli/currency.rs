use crate::error::Result;
use crate::fmt::money;
use crate::settings::{load_settings, normalize_currency, save_settings};

pub fn run(code: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    match code {
        None => println!("Currency: {} (e.g. {})", settings.currency, money(1234567.0, &settings.currency)),
        Some(code) => {
            settings.currency = normalize_currency(code)?;
            save_settings(&settings)?;
            println!("Currency set to {}", settings.currency);
        }
    }
    Ok(())
}
