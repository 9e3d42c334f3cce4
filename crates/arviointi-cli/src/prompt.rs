//! Terminal input: masked API key and vehicle details

use arviointi_app::credentials::KeyPrompt;
use arviointi_app::locale::Translations;
use arviointi_app::session::VehicleDetails;
use console::Term;
use std::io::IsTerminal;

/// Whether both ends of the conversation are a terminal
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && Term::stderr().is_term()
}

/// Masked key entry
pub struct TerminalKeyPrompt {
    label: &'static str,
}

impl TerminalKeyPrompt {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl KeyPrompt for TerminalKeyPrompt {
    fn ask(&self) -> Option<String> {
        let term = Term::stderr();
        term.write_str(&format!("{}: ", self.label)).ok()?;
        term.read_secure_line().ok()
    }
}

/// Ask for mileage and fuel flags. Flags already given become the defaults.
pub fn ask_vehicle_details(
    t: &Translations,
    default_mileage_km: u64,
    is_diesel: bool,
    is_ev: bool,
) -> std::io::Result<VehicleDetails> {
    let term = Term::stderr();
    term.write_line("")?;
    term.write_line(t.vehicle_details)?;

    let mileage_km = loop {
        term.write_str(&format!("{} [{}]: ", t.odometer, default_mileage_km))?;
        if let Some(km) = parse_mileage(&term.read_line()?, default_mileage_km) {
            break km;
        }
    };

    let is_diesel = ask_yes_no(&term, t.diesel, is_diesel)?;
    let is_ev = ask_yes_no(&term, t.ev, is_ev)?;

    Ok(VehicleDetails {
        mileage_km,
        is_diesel,
        is_ev,
    })
}

fn ask_yes_no(term: &Term, label: &str, default: bool) -> std::io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    term.write_str(&format!("{} {} ", label, hint))?;
    Ok(parse_yes_no(&term.read_line()?, default))
}

/// Empty input keeps the default; anything else must be a whole number
fn parse_mileage(input: &str, default: u64) -> Option<u64> {
    let input = input.trim().replace([' ', '_'], "");
    if input.is_empty() {
        return Some(default);
    }
    input.parse().ok()
}

/// Accepts Finnish and English answers
fn parse_yes_no(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "k" | "kyllä" | "y" | "yes" => true,
        "e" | "ei" | "n" | "no" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mileage() {
        assert_eq!(parse_mileage("", 150_000), Some(150_000));
        assert_eq!(parse_mileage("  85000 ", 150_000), Some(85_000));
        assert_eq!(parse_mileage("120 000", 150_000), Some(120_000));
        assert_eq!(parse_mileage("-5", 150_000), None);
        assert_eq!(parse_mileage("lots", 150_000), None);
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("k", false));
        assert!(parse_yes_no("Yes", false));
        assert!(!parse_yes_no("ei", true));
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("maybe", false));
    }
}
