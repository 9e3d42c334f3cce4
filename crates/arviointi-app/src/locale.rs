//! UI strings for each supported language

use arviointi_types::{AnalysisMode, Error, Language};

/// Translation table
#[derive(Debug)]
pub struct Translations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub info_text: &'static str,
    pub api_status_ok: &'static str,
    pub api_status_error: &'static str,
    pub enter_api_key: &'static str,
    pub api_missing_error: &'static str,
    pub vehicle_details: &'static str,
    pub odometer: &'static str,
    pub diesel: &'static str,
    pub ev: &'static str,
    pub valuation_complete: &'static str,
    pub conservative: &'static str,
    pub aggressive: &'static str,
    pub retail: &'static str,
    pub not_available: &'static str,
    pub managers_report: &'static str,
    /// `{}` is replaced with the underlying error text
    pub ai_error: &'static str,
    pub analysis_mode_label: &'static str,
    pub mode_quick: &'static str,
    pub mode_deep: &'static str,
    pub spinner_quick: &'static str,
    pub spinner_deep: &'static str,
}

static SUOMI: Translations = Translations {
    title: "Auton Arviointi",
    subtitle: "Vaihtoauton Arviointityökalu",
    info_text: "Ota kuva autosta saadaksesi välittömän hinta-arvion tekoälyltä.",
    api_status_ok: "🟢 API-avain: Yhdistetty",
    api_status_error: "🔴 Yhteys puuttuu",
    enter_api_key: "Syötä Google API-avain",
    api_missing_error: "⚠️ API-avain puuttuu. Tarkista asetukset.",
    vehicle_details: "Ajoneuvon Tiedot",
    odometer: "Mittarilukema (km)",
    diesel: "Diesel-moottori?",
    ev: "Sähkö / Hybridi?",
    valuation_complete: "Arviointi Valmis",
    conservative: "📉 Varovainen",
    aggressive: "📈 Aggressiivinen",
    retail: "🏷️ Arvioitu Myyntihinta",
    not_available: "N/A",
    managers_report: "📝 Arvioijan Raportti",
    ai_error: "Tekoälyvirhe: {}",
    analysis_mode_label: "Analyysitila",
    mode_quick: "⚡ Nopea Arvio",
    mode_deep: "🧐 Syvällinen Asiantuntija-analyysi",
    spinner_quick: "Skannataan visuaalista dataa...",
    spinner_deep: "Konsultoidaan asiantuntijaa & analysoidaan markkinatilannetta...",
};

static ENGLISH: Translations = Translations {
    title: "Car Evaluation App",
    subtitle: "Trade-in Valuation Tool",
    info_text: "Take a photo of the car to get an instant valuation from our AI Senior Buyer.",
    api_status_ok: "🟢 API Key System: Online",
    api_status_error: "🔴 Connection Missing",
    enter_api_key: "Enter Google API Key",
    api_missing_error: "⚠️ API Key is missing. Please check settings.",
    vehicle_details: "Vehicle Details",
    odometer: "Odometer Reading (km)",
    diesel: "Diesel Engine?",
    ev: "EV / Hybrid?",
    valuation_complete: "Valuation Complete",
    conservative: "📉 Conservative",
    aggressive: "📈 Aggressive",
    retail: "🏷️ Est. Retail",
    not_available: "N/A",
    managers_report: "📝 Manager's Report",
    ai_error: "AI Error: {}",
    analysis_mode_label: "Analysis Mode",
    mode_quick: "⚡ Quick Estimate",
    mode_deep: "🧐 Deep Expert Analysis",
    spinner_quick: "Scanning visual data...",
    spinner_deep: "Consulting Senior Specialist & Analyzing market nuances...",
};

/// Table for a language
pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::Suomi => &SUOMI,
        Language::English => &ENGLISH,
    }
}

impl Translations {
    /// Localized model failure message
    pub fn ai_error(&self, message: &str) -> String {
        self.ai_error.replacen("{}", message, 1)
    }

    pub fn mode_label(&self, mode: AnalysisMode) -> &'static str {
        match mode {
            AnalysisMode::Quick => self.mode_quick,
            AnalysisMode::Deep => self.mode_deep,
        }
    }

    /// Busy text shown while the model runs
    pub fn spinner(&self, mode: AnalysisMode) -> &'static str {
        match mode {
            AnalysisMode::Quick => self.spinner_quick,
            AnalysisMode::Deep => self.spinner_deep,
        }
    }

    /// User-facing text for a failed submission
    pub fn describe_error(&self, err: &Error) -> String {
        match err {
            Error::MissingCredential => self.api_missing_error.to_string(),
            Error::ExternalService(message) => self.ai_error(message),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_error_formatting() {
        let t = translations(Language::English);
        assert_eq!(t.ai_error("quota exceeded"), "AI Error: quota exceeded");
        let t = translations(Language::Suomi);
        assert_eq!(t.ai_error("{}"), "Tekoälyvirhe: {}");
    }

    #[test]
    fn test_describe_missing_credential() {
        let t = translations(Language::Suomi);
        assert_eq!(
            t.describe_error(&Error::MissingCredential),
            "⚠️ API-avain puuttuu. Tarkista asetukset."
        );
        let t = translations(Language::English);
        assert_eq!(
            t.describe_error(&Error::MissingCredential),
            "⚠️ API Key is missing. Please check settings."
        );
    }

    #[test]
    fn test_spinner_and_mode_labels() {
        let t = translations(Language::English);
        assert_eq!(t.spinner(AnalysisMode::Quick), "Scanning visual data...");
        assert_eq!(t.mode_label(AnalysisMode::Deep), "🧐 Deep Expert Analysis");
    }
}
