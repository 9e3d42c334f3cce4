//! Output formatting module

use arviointi_app::locale::Translations;
use arviointi_types::{OutputFormat, Result, ValuationReport};
use std::fmt::Write;

pub fn output_report(output_format: OutputFormat, t: &Translations, report: &ValuationReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(report)?;
        println!("{}", content);
    } else {
        print!("{}", render_table(t, report));
    }

    Ok(())
}

/// Banner, price tiles (only when a range was found) and the full report
pub fn render_table(t: &Translations, report: &ValuationReport) -> String {
    let response = &report.response;
    let mut out = String::new();

    let _ = writeln!(out, "\n✅ {}", t.valuation_complete);

    if let (Some(low), Some(high)) = (&response.low_bid, &response.high_bid) {
        let retail = response
            .retail_estimate
            .map(|r| format!("~€{}", r))
            .unwrap_or_else(|| t.not_available.to_string());

        let _ = writeln!(out);
        let _ = writeln!(out, "{}: €{}", t.conservative, low);
        let _ = writeln!(out, "{}: €{}", t.aggressive, high);
        let _ = writeln!(out, "{}: {}", t.retail, retail);
    }

    let _ = writeln!(out, "\n---");
    let _ = writeln!(out, "### {}\n", t.managers_report);
    let _ = writeln!(out, "{}", response.raw_text.trim_end());

    out
}

/// App header shown by `status`
pub fn render_header(t: &Translations) -> String {
    format!("🚗 {}\n### {}\n\n{}\n", t.title, t.subtitle, t.info_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arviointi_app::locale::translations;
    use arviointi_types::{AnalysisMode, FuelType, Language, ValuationResponse};

    fn report(response: ValuationResponse) -> ValuationReport {
        ValuationReport {
            language: Language::English,
            mode: AnalysisMode::Quick,
            model: "gemini-2.0-flash-exp".to_string(),
            mileage_km: 150_000,
            fuel: FuelType::Petrol,
            generated_at: chrono::Utc::now(),
            response,
        }
    }

    #[test]
    fn test_table_with_tiles() {
        let t = translations(Language::English);
        let out = render_table(
            t,
            &report(ValuationResponse {
                raw_text: "Estimated Trade-in Range: €3500 - €5200".to_string(),
                low_bid: Some("3500".to_string()),
                high_bid: Some("5200".to_string()),
                retail_estimate: Some(6760),
            }),
        );
        assert!(out.contains("📉 Conservative: €3500"));
        assert!(out.contains("📈 Aggressive: €5200"));
        assert!(out.contains("🏷️ Est. Retail: ~€6760"));
        assert!(out.contains("### 📝 Manager's Report"));
        assert!(out.contains("Estimated Trade-in Range: €3500 - €5200"));
    }

    #[test]
    fn test_table_without_range_has_no_tiles() {
        let t = translations(Language::English);
        let out = render_table(
            t,
            &report(ValuationResponse {
                raw_text: "Photo too blurry.".to_string(),
                ..Default::default()
            }),
        );
        assert!(!out.contains(t.conservative));
        assert!(!out.contains(t.aggressive));
        assert!(!out.contains(t.retail));
        assert!(out.contains("Photo too blurry."));
    }

    #[test]
    fn test_table_retail_not_available() {
        let t = translations(Language::Suomi);
        let out = render_table(
            t,
            &report(ValuationResponse {
                raw_text: "€1,000 - €.".to_string(),
                low_bid: Some("1,000".to_string()),
                high_bid: Some(".".to_string()),
                retail_estimate: None,
            }),
        );
        assert!(out.contains("🏷️ Arvioitu Myyntihinta: N/A"));
        assert!(out.contains("### 📝 Arvioijan Raportti"));
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(report(ValuationResponse {
            raw_text: "x".to_string(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(json["fuel"], "Petrol");
        assert_eq!(json["mode"], "quick");
        assert_eq!(json["mileageKm"], 150_000);
        assert!(json["response"]["lowBid"].is_null());
    }
}
