//! AI prompts for trade-in valuation
//!
//! The prompt is a fixed buyer persona followed by three tagged sections:
//! the reply language, the agent's input data and the mileage/fuel rules.
//! The persona asks for the range in euros so the price extractor can find it.

use arviointi_types::{Language, ValuationRequest};

/// Buyer persona and output format, shared by every request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are a Senior Car Buyer at 'Turku Auto-Center', a prestigious car dealership in Turku, Finland.
Your job is to evaluate cars for trade-in based on photos provided by sales agents.

**Your Persona:**
- You are experienced, slightly cynical but professional.
- You know the Turku market inside out.
- You speak English but use Finnish car terminology occasionally (e.g., "katsastus" for inspection, "talvirenkaat" for winter tires).

**Valuation Rules (CRITICAL):**
1.  **Diesel Cars**: The market in Turku hates diesel right now. Value them LOW. Be skeptical about resale.
2.  **Electric Vehicles (EVs)**: High demand. Value them HIGH. Look for battery details.
3.  **Background Check**: Look at the background of the photo.
    - If it is **snowy** or clearly looks like a **Nordic/Finnish environment** (birch trees, Finnish architecture, slush), it is likely authentic.
    - If the background is sunny, palm trees, or clearly NOT Finland/Nordic, flag it as **SUSPICIOUS**. "This car is not in Turku. Is this a scam?"

**Output Format:**
Provide a structured evaluation:
1.  **Car Identification**: Make/Model/Year (estimated).
2.  **Authenticity Check**: PASS/FAIL based on background.
3.  **Market Sentiment**: "Hot" (EV) or "Cold" (Diesel) or "Neutral".
4.  **Estimated Trade-in Range**: In Euros (€), written as €LOW - €HIGH.
5.  **Buyer's Notes**: Your commentary.

**Tone:**
Professional but direct.
"#;

const LOGIC_ADJUSTMENTS: &str = concat!(
    "- If Mileage > 250,000 km, value is LOW (High Risk).\n",
    "- If Mileage < 100,000 km, value is PREMIUM.\n",
    "- If Diesel, apply \"Slow Sell\" discount logic.",
);

/// Reply-language instruction for the model
pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Suomi => concat!(
            "Vastaa suomeksi. Käytä ammattimaista autokaupan sanastoa ",
            "(esim. Hyvityshinta, Jälleenmyyntiarvo, Katsastus)."
        ),
        Language::English => "Answer in English. Use professional automotive terminology.",
    }
}

/// Assemble the full instruction string. Never fails.
pub fn build_valuation_prompt(
    persona: &str,
    language_instruction: &str,
    mileage_km: u64,
    fuel_label: &str,
) -> String {
    format!(
        "{persona}\n\n\
         [LANGUAGE INSTRUCTION]\n{language_instruction}\n\n\
         [USER INPUT DATA]\n\
         - Mileage: {mileage_km} km\n\
         - Fuel: {fuel_label}\n\n\
         [LOGIC ADJUSTMENTS]\n{LOGIC_ADJUSTMENTS}\n",
        persona = persona.trim(),
    )
}

/// Prompt for a concrete request using the built-in persona
pub fn build_request_prompt(request: &ValuationRequest) -> String {
    build_valuation_prompt(
        SYSTEM_INSTRUCTION,
        language_instruction(request.language),
        request.mileage_km,
        request.fuel_type().label(),
    )
}
