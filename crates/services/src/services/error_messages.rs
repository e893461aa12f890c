//! Translation of raw error text into Dutch user-facing messages.
//!
//! Matching is a case-insensitive substring scan over a fixed table;
//! the first matching pattern wins and anything unmatched falls back to
//! a generic message. Errors are display input here, never control
//! flow, so translation itself can never fail.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

struct ErrorTranslation {
    pattern: Regex,
    message: &'static str,
    action: Option<&'static str>,
}

macro_rules! translation {
    ($pattern:expr, $message:expr) => {
        ErrorTranslation {
            pattern: Regex::new(&format!("(?i){}", $pattern)).unwrap(),
            message: $message,
            action: None,
        }
    };
    ($pattern:expr, $message:expr, $action:expr) => {
        ErrorTranslation {
            pattern: Regex::new(&format!("(?i){}", $pattern)).unwrap(),
            message: $message,
            action: Some($action),
        }
    };
}

lazy_static! {
    static ref ERROR_TRANSLATIONS: Vec<ErrorTranslation> = vec![
        // Authentication
        translation!(
            r"invalid.*credentials|authentication.*failed|invalid.*login",
            "Ongeldige inloggegevens",
            "Controleer uw e-mailadres en wachtwoord"
        ),
        translation!(
            r"user.*not.*found|no.*user",
            "Gebruiker niet gevonden",
            "Controleer of u het juiste e-mailadres gebruikt"
        ),
        translation!(
            r"account.*locked|too.*many.*attempts",
            "Account tijdelijk geblokkeerd",
            "Probeer het over 15 minuten opnieuw"
        ),
        // Permissions
        translation!(
            r"permission.*denied|forbidden|unauthorized|not.*authorized",
            "Geen toegang",
            "U heeft geen rechten voor deze actie"
        ),
        translation!(
            r"insufficient.*privileges|access.*denied",
            "Onvoldoende rechten",
            "Neem contact op met de beheerder"
        ),
        // Network
        translation!(
            r"network.*error|connection.*failed|fetch.*failed",
            "Verbindingsprobleem",
            "Controleer uw internetverbinding"
        ),
        translation!(
            r"timeout|timed.*out",
            "Verzoek verlopen",
            "De server reageert niet, probeer het later opnieuw"
        ),
        translation!(
            r"offline|no.*connection",
            "Geen internetverbinding",
            "Controleer uw netwerkverbinding"
        ),
        // Validation
        translation!(
            r"validation.*failed|invalid.*data|invalid.*input",
            "Ongeldige gegevens",
            "Controleer de ingevoerde informatie"
        ),
        translation!(
            r"required.*field|missing.*field",
            "Verplicht veld ontbreekt",
            "Vul alle verplichte velden in"
        ),
        translation!(
            r"invalid.*email",
            "Ongeldig e-mailadres",
            "Voer een geldig e-mailadres in"
        ),
        // Database
        translation!(
            r"duplicate.*entry|already.*exists|unique.*constraint",
            "Item bestaat al",
            "Gebruik een andere naam of waarde"
        ),
        translation!(
            r"foreign.*key|constraint.*violation|reference.*constraint",
            "Kan niet verwijderen",
            "Dit item wordt nog gebruikt door andere gegevens"
        ),
        translation!(
            r"database.*error|sql.*error",
            "Database fout",
            "Er is een technisch probleem, probeer het later opnieuw"
        ),
        // Files and uploads
        translation!(
            r"file.*too.*large|size.*limit",
            "Bestand te groot",
            "Maximum bestandsgrootte is 10MB"
        ),
        translation!(
            r"unsupported.*file|invalid.*file.*type",
            "Bestandstype niet ondersteund",
            "Gebruik JPG, PNG of GIF bestanden"
        ),
        translation!(
            r"upload.*failed",
            "Upload mislukt",
            "Probeer het bestand opnieuw te uploaden"
        ),
        // Sessions
        translation!(
            r"session.*expired|token.*expired",
            "Sessie verlopen",
            "Log opnieuw in om door te gaan"
        ),
        translation!(
            r"invalid.*token|token.*invalid",
            "Ongeldige sessie",
            "Log opnieuw in"
        ),
        // Rate limiting
        translation!(
            r"rate.*limit|too.*many.*requests",
            "Te veel verzoeken",
            "Wacht even voordat u het opnieuw probeert"
        ),
    ];
    static ref RETRYABLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)network").unwrap(),
        Regex::new(r"(?i)timeout").unwrap(),
        Regex::new(r"(?i)connection").unwrap(),
        Regex::new(r"(?i)fetch").unwrap(),
        Regex::new(r"(?i)rate.*limit").unwrap(),
        Regex::new(r"(?i)too.*many.*requests").unwrap(),
    ];
}

/// A translated error: the headline plus an optional suggested action.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct FriendlyError {
    pub message: String,
    pub action: Option<String>,
}

/// Translate raw error text to a Dutch message. Unmatched text gets the
/// generic fallback.
pub fn translate_error(raw: &str) -> FriendlyError {
    for translation in ERROR_TRANSLATIONS.iter() {
        if translation.pattern.is_match(raw) {
            return FriendlyError {
                message: translation.message.to_string(),
                action: translation.action.map(str::to_string),
            };
        }
    }
    FriendlyError {
        message: "Er is een onverwachte fout opgetreden".to_string(),
        action: Some("Probeer het opnieuw of neem contact op met support".to_string()),
    }
}

/// Single-line form for display: "message. action".
pub fn format_error_for_display(raw: &str) -> String {
    let friendly = translate_error(raw);
    match friendly.action {
        Some(action) => format!("{}. {}", friendly.message, action),
        None => friendly.message,
    }
}

/// Whether the error looks transient enough that retrying makes sense.
pub fn is_retryable_error(raw: &str) -> bool {
    RETRYABLE_PATTERNS.iter().any(|p| p.is_match(raw))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

pub fn error_severity(raw: &str) -> ErrorSeverity {
    lazy_static! {
        static ref CRITICAL: Regex = Regex::new(r"(?i)data.*loss|corruption|critical").unwrap();
        static ref WARNING: Regex = Regex::new(r"(?i)expired|timeout|rate.*limit").unwrap();
        static ref INFO: Regex = Regex::new(r"(?i)offline|maintenance").unwrap();
    }
    if CRITICAL.is_match(raw) {
        ErrorSeverity::Critical
    } else if WARNING.is_match(raw) {
        ErrorSeverity::Warning
    } else if INFO.is_match(raw) {
        ErrorSeverity::Info
    } else {
        ErrorSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key() {
        let friendly = translate_error("UNIQUE constraint failed: plant_beds.letter_code");
        assert_eq!(friendly.message, "Item bestaat al");
    }

    #[test]
    fn test_foreign_key() {
        let friendly = translate_error("FOREIGN KEY constraint failed");
        assert_eq!(friendly.message, "Kan niet verwijderen");
    }

    #[test]
    fn test_case_insensitive() {
        for raw in ["Network error", "NETWORK ERROR", "network error"] {
            assert_eq!(translate_error(raw).message, "Verbindingsprobleem");
        }
    }

    #[test]
    fn test_file_and_token_errors() {
        assert_eq!(translate_error("file too large").message, "Bestand te groot");
        assert_eq!(
            translate_error("unsupported file format").message,
            "Bestandstype niet ondersteund"
        );
        assert_eq!(translate_error("Upload failed").message, "Upload mislukt");
        assert_eq!(translate_error("invalid token").message, "Ongeldige sessie");
    }

    #[test]
    fn test_fallback() {
        let friendly = translate_error("something nobody anticipated");
        assert_eq!(friendly.message, "Er is een onverwachte fout opgetreden");
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(
            format_error_for_display("request timed out"),
            "Verzoek verlopen. De server reageert niet, probeer het later opnieuw"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(is_retryable_error("connection refused"));
        assert!(is_retryable_error("Timeout waiting for response"));
        assert!(!is_retryable_error("validation failed"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(error_severity("possible data loss"), ErrorSeverity::Critical);
        assert_eq!(error_severity("session expired"), ErrorSeverity::Warning);
        assert_eq!(error_severity("you appear to be offline"), ErrorSeverity::Info);
        assert_eq!(error_severity("whatever"), ErrorSeverity::Error);
    }
}
