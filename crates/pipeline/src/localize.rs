//! Localized default phrases for replies and hints
//!
//! Only the fixed defaults used by the consistency policy and fallback
//! composition live here; free-text replies come from the language model.

/// Locale-keyed fixed phrases
#[derive(Debug, Clone, Default)]
pub struct Localizer;

impl Localizer {
	fn language(locale: &str) -> &str {
		locale.split(['-', '_']).next().unwrap_or("en")
	}

	/// Default reply used when generated text contradicts found products
	pub fn default_reply(&self, locale: &str) -> String {
		match Self::language(locale) {
			"es" => "Estos son algunos productos que coinciden con tu búsqueda.",
			"de" => "Hier sind einige Produkte, die zu Ihrer Anfrage passen.",
			_ => "Here are some products that match your request.",
		}
		.to_string()
	}

	/// Default call-to-action hint
	pub fn default_call_to_action(&self, locale: &str) -> String {
		match Self::language(locale) {
			"es" => "¿Quieres más detalles sobre alguno de estos?",
			"de" => "Möchten Sie mehr Details zu einem dieser Produkte?",
			_ => "Would you like more details on any of these?",
		}
		.to_string()
	}

	/// Reply used when retrieval found nothing at all
	pub fn no_results_reply(&self, locale: &str) -> String {
		match Self::language(locale) {
			"es" => "No encontré resultados para eso. ¿Puedes darme más detalles?",
			"de" => "Dazu habe ich nichts gefunden. Können Sie mehr Details nennen?",
			_ => "I couldn't find anything for that. Could you give me a bit more detail?",
		}
		.to_string()
	}

	/// Softer reply used when only below-threshold fallback products were
	/// surfaced
	pub fn fallback_reply(&self, locale: &str) -> String {
		match Self::language(locale) {
			"es" => "Estas son las opciones más cercanas que encontré.",
			"de" => "Das sind die ähnlichsten Optionen, die ich gefunden habe.",
			_ => "These are the closest options I could find.",
		}
		.to_string()
	}

	/// Generic error reply for unusable input
	pub fn error_reply(&self, locale: &str) -> String {
		match Self::language(locale) {
			"es" => "No pude procesar ese mensaje. Inténtalo de nuevo.",
			"de" => "Diese Nachricht konnte nicht verarbeitet werden. Bitte erneut versuchen.",
			_ => "I couldn't process that message. Please try again.",
		}
		.to_string()
	}
}
