//! HTML entity decoding for API text fields.

/// Decode the HTML entities the trivia API embeds in question text.
///
/// Covers numeric references and the full HTML5 named entity table; anything
/// unrecognised is left as written.
pub fn decode_html(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_common_entities() {
        assert_eq!(
            decode_html("Which &quot;Star Wars&quot; film isn&#039;t canon?"),
            "Which \"Star Wars\" film isn't canon?"
        );
        assert_eq!(decode_html("Pok&eacute;mon &amp; friends"), "Pokémon & friends");
        assert_eq!(decode_html("&#x27;hex&#x27;"), "'hex'");
    }

    #[test]
    fn test_decode_less_common_named_entities() {
        assert_eq!(decode_html("&iquest;Qu&eacute; es?"), "¿Qué es?");
        assert_eq!(decode_html("&Aring;land"), "Åland");
        assert_eq!(decode_html("5 &times; 3"), "5 × 3");
        assert_eq!(decode_html("&laquo;Hi&raquo;"), "«Hi»");
        assert_eq!(decode_html("na&iuml;ve &aelig;ther"), "naïve æther");
        assert_eq!(decode_html("&lrm;Left"), "\u{200e}Left");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(decode_html("AT&T"), "AT&T");
        assert_eq!(decode_html("a & b; c"), "a & b; c");
        assert_eq!(decode_html("&bogus;"), "&bogus;");
        assert_eq!(decode_html("trailing &"), "trailing &");
    }
}
