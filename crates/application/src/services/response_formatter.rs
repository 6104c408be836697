//! Turns raw backend text into displayable HTML fragments
//!
//! Output is not HTML-escaped: whatever markup the model produces is passed
//! through.

use domain::{FormattedDiagnosis, ResponseLayout};

use super::prompt_builder::RESPONSE_MARKER;
use crate::error::ApplicationError;

const BOUNDARY_TOKENS: [&str; 2] = ["<|begin_of_text|>", "<|end_of_text|>"];
const BOLD_MARKER: &str = "**";

/// Stateless formatter for backend output
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format according to the layout the task's backend produces
    pub fn format_for(
        layout: ResponseLayout,
        raw: &str,
    ) -> Result<FormattedDiagnosis, ApplicationError> {
        match layout {
            ResponseLayout::Templated => Self::format(raw),
            ResponseLayout::FreeForm => Self::format_free_form(raw),
        }
    }

    /// Format a templated completion
    ///
    /// Only the text after the first `### Response:` marker (up to a
    /// repeated marker, if any) is kept. Missing marker is a
    /// [`ApplicationError::Format`].
    pub fn format(raw: &str) -> Result<FormattedDiagnosis, ApplicationError> {
        let cleaned = strip_boundary_tokens(raw);
        let body = cleaned
            .split(RESPONSE_MARKER)
            .nth(1)
            .ok_or_else(|| ApplicationError::Format("response marker not found".to_string()))?
            .trim();

        Ok(FormattedDiagnosis::new(render_markup(body)))
    }

    /// Format free-form text that carries no template marker
    ///
    /// Empty output counts as a malformed backend response.
    pub fn format_free_form(raw: &str) -> Result<FormattedDiagnosis, ApplicationError> {
        let cleaned = strip_boundary_tokens(raw);
        if cleaned.is_empty() {
            return Err(ApplicationError::Backend(
                "backend returned an empty response".to_string(),
            ));
        }
        Ok(FormattedDiagnosis::new(render_markup(&cleaned)))
    }
}

/// Remove boundary tokens until none remain
///
/// A single pass is not enough: removing one token can join its neighbours
/// into another.
fn strip_boundary_tokens(raw: &str) -> String {
    let mut text = raw.to_string();
    while BOUNDARY_TOKENS.iter().any(|token| text.contains(token)) {
        for token in BOUNDARY_TOKENS {
            text = text.replace(token, "");
        }
    }
    text.trim().to_string()
}

/// Render markup; collapsing empty `**` pairs can also join a token together
fn render_markup(text: &str) -> String {
    strip_boundary_tokens(&line_breaks(&strong_pairs(text)))
}

/// Convert `**` pairs into `<strong>` elements, left to right
///
/// Pairs enclosing only whitespace are dropped (their content kept) so
/// that runs like `****` never yield empty or nested elements. A trailing
/// unpaired marker stays literal.
fn strong_pairs(text: &str) -> String {
    let parts: Vec<&str> = text.split(BOLD_MARKER).collect();
    let markers = parts.len() - 1;
    let paired = markers - markers % 2;

    let mut out = String::with_capacity(text.len() + markers * 8);
    out.push_str(parts[0]);

    let mut i = 1;
    while i < parts.len() {
        // Marker i-1 has no partner
        if i > paired {
            out.push_str(BOLD_MARKER);
            out.push_str(parts[i]);
            i += 1;
            continue;
        }

        let inner = parts[i];
        if inner.trim().is_empty() {
            out.push_str(inner);
        } else {
            out.push_str("<strong>");
            out.push_str(inner);
            out.push_str("</strong>");
        }
        out.push_str(parts[i + 1]);
        i += 2;
    }
    out
}

fn line_breaks(text: &str) -> String {
    text.replace("\r\n", "<br>").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_templated_completion() {
        let raw = "<|begin_of_text|>Below is an instruction...### Response:\nYou may have a **migraine**.\nRest.<|end_of_text|>";
        let formatted = ResponseFormatter::format(raw).unwrap();
        assert_eq!(
            formatted.as_html(),
            "You may have a <strong>migraine</strong>.<br>Rest."
        );
    }

    #[test]
    fn plain_diagnosis_sequence() {
        let raw = "<|begin_of_text|>### Response:\nTake rest.<|end_of_text|>";
        assert_eq!(ResponseFormatter::format(raw).unwrap().as_html(), "Take rest.");
    }

    #[test]
    fn boundary_tokens_rejoined_by_removal_are_stripped() {
        let raw = "### Response: a <|begin_of<|end_of_text|>_text|> b";
        let html = ResponseFormatter::format(raw).unwrap().as_html().to_string();
        assert_eq!(html, "a  b");
    }

    #[test]
    fn boundary_tokens_rejoined_by_empty_emphasis_are_stripped() {
        let raw = "### Response: a <|begin_of****_text|> b";
        let html = ResponseFormatter::format(raw).unwrap().as_html().to_string();
        assert!(!html.contains("<|begin_of_text|>"));
        assert_eq!(html, "a  b");
    }

    #[test]
    fn missing_marker_is_format_error() {
        let err = ResponseFormatter::format("<|begin_of_text|>Just some text").unwrap_err();
        assert!(matches!(err, ApplicationError::Format(_)));
    }

    #[test]
    fn repeated_marker_keeps_first_section() {
        let raw = "### Response:\nfirst\n### Response:\nsecond";
        assert_eq!(ResponseFormatter::format(raw).unwrap().as_html(), "first");
    }

    #[test]
    fn empty_body_after_marker_is_allowed() {
        let formatted = ResponseFormatter::format("prompt ### Response:   ").unwrap();
        assert_eq!(formatted.as_html(), "");
    }

    #[test]
    fn collapses_empty_pairs() {
        assert_eq!(strong_pairs("a****b"), "ab");
        assert_eq!(strong_pairs("**x****y**"), "<strong>x</strong><strong>y</strong>");
    }

    #[test]
    fn odd_marker_stays_literal() {
        assert_eq!(strong_pairs("**a** and **b"), "<strong>a</strong> and **b");
        assert_eq!(strong_pairs("5 ** 2"), "5 ** 2");
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        assert_eq!(strong_pairs("plain"), "plain");
        assert_eq!(strong_pairs(""), "");
    }

    #[test]
    fn converts_both_newline_styles() {
        assert_eq!(line_breaks("a\r\nb\nc"), "a<br>b<br>c");
    }

    #[test]
    fn no_html_escaping() {
        let formatted = ResponseFormatter::format("### Response: <em>x</em> & y").unwrap();
        assert_eq!(formatted.as_html(), "<em>x</em> & y");
    }

    #[test]
    fn free_form_needs_no_marker() {
        let formatted =
            ResponseFormatter::format_free_form("**Hemoglobin**: 13.5 g/dL\nStatus: Normal\n")
                .unwrap();
        assert_eq!(
            formatted.as_html(),
            "<strong>Hemoglobin</strong>: 13.5 g/dL<br>Status: Normal"
        );
    }

    #[test]
    fn free_form_empty_is_backend_error() {
        let err = ResponseFormatter::format_free_form("  <|end_of_text|> ").unwrap_err();
        assert!(matches!(err, ApplicationError::Backend(_)));
    }

    #[test]
    fn layout_dispatch() {
        assert!(ResponseFormatter::format_for(ResponseLayout::Templated, "no marker").is_err());
        assert!(ResponseFormatter::format_for(ResponseLayout::FreeForm, "no marker").is_ok());
    }

    proptest! {
        #[test]
        fn never_contains_boundary_tokens(body in ".{0,200}") {
            let raw = format!("<|begin_of_text|>### Response:{body}<|end_of_text|>");
            if let Ok(formatted) = ResponseFormatter::format(&raw) {
                prop_assert!(!formatted.as_html().contains("<|begin_of_text|>"));
                prop_assert!(!formatted.as_html().contains("<|end_of_text|>"));
            }
        }

        #[test]
        fn token_fragments_never_reassemble(
            pieces in proptest::collection::vec(
                prop_oneof![
                    Just("<|begin_of"),
                    Just("<|end_of"),
                    Just("_text|>"),
                    Just("<|begin_of_text|>"),
                    Just("<|end_of_text|>"),
                    Just("**"),
                    Just(" x "),
                ],
                0..24,
            )
        ) {
            let raw = format!("### Response:{}", pieces.concat());
            let formatted = ResponseFormatter::format(&raw).unwrap();
            prop_assert!(!formatted.as_html().contains("<|begin_of_text|>"));
            prop_assert!(!formatted.as_html().contains("<|end_of_text|>"));
        }

        #[test]
        fn text_without_marker_always_fails(body in "[a-zA-Z0-9 *\n]{0,200}") {
            prop_assert!(ResponseFormatter::format(&body).is_err());
        }

        #[test]
        fn bold_word_yields_one_pair(word in "[a-zA-Z]{1,20}") {
            let formatted = ResponseFormatter::format(&format!("### Response: **{word}**")).unwrap();
            prop_assert_eq!(formatted.as_html(), format!("<strong>{word}</strong>"));
        }

        #[test]
        fn strong_tags_never_nest_or_repeat(text in "[a-z *]{0,80}") {
            let out = strong_pairs(&text);
            prop_assert!(!out.contains("<strong><strong>"));
            prop_assert!(!out.contains("</strong></strong>"));
            prop_assert!(!out.contains("<strong></strong>"));
            prop_assert_eq!(out.matches("<strong>").count(), out.matches("</strong>").count());
        }
    }
}
