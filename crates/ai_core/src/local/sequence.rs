//! Reconstruction of the decoded output sequence
//!
//! The runtime returns only the completion. Callers expect what a full
//! decode of the generated sequence yields: the begin marker, the prompt,
//! the completion and, when generation ended on its own, the end marker.

/// Sequence-start token of the checkpoint's tokenizer
pub const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";

/// Sequence-end token of the checkpoint's tokenizer
pub const END_OF_TEXT: &str = "<|end_of_text|>";

/// Build the full decoded sequence
pub(super) fn decode_full_sequence(prompt: &str, completion: &str, stopped: bool) -> String {
    let mut decoded =
        String::with_capacity(BEGIN_OF_TEXT.len() + prompt.len() + completion.len() + END_OF_TEXT.len());
    decoded.push_str(BEGIN_OF_TEXT);
    decoded.push_str(prompt);
    decoded.push_str(completion);
    if stopped {
        decoded.push_str(END_OF_TEXT);
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_stop_appends_end_marker() {
        let decoded = decode_full_sequence("### Response:\n", "Take rest.", true);
        assert_eq!(decoded, "<|begin_of_text|>### Response:\nTake rest.<|end_of_text|>");
    }

    #[test]
    fn budget_exhaustion_has_no_end_marker() {
        let decoded = decode_full_sequence("p", "c", false);
        assert_eq!(decoded, "<|begin_of_text|>pc");
    }
}
