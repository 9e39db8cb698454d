//! Prompt templates for the four legal tasks.
//!
//! Pure functions: no I/O, and the only failure is a blank required input.

use crate::api_types::NdaRequest;
use crate::error::ContextorError;

/// Default system instruction sent with every completion.
pub const DEFAULT_SYSTEM: &str = "You are a helpful legal assistant.";

/// Characters of source text kept by [`summary_prompt`].
pub const SUMMARY_MAX_CHARS: usize = 2000;

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ContextorError> {
    if value.trim().is_empty() {
        Err(ContextorError::MissingField(name))
    } else {
        Ok(value)
    }
}

/// NDA drafting prompt.
///
/// # Errors
/// [`ContextorError::MissingField`] naming the first blank field, checked in
/// the order discloser, receiver, purpose, duration.
///
/// # Example
/// ```
/// use contextor::{NdaRequest, prompt::nda_prompt};
/// let p = nda_prompt(&NdaRequest {
///     discloser: "Acme".into(),
///     receiver: "Beta".into(),
///     purpose: "Evaluation".into(),
///     duration: "2 years".into(),
/// })
/// .unwrap();
/// assert!(p.contains("- Receiver: Beta"));
/// ```
pub fn nda_prompt(req: &NdaRequest) -> Result<String, ContextorError> {
    let discloser = required("discloser", &req.discloser)?;
    let receiver = required("receiver", &req.receiver)?;
    let purpose = required("purpose", &req.purpose)?;
    let duration = required("duration", &req.duration)?;

    Ok(format!(
        "Draft a simple Non-Disclosure Agreement (NDA) between:\n\
         - Discloser: {discloser}\n\
         - Receiver: {receiver}\n\
         - Purpose: {purpose}\n\
         - Duration: {duration}\n\
         Use plain English and proper formatting.\n"
    ))
}

/// Summary prompt over the first [`SUMMARY_MAX_CHARS`] characters of `text`.
pub fn summary_prompt(text: &str) -> String {
    let head: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("Summarize the following contract in 5-7 bullet points with headings:\n\n{head}\n")
}

/// Clause explanation prompt; the clause is embedded verbatim.
pub fn clause_prompt(clause: &str) -> Result<String, ContextorError> {
    let clause = required("clause", clause)?;
    Ok(format!(
        "Explain the following legal clause in simple terms:\n\n{clause}"
    ))
}

/// Question-answering prompt: context chunks separated by a blank line, then the question.
pub fn qna_prompt<S: AsRef<str>>(question: &str, chunks: &[S]) -> Result<String, ContextorError> {
    let question = required("question", question)?;
    let context = chunks
        .iter()
        .map(|c| c.as_ref().trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!(
        "Answer the question using only the contract context below. \
         If the context does not contain the answer, say so.\n\n\
         Context:\n{context}\n\n\
         Question: {}",
        question.trim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nda() -> NdaRequest {
        NdaRequest {
            discloser: "Acme".into(),
            receiver: "Beta".into(),
            purpose: "Evaluation".into(),
            duration: "2 years".into(),
        }
    }

    #[test]
    fn nda_contains_all_fields() {
        let p = nda_prompt(&nda()).unwrap();
        for v in ["Acme", "Beta", "Evaluation", "2 years"] {
            assert!(p.contains(v), "missing {v}");
        }
    }

    #[test]
    fn nda_reports_first_blank_field() {
        let mut req = nda();
        req.receiver = String::new();
        req.duration = "  ".into();
        assert!(matches!(
            nda_prompt(&req),
            Err(ContextorError::MissingField("receiver"))
        ));

        let mut req = nda();
        req.discloser = "\t".into();
        assert!(matches!(
            nda_prompt(&req),
            Err(ContextorError::MissingField("discloser"))
        ));
    }

    #[test]
    fn summary_keeps_exactly_2000_chars() {
        let text: String = std::iter::repeat_n('é', 3000).collect();
        let p = summary_prompt(&text);
        assert_eq!(p.chars().filter(|c| *c == 'é').count(), SUMMARY_MAX_CHARS);

        let short = summary_prompt("Short contract.");
        assert!(short.contains("Short contract."));
    }

    #[test]
    fn clause_is_verbatim() {
        let clause = "x".repeat(5000);
        assert!(clause_prompt(&clause).unwrap().ends_with(&clause));
        assert!(matches!(
            clause_prompt(""),
            Err(ContextorError::MissingField("clause"))
        ));
    }

    #[test]
    fn qna_joins_context_with_blank_lines() {
        let p = qna_prompt("How long is the term?", &["The term is 12 months.", "Signed."]).unwrap();
        assert!(p.contains("Context:\nThe term is 12 months.\n\nSigned.\n\nQuestion: How long is the term?"));
        assert!(matches!(
            qna_prompt(" ", &["a"]),
            Err(ContextorError::MissingField("question"))
        ));
    }
}
