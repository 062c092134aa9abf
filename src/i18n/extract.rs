//! Placeholder value extraction.
//!
//! Re-walks a matched pattern against the text with the same
//! [`ScanCursor`] the matcher uses, so the spans bound here are exactly the
//! spans the matcher skipped: placeholder content starts at the byte that
//! entered the placeholder and ends before the anchor byte reappears.
//! The cursor never splits a character, so every span is a `&str` slice of
//! the input.

use crate::i18n::matcher::{ScanCursor, Step};
use crate::i18n::pattern::{Pattern, Placeholder};
use crate::i18n::transform::Bindings;

/// Bind every placeholder in `pattern` to the text it covers.
///
/// When a name appears more than once, the last occurrence wins. If the
/// text does not match the pattern, only the placeholders reached before
/// the mismatch are bound.
pub fn extract(pattern: &Pattern, text: &str) -> Bindings {
    let mut bindings = Bindings::new();
    let mut cursor = ScanCursor::new(pattern);
    let mut open: Option<(&Placeholder, usize)> = None;

    if cursor.is_complete() {
        return bindings;
    }

    for (offset, &byte) in text.as_bytes().iter().enumerate() {
        match cursor.step(byte) {
            Step::Literal => {
                if let Some((placeholder, start)) = open.take() {
                    bind(&mut bindings, placeholder, &text[start..offset]);
                }
            }
            Step::Entered(placeholder) => {
                // Adjacent placeholders: the previous one ends here.
                if let Some((previous, start)) = open.take() {
                    bind(&mut bindings, previous, &text[start..offset]);
                }
                open = Some((placeholder, offset));
            }
            Step::Skipped => {}
            Step::Died => break,
        }

        if cursor.is_complete() {
            // Only a trailing placeholder can still be open here.
            if let Some((placeholder, start)) = open.take() {
                bind(&mut bindings, placeholder, &text[start..]);
            }
            break;
        }
    }

    bindings
}

fn bind(bindings: &mut Bindings, placeholder: &Placeholder, span: &str) {
    bindings.insert(placeholder.name.clone(), span.to_string());
}
