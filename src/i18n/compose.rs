//! Fill a rendering's placeholders from extracted bindings.

use crate::i18n::pattern::{Pattern, Segment};
use crate::i18n::transform::Bindings;

/// Compose the final message from a rendering and its bindings.
///
/// Literal text is copied verbatim. A placeholder whose name has no binding
/// is replaced by an empty string.
pub fn compose(rendering: &Pattern, bindings: &Bindings) -> String {
    let mut output = String::with_capacity(rendering.len());

    for segment in rendering.segments() {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder(name) => {
                if let Some(value) = bindings.get(name) {
                    output.push_str(value);
                }
            }
        }
    }

    output
}
