use serde::{Deserialize, Serialize};

use crate::model::TextElement;

/// A raw text run as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    #[serde(alias = "str")]
    pub text: String,
    pub transform: [f64; 6],
    pub width: f64,
    /// Reported glyph height. Exaggerated upstream, so never used for layout.
    #[serde(default)]
    pub height: f64,
}

/// Map raw text runs to positioned text elements.
///
/// The element height is the length of the run's vertical basis vector
/// (`transform[2]`, `transform[3]`); the reported height is ignored.
pub fn position_text(items: &[TextItem]) -> Vec<TextElement> {
    items
        .iter()
        .map(|item| {
            let [_, _, c, d, e, f] = item.transform;
            TextElement {
                text: item.text.clone(),
                x: e,
                y: f,
                width: item.width,
                height: (c * c + d * d).sqrt(),
            }
        })
        .collect()
}
