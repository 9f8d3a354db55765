use serde::Serialize;

use crate::delivery::DeliveryArtifact;

pub const PNG_MIME_TYPE: &str = "image/png";

/// One typed content item of the uniform response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Text {
        text: String,
    },
}

/// The uniform response envelope consumed by the caller: an ordered list of
/// content items. Every operation in this crate produces exactly one item;
/// the structure allows more.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResponse {
    pub content: Vec<ContentItem>,
}

/// Wrap raw text output (vector markup or an echoed spec).
pub fn encode_text(text: String) -> ChartResponse {
    ChartResponse {
        content: vec![ContentItem::Text { text }],
    }
}

/// Wrap a resolved delivery artifact.
///
/// Hosted URLs become embeddable markup rather than a bare URL, so
/// downstream consumers render both delivery modes uniformly.
pub fn encode_artifact(artifact: DeliveryArtifact) -> ChartResponse {
    match artifact {
        DeliveryArtifact::Inline { base64 } => ChartResponse {
            content: vec![ContentItem::Image {
                data: base64,
                mime_type: PNG_MIME_TYPE.to_string(),
            }],
        },
        DeliveryArtifact::Hosted { url } => encode_text(hosted_markup(&url)),
    }
}

fn hosted_markup(url: &str) -> String {
    format!(
        r#"<img src="{}" alt="Generated Chart" style="max-width: 100%; height: auto;" />"#,
        url
    )
}
