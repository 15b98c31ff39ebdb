//! Public playback page for a single advertisement.
//!
//! The page moves through `Loading -> Found | NotFound` exactly once. Screen
//! status is not consulted here; gating happens only at preview time.

use crate::advertisement::Advertisement;

/// Text shown when the requested advertisement does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Ad not found.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Playback {
    Loading { ad_id: String },
    Found(Advertisement),
    NotFound { ad_id: String },
}

impl Playback {
    pub fn new(ad_id: impl Into<String>) -> Self {
        Self::Loading {
            ad_id: ad_id.into(),
        }
    }

    /// Settle a loading page with the lookup result.
    ///
    /// Terminal states are returned unchanged; there is no way back to `Loading`.
    pub fn resolve(self, lookup: Option<Advertisement>) -> Self {
        match self {
            Self::Loading { ad_id } => match lookup {
                Some(ad) if ad.id == ad_id => Self::Found(ad),
                _ => Self::NotFound { ad_id },
            },
            settled => settled,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Render the page as a standalone HTML document.
    pub fn render_html(&self) -> String {
        let (title, body) = match self {
            Self::Loading { .. } => (
                "Loading".to_string(),
                r#"<p class="status">Loading...</p>"#.to_string(),
            ),
            Self::Found(ad) => (
                escape_html(&ad.title),
                format!(
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(&ad.image_url),
                    escape_html(&ad.title)
                ),
            ),
            Self::NotFound { .. } => (
                "Not found".to_string(),
                format!(r#"<p class="status">{NOT_FOUND_MESSAGE}</p>"#),
            ),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
html, body {{ margin: 0; padding: 0; width: 100%; height: 100%; background: #000; overflow: hidden; }}
body {{ display: flex; align-items: center; justify-content: center; }}
img {{ width: 100vw; height: 100vh; object-fit: contain; }}
.status {{ color: #fff; font-family: sans-serif; font-size: 1.5rem; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
