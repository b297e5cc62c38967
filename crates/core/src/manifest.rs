//! PWA web-app manifest model.

use serde::{Deserialize, Serialize};

/// Icon sizes a browser expects an installable app to advertise.
/// Both entries point at the same uploaded icon; no resizing happens.
const ICON_SIZES: [&str; 2] = ["192x192", "512x512"];

/// A web-app manifest with the fixed template fields pwapack produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

/// One entry of the manifest's icon list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl WebManifest {
    /// Build the fixed-template manifest referencing `icon_src`.
    ///
    /// Pure and infallible; the caller is responsible for serializing and
    /// writing the result.
    pub fn for_icon(icon_src: &str) -> Self {
        Self {
            name: "My PWA".to_string(),
            short_name: "PWA".to_string(),
            start_url: "./index.html".to_string(),
            display: "standalone".to_string(),
            background_color: "#ffffff".to_string(),
            theme_color: "#000000".to_string(),
            icons: ICON_SIZES
                .iter()
                .map(|sizes| ManifestIcon {
                    src: icon_src.to_string(),
                    sizes: sizes.to_string(),
                    mime_type: "image/png".to_string(),
                })
                .collect(),
        }
    }

    /// Serialize with 2-space indentation, the on-disk `manifest.json` format.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
