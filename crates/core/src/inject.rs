//! Entry-page markup injection.
//!
//! Inserts the manifest `<link>` and the service-worker bootstrap script
//! into an HTML document by literal substring insertion before the
//! lowercase-exact `</head>` and `</body>` closing tags. This is not an
//! HTML parser: documents using different tag casing, self-closing
//! variants, or lacking a tag are left unpatched on that half, silently.

/// Manifest link inserted immediately before the first `</head>`.
pub const MANIFEST_LINK: &str = r#"<link rel="manifest" href="manifest.json">"#;

/// Service-worker bootstrap inserted immediately before the first `</body>`.
pub const SW_BOOTSTRAP: &str = r#"<script>
  if ('serviceWorker' in navigator) {
    window.addEventListener('load', () => {
      navigator.serviceWorker.register('sw.js')
        .then(registration => {
          console.log('Service Worker registered with scope:', registration.scope);
        })
        .catch(error => {
          console.error('Service Worker registration failed:', error);
        });
    });
  }
</script>
"#;

/// Which halves of the injection actually applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InjectionOutcome {
    /// `</head>` was found and the manifest link inserted before it.
    pub manifest_linked: bool,
    /// `</body>` was found and the bootstrap script inserted before it.
    pub sw_registered: bool,
}

/// Patch `html` with the two PWA fragments.
///
/// Each insertion happens at the first occurrence of its closing tag; a
/// missing tag skips that insertion without raising an error. Re-running
/// on already-patched markup inserts a second copy of each fragment, so
/// callers must not re-process a converted site.
pub fn inject_pwa_tags(html: &str) -> (String, InjectionOutcome) {
    let mut outcome = InjectionOutcome::default();
    let mut doc = html.to_string();

    if let Some(patched) = insert_before(&doc, "</head>", MANIFEST_LINK) {
        doc = patched;
        outcome.manifest_linked = true;
    }
    if let Some(patched) = insert_before(&doc, "</body>", SW_BOOTSTRAP) {
        doc = patched;
        outcome.sw_registered = true;
    }

    (doc, outcome)
}

/// Insert `fragment` before the first occurrence of `marker`, or `None`
/// when the marker is absent.
fn insert_before(doc: &str, marker: &str, fragment: &str) -> Option<String> {
    let at = doc.find(marker)?;
    let mut out = String::with_capacity(doc.len() + fragment.len());
    out.push_str(&doc[..at]);
    out.push_str(fragment);
    out.push_str(&doc[at..]);
    Some(out)
}
