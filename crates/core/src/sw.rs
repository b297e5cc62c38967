//! Fixed-template offline-cache service worker.

/// Cache name the worker opens at install time.
pub const CACHE_NAME: &str = "my-cache";

/// Root-relative paths precached at install time. Assets beyond these
/// three are never precached; the template is not parameterized by the
/// actual site contents.
pub const PRECACHE_PATHS: [&str; 3] = ["/", "/index.html", "/manifest.json"];

/// The `sw.js` template: precaches [`PRECACHE_PATHS`] under [`CACHE_NAME`]
/// and serves cache-first with network fallback.
pub const SERVICE_WORKER_JS: &str = r#"self.addEventListener('install', event => {
  event.waitUntil(
    caches.open('my-cache').then(cache => {
      return cache.addAll([
        '/',
        '/index.html',
        '/manifest.json',
      ]);
    })
  );
});

self.addEventListener('fetch', event => {
  event.respondWith(
    caches.match(event.request).then(response => {
      return response || fetch(event.request);
    })
  );
});
"#;
