//! Item link resolution.

use url::Url;

/// Resolve `target` against `base`.
///
/// Absolute targets pass through, relative ones are joined to the base. A
/// missing or empty target means the root path `/`. If joining fails the base
/// itself is returned, so the result is always an absolute URL.
pub fn resolve_link(base: &Url, target: Option<&str>) -> String {
    let target = target.filter(|t| !t.is_empty()).unwrap_or("/");

    match base.join(target) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::warn!(target = target, error = %e, "Unresolvable target URL, using base");
            base.to_string()
        }
    }
}
