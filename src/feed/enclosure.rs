//! Enclosure MIME inference.

use super::types::{Enclosure, DEFAULT_IMAGE_MIME};

/// Guess the MIME type of an image URL from its file extension.
///
/// Query string and fragment are ignored. Unknown extensions give
/// [`DEFAULT_IMAGE_MIME`].
pub fn guess_mime(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string()
}

/// Build the enclosure for an optional image URL.
pub fn classify_enclosure(image_url: Option<&str>) -> Option<Enclosure> {
    let url = image_url.filter(|u| !u.is_empty())?;
    Some(Enclosure {
        url: url.to_string(),
        mime_type: guess_mime(url),
    })
}
