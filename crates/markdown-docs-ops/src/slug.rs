use std::path::{Component, Path};

use thiserror::Error;

/// Reasons a slug cannot address a document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug has no segments")]
    Empty,
    #[error("slug segment '{segment}' is not a plain name")]
    InvalidSegment { segment: String },
}

/// Split a `a/b/c` string into slug segments.
///
/// One leading and one trailing slash are tolerated; anything else that
/// would produce an empty segment is rejected.
pub fn parse_slug(raw: &str) -> Result<Vec<String>, SlugError> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(SlugError::Empty);
    }
    let segments: Vec<String> = trimmed.split('/').map(str::to_owned).collect();
    validate_slug(&segments)?;
    Ok(segments)
}

/// Check that every segment names a single path component below the root.
pub fn validate_slug<S: AsRef<str>>(segments: &[S]) -> Result<(), SlugError> {
    if segments.is_empty() {
        return Err(SlugError::Empty);
    }
    for segment in segments {
        let segment = segment.as_ref();
        if !is_plain_segment(segment) {
            return Err(SlugError::InvalidSegment {
                segment: segment.to_string(),
            });
        }
    }
    Ok(())
}

fn is_plain_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
