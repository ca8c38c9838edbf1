//! Media URL construction.

/// Stream URL for a song's storage path.
///
/// Only the file name is kept (`/` and `\` both separate segments); the
/// public media endpoint serves it with range support. Returns an empty
/// string when the path has no file name.
pub fn stream_url(base_url: &str, audio_path: &str) -> String {
    let filename = audio_path
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .unwrap_or_default();

    if filename.is_empty() {
        return String::new();
    }

    format!("{}/media/audio/{}", base_url, filename)
}

/// Cover image URL for a song's cover path.
pub fn cover_url(base_url: &str, cover_path: Option<&str>) -> Option<String> {
    let path = cover_path?.trim().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base_url, path))
}
