//! Video id resolution from user input.

use reqwest::Url;

use crate::error::ClientError;

/// Extract the video id from a bare id, a `watch?v=` URL or a `youtu.be/`
/// short link.
pub fn resolve_video_id(input: &str) -> Result<String, ClientError> {
    let input = input.trim();
    if is_video_id(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input).map_err(|_| ClientError::InvalidVideoUrl(input.to_string()))?;

    let candidate = if url.host_str() == Some("youtu.be") {
        url.path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    };

    match candidate {
        Some(id) if is_video_id(&id) => Ok(id),
        _ => Err(ClientError::InvalidVideoUrl(input.to_string())),
    }
}

fn is_video_id(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id() {
        assert_eq!(resolve_video_id("9Edkw-PC_jI").unwrap(), "9Edkw-PC_jI");
        assert_eq!(resolve_video_id("  9Edkw-PC_jI \n").unwrap(), "9Edkw-PC_jI");
    }

    #[test]
    fn test_watch_url() {
        let id = resolve_video_id("https://www.youtube.com/watch?v=9Edkw-PC_jI&t=42s").unwrap();
        assert_eq!(id, "9Edkw-PC_jI");
    }

    #[test]
    fn test_short_link() {
        assert_eq!(resolve_video_id("https://youtu.be/9Edkw-PC_jI").unwrap(), "9Edkw-PC_jI");
    }

    #[test]
    fn test_url_without_id() {
        let err = resolve_video_id("https://www.youtube.com/feed").unwrap_err();
        assert!(matches!(err, ClientError::InvalidVideoUrl(_)));
        assert!(err.to_string().starts_with("Couldn't parse url"));
    }

    #[test]
    fn test_garbage() {
        assert!(resolve_video_id("not a url").is_err());
        assert!(resolve_video_id("").is_err());
        assert!(resolve_video_id("https://www.youtube.com/watch?v=../etc").is_err());
    }
}
