use crate::constants::{DEFAULT_PHOTO_MAX_WIDTH, GOOGLE_MAPS_BASE_URL};

/// Builds Place Photo URLs from photo references. Holds no network state.
#[derive(Clone)]
pub struct PhotoResolver {
    base_url: String,
    api_key: String,
    max_width: u32,
}

impl PhotoResolver {
    pub fn new(api_key: String) -> Self {
        PhotoResolver {
            base_url: GOOGLE_MAPS_BASE_URL.to_string(),
            api_key,
            max_width: DEFAULT_PHOTO_MAX_WIDTH,
        }
    }

    pub fn with_config(api_key: String, base_url: String, max_width: u32) -> Self {
        PhotoResolver {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_width,
        }
    }

    pub fn resolve(&self, photo_reference: Option<&str>) -> Option<String> {
        let reference = photo_reference.filter(|r| !r.is_empty())?;

        Some(format!(
            "{}/place/photo?maxwidth={}&photoreference={}&key={}",
            self.base_url,
            self.max_width,
            urlencoding::encode(reference),
            urlencoding::encode(&self.api_key)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_url() {
        let resolver = PhotoResolver::new("k123".to_string());
        let expected = concat!(
            "https://maps.googleapis.com/maps/api/place/photo",
            "?maxwidth=400&photoreference=ref-abc&key=k123"
        );
        assert_eq!(resolver.resolve(Some("ref-abc")).unwrap(), expected);
    }

    #[test]
    fn test_resolve_none_without_reference() {
        let resolver = PhotoResolver::new("k123".to_string());
        assert!(resolver.resolve(None).is_none());
        assert!(resolver.resolve(Some("")).is_none());
    }

    #[test]
    fn test_resolve_encodes_reference_and_honors_config() {
        let resolver =
            PhotoResolver::with_config("k".to_string(), "http://localhost:9000/".to_string(), 800);
        assert_eq!(
            resolver.resolve(Some("a/b c")).unwrap(),
            "http://localhost:9000/place/photo?maxwidth=800&photoreference=a%2Fb%20c&key=k"
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = PhotoResolver::new("k".to_string());
        assert_eq!(resolver.resolve(Some("x")), resolver.resolve(Some("x")));
    }
}
