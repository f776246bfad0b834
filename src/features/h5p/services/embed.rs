use crate::features::h5p::models::ContentKind;

const IFRAME_HEIGHT: u32 = 600;

/// Public embed identity of a content item.
///
/// Derived on every request from the item id and its public file URL; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedDescriptor {
    pub embed_url: String,
    pub iframe_html: String,
    pub short_code: String,
}

impl EmbedDescriptor {
    pub fn build(
        embed_base_url: &str,
        file_url: &str,
        kind: ContentKind,
        content_id: i64,
    ) -> Self {
        let embed_url = format!(
            "{}/embed?url={}",
            embed_base_url.trim_end_matches('/'),
            urlencoding::encode(file_url)
        );
        let iframe_html = format!(
            r#"<iframe src="{}" width="100%" height="{}" frameborder="0" allowfullscreen="allowfullscreen"></iframe>"#,
            embed_url, IFRAME_HEIGHT
        );
        let short_code = format!("{{{}:{}}}", kind.short_code_tag(), content_id);

        Self {
            embed_url,
            iframe_html,
            short_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_URL: &str = "https://files.test/public/contentbank/1/42/demo.h5p";

    #[test]
    fn test_build_descriptor() {
        let descriptor =
            EmbedDescriptor::build("https://lms.test/h5p", FILE_URL, ContentKind::H5p, 42);

        assert_eq!(
            descriptor.embed_url,
            "https://lms.test/h5p/embed?url=https%3A%2F%2Ffiles.test%2Fpublic%2Fcontentbank%2F1%2F42%2Fdemo.h5p"
        );
        assert_eq!(
            descriptor.iframe_html,
            format!(
                r#"<iframe src="{}" width="100%" height="600" frameborder="0" allowfullscreen="allowfullscreen"></iframe>"#,
                descriptor.embed_url
            )
        );
        assert_eq!(descriptor.short_code, "{h5p:42}");
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let a = EmbedDescriptor::build("https://lms.test/h5p/", FILE_URL, ContentKind::H5p, 1);
        let b = EmbedDescriptor::build("https://lms.test/h5p", FILE_URL, ContentKind::H5p, 1);
        assert_eq!(a, b);
    }
}
