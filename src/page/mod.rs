//! Landing page rendering.

const LANDING_TEMPLATE: &str = include_str!("landing.html");

pub const DEFAULT_DESCRIPTION: &str = "Shelfcast site description";

/// Document head values substituted into the template.
#[derive(Debug, Clone)]
pub struct DocumentHead {
    pub title: String,
    pub description: String,
}

impl DocumentHead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

pub fn render_landing(head: &DocumentHead) -> String {
    LANDING_TEMPLATE
        .replace("{{title}}", &escape_html(&head.title))
        .replace("{{description}}", &escape_html(&head.description))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_head_and_widgets() {
        let html = render_landing(&DocumentHead::new("Welcome to Shelfcast"));
        assert!(html.contains("<title>Welcome to Shelfcast</title>"));
        assert!(html.contains(r#"content="Shelfcast site description""#));
        assert!(html.contains("Do the database thing"));
        assert!(html.contains("Streamed DB stuff:"));
        assert!(html.contains(r#"new EventSource("/api/books/stream")"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn escapes_title() {
        let html = render_landing(&DocumentHead::new(r#"<script>"x"</script>"#));
        assert!(html.contains("<title>&lt;script&gt;&quot;x&quot;&lt;/script&gt;</title>"));
    }
}
