use std::fmt::Write as _;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps body markup in the document shell. `theme` becomes the body class and
/// selects the stylesheet.
pub(crate) fn document(title: &str, theme: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(html, "<title>{}</title>", escape_html(title)).expect("write title");
    let theme = escape_html(theme);
    writeln!(html, "<link rel=\"stylesheet\" href=\"/_next/static/{theme}.css\">")
        .expect("write stylesheet");
    writeln!(html, "</head>\n<body class=\"{theme}\">").expect("write body open");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn document_escapes_title() {
        let html = document("A <b> School", "template_classic", "<main></main>");
        assert!(html.contains("<title>A &lt;b&gt; School</title>"));
        assert!(html.contains("<body class=\"template_classic\">"));
        assert!(html.contains("<main></main>"));
    }
}
