//! Document shell: wrap a body fragment in a minimal full HTML skeleton.

/// Wrap a body-HTML fragment in a complete HTML document.
///
/// The style string lands on the `<body>` element verbatim: it is caller
/// configuration, trusted and unescaped, exactly as the downstream converter
/// expects to receive it.
pub fn wrap_document(body: &str, body_styles: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"UTF-8\"><title></title></head>\n\
         <body style=\"{body_styles}\">{body}</body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_charset_and_styles() {
        let doc = wrap_document("<p>hi</p>", "font-family: serif;");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<meta charset="UTF-8">"#));
        assert!(doc.contains(r#"<body style="font-family: serif;"><p>hi</p></body>"#));
    }

    #[test]
    fn style_string_is_not_escaped() {
        let doc = wrap_document("", r#"font-family: "微软雅黑";"#);
        assert!(doc.contains(r#"font-family: "微软雅黑";"#));
    }

    #[test]
    fn empty_body_still_produces_full_document() {
        let doc = wrap_document("", "");
        assert!(doc.contains("<body style=\"\"></body>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }
}
