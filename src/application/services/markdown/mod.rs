/// Renders user-authored Markdown (post bodies, comments) to HTML.
///
/// GFM-flavored: tables, autolinks, strikethrough and task lists. Raw HTML
/// is allowed through comrak and then sanitized by ammonia, so the output
/// is safe to embed in a page as-is.
pub fn render_markdown(text: &str) -> String {
    let mut c_opts = comrak::ComrakOptions::default();
    c_opts.parse.smart = false;
    c_opts.extension.table = true;
    c_opts.extension.autolink = true;
    c_opts.extension.strikethrough = true;
    c_opts.extension.tasklist = true;
    c_opts.render.github_pre_lang = true;
    // HtmlBlock/HtmlInline pass through; sanitized by ammonia afterwards
    c_opts.render.unsafe_ = true;

    let html = comrak::markdown_to_html(text, &c_opts);
    sanitize(&html)
}

fn sanitize(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.add_generic_attributes(["class"]);
    // Keep code blocks and task-list checkboxes
    builder.add_tags(["pre", "code", "span", "input"]);
    builder.add_tag_attributes("input", ["type", "checked", "disabled", "class"]);
    builder.url_relative(ammonia::UrlRelative::PassThrough);
    builder.link_rel(Some("noopener noreferrer"));
    builder.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("# Hello\n\nSome *emphasis*.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn strips_script_tags() {
        let html = render_markdown("before\n\n<script>alert('x')</script>\n\nafter");
        assert!(!html.contains("<script"));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn renders_gfm_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn strips_event_handler_attributes() {
        let html = render_markdown("<p onclick=\"evil()\">hi</p>");
        assert!(!html.contains("onclick"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn links_get_rel_noopener() {
        let html = render_markdown("[site](https://example.com)");
        assert!(html.contains("noopener noreferrer"));
    }
}
