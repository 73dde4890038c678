//! Server-rendered landing page.

use crate::Result;
use minijinja::{context, Environment};

pub const INDEX: &str = include_str!("../templates/index.html");
const INDEX_NAME: &str = "index.html";

/// Values shown below the forms. The landing route renders both as `None`.
#[derive(Debug, Default)]
pub struct IndexView<'a> {
    pub error: Option<&'a str>,
    pub output: Option<&'a str>,
}

impl IndexView<'_> {
    /// Render the page. The `.html` template name turns on auto-escaping.
    pub fn render(&self) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(INDEX_NAME, INDEX)?;
        let html = env.get_template(INDEX_NAME)?.render(context! {
            error => self.error,
            output => self.output,
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_view_renders_forms_only() {
        let html = IndexView::default().render().unwrap();

        assert!(!html.contains("{{"));
        assert!(!html.contains("{%"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("class=\"output\""));
        assert!(html.contains("action=\"/generate\""));
        assert!(html.contains("action=\"/creative-writing-prompt\""));
        assert!(html.contains("action=\"/screenshot\""));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = IndexView {
            error: Some("<script>"),
            output: Some("a & b"),
        }
        .render()
        .unwrap();

        assert!(html.contains("<p class=\"error\">&lt;script&gt;</p>"));
        assert!(html.contains("<div class=\"output\">a &amp; b</div>"));
    }

    #[test]
    fn test_empty_strings_render_no_blocks() {
        let html = IndexView {
            error: Some(""),
            output: Some(""),
        }
        .render()
        .unwrap();

        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("class=\"output\""));
    }
}
