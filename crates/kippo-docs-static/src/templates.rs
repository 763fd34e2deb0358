//! Template engine for rendering documentation pages.

use minijinja::{context, Environment};

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page description for the meta tag
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");

        env.add_template("doc.html", DOC_TEMPLATE)
            .expect("Failed to add doc template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            content => &context.content,
            base_url => &context.base_url,
            styles => &context.styles,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/codeblock.css">
</head>
<body>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <script src="{{ base_url }}assets/codeblock.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context(content: &str) -> Context {
        Context {
            title: "Quick Start".to_string(),
            site_title: "Kippo".to_string(),
            description: None,
            content: content.to_string(),
            base_url: "/".to_string(),
            styles: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("doc.html", &context("<p>Hello world</p>"))
            .unwrap();

        assert!(html.contains("<title>Quick Start - Kippo</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r#"assets/codeblock.js"></script>"#));
        assert!(!html.contains("meta name=\"description\""));
    }

    #[test]
    fn includes_description_and_styles() {
        let engine = TemplateEngine::new();
        let mut ctx = context("");
        ctx.description = Some("Routing & commands".to_string());
        ctx.base_url = "/docs/".to_string();
        ctx.styles = vec!["/docs/assets/brand.css".to_string()];

        let html = engine.render_page("doc.html", &ctx).unwrap();

        assert!(html.contains(r#"<meta name="description" content="Routing &amp; commands">"#));
        // minijinja escapes '/' inside attribute values
        assert!(html.contains("brand.css"));
        assert!(html.contains(r#"docs&#x2f;assets/codeblock.css""#));
    }
}
