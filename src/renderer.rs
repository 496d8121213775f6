//! Placeholder substitution for template files.
//!
//! Files are rendered with MiniJinja in strict mode, so every token in a file
//! has to resolve against the context or rendering fails. The context only
//! ever holds `name`, but the rest of the MiniJinja syntax (filters such as
//! `{{ name | upper }}`, `{% if %}` blocks) is left enabled and works on that
//! single variable.
use minijinja::{Environment, Error, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String, Error>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, Error>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that rejects undefined variables and keeps file endings intact.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, Error> {
        self.env.render_str(template, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str) -> Result<String, Error> {
        let context = json!({"name": "demo"});
        MiniJinjaRenderer::new().render(template, &context)
    }

    #[test]
    fn test_substitutes_name() {
        assert_eq!(render("Hello {{name}}").unwrap(), "Hello demo");
    }

    #[test]
    fn test_undefined_variable_fails() {
        assert!(render("{{ version }}").is_err());
        assert!(render("{% if author %}x{% endif %}").is_err());
    }

    #[test]
    fn test_broken_syntax_fails() {
        assert!(render("{{ name ").is_err());
    }

    #[test]
    fn test_trailing_newline_kept() {
        assert_eq!(render("{{ name }}\n").unwrap(), "demo\n");
    }

    #[test]
    fn test_expressions_over_name() {
        assert_eq!(render("{{ name | upper }}").unwrap(), "DEMO");
        assert_eq!(
            render("{% if name %}{{ name }}{% endif %}").unwrap(),
            "demo"
        );
    }
}
