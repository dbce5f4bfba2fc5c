//! Hook for rendering templates into an HTML body

use anyhow::Result;
use serde_json::Value;

/// Renders a named template with data into a final HTML string
pub trait ViewRenderer {
    fn render(&self, template: &str, data: &Value) -> Result<String>;
}

impl<F> ViewRenderer for F
where
    F: Fn(&str, &Value) -> Result<String>,
{
    fn render(&self, template: &str, data: &Value) -> Result<String> {
        self(template, data)
    }
}
