//! Template-backed component overrides from `[components.<name>]`.

use std::collections::BTreeMap;

use minijinja::{context, Environment, Value};

use quire_compose::{Registry, RenderInput, Renderer};

use crate::config::ComponentOverride;

const TEMPLATE_NAME: &str = "component.html";

/// A renderer backed by a minijinja snippet.
///
/// The snippet sees `name`, `props`, `text` (plain text of the node) and
/// `children` (rendered markup, inserted unescaped).
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Compile a snippet; syntax errors surface here rather than per page.
    pub fn new(source: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME.to_string(), source.to_string())?;
        Ok(Self { env })
    }

    fn try_render(&self, input: &RenderInput<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;
        tmpl.render(context! {
            name => input.name,
            props => input.props,
            text => input.node.plain_text(),
            children => Value::from_safe_string(input.children.to_string()),
        })
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, input: &RenderInput<'_>) -> String {
        match self.try_render(input) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to render component {}: {}", input.name, e);
                input.children.to_string()
            }
        }
    }
}

/// Build the theme override registry from configuration.
pub fn build_registry(
    components: &BTreeMap<String, ComponentOverride>,
) -> Result<Registry, (String, minijinja::Error)> {
    let mut registry = Registry::new();

    for (name, component) in components {
        let renderer = TemplateRenderer::new(&component.template).map_err(|e| (name.clone(), e))?;
        registry = registry.with(name.clone(), renderer);
        tracing::debug!("Registered component override {}", name);
    }

    Ok(registry)
}
