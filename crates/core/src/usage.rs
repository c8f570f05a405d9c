//! Usage text rendering.
//!
//! Usage is made of up to four blocks: the usage line, the long description,
//! the list of runnable components and the flag listing. Empty blocks are
//! left out and the remaining ones are separated by a single blank line.

use std::collections::HashMap;

use leon::Template;

use crate::component::Component;
use crate::error::Result;

/// Minimum width of the name column in the component list.
pub const NAME_WIDTH: usize = 11;

const USAGE_LINE_TEMPLATE: &str = "Usage: {usage_line}";
const COMPONENT_LINE_TEMPLATE: &str = "{name} {short}";
const COMPONENTS_HEADER: &str = "The components are:";
const FLAGS_HEADER: &str = "The flags are:";

fn fill(text: &str, values: &[(&str, &str)]) -> Result<String> {
    let template = Template::parse(text)?;
    let context: HashMap<String, String> = values
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();

    Ok(template.render(&context)?)
}

fn components_block(component: &Component) -> Result<String> {
    let mut block = String::from(COMPONENTS_HEADER);
    for child in component.children().iter().filter(|child| child.runnable()) {
        let name = format!("{:<width$}", child.name(), width = NAME_WIDTH);
        block.push('\n');
        block.push_str(&fill(
            COMPONENT_LINE_TEMPLATE,
            &[("name", &name), ("short", child.short())],
        )?);
    }
    Ok(block)
}

/// Renders the usage text of `component`.
///
/// Returns an empty string when every block is empty, otherwise text ending
/// in exactly one newline.
///
/// # Errors
///
/// Returns an error if a usage template fails to parse or render.
pub fn render(component: &Component) -> Result<String> {
    let mut blocks: Vec<String> = Vec::new();

    if component.runnable() {
        blocks.push(fill(
            USAGE_LINE_TEMPLATE,
            &[("usage_line", component.usage_line())],
        )?);
    }

    let long = component.long().trim();
    if !long.is_empty() {
        blocks.push(long.to_string());
    }

    if !component.children().is_empty() {
        blocks.push(components_block(component)?);
    }

    // Rendered into its own buffer before anything reaches the sink.
    let defaults = component.flag_set().defaults();
    if !defaults.is_empty() {
        blocks.push(format!("{FLAGS_HEADER}\n{}", defaults.trim_end()));
    }

    if blocks.is_empty() {
        return Ok(String::new());
    }

    let mut text = blocks.join("\n\n");
    text.push('\n');
    Ok(text)
}
