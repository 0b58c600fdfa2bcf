//! Statically compiled card templates from /cards/templates.json.
//! Generated at build time by build.rs, no runtime JSON parsing needed.

use crate::types::*;

include!(concat!(env!("OUT_DIR"), "/templates_generated.rs"));

/// Look up a template by id
pub fn template(id: TemplateId) -> Option<&'static CardTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates matching a predicate
pub fn templates_where<F>(filter: F) -> Vec<&'static CardTemplate>
where
    F: Fn(&CardTemplate) -> bool,
{
    TEMPLATES.iter().filter(|t| filter(t)).collect()
}
