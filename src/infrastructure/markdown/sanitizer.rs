use ammonia::Builder as AmmoniaBuilder;
use lazy_static::lazy_static;

/// Attributes the checkbox spans need on top of ammonia's defaults.
pub const CHECKBOX_ATTRIBUTES: &[&str] = &["data-checkbox-index", "role", "aria-checked", "tabindex"];

lazy_static! {
    static ref SANITIZER: AmmoniaBuilder<'static> = build_sanitizer();
}

fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.add_generic_attributes(CHECKBOX_ATTRIBUTES);
    // only the classes the renderer itself emits
    builder.add_allowed_classes("span", &["md-checkbox", "checked"]);
    builder.add_allowed_classes("li", &["task-list-item"]);
    builder.add_tag_attributes("code", &["class"]);

    builder
}

pub fn sanitize(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}
