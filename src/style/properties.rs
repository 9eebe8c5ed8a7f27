/// Properties governing fill and decoration. A wrapper whose value differs
/// from its parent's for any of these paints something of its own.
pub const PAINTING_PROPERTIES: &[&str] = &[
    "all",
    "backface-visibility",
    "background",
    "background-blend-mode",
    "background-clip",
    "background-color",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "box-shadow",
    "color",
    "column-rule",
    "column-rule-color",
    "column-rule-style",
    "column-rule-width",
    "empty-cells",
    "filter",
    "font",
    "font-family",
    "font-feature-settings",
    "font-size",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "list-style",
    "list-style-image",
    "list-style-type",
    "mask",
    "mask-type",
    "max-height",
    "max-width",
    "mix-blend-mode",
    "opacity",
    "outline",
    "outline-color",
    "outline-offset",
    "outline-style",
    "outline-width",
    "perspective",
    "quotes",
    "text-decoration",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-underline-position",
    "transform",
    "transform-style",
];

/// Border properties, compared against the tag's default value.
pub const BORDER_PROPERTIES: &[&str] = &[
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-color",
    "border-image",
    "border-image-outset",
    "border-image-repeat",
    "border-image-slice",
    "border-image-source",
    "border-image-width",
    "border-left",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-radius",
    "border-right",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-style",
    "border-top",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "border-width",
];

pub fn is_painting_property(name: &str) -> bool {
    PAINTING_PROPERTIES.contains(&name)
}

pub fn is_border_property(name: &str) -> bool {
    BORDER_PROPERTIES.contains(&name)
}
