use std::fmt;

use serde::Serialize;

/// Rendered for a null target.
pub const TARGET_IS_NULL: &str = "target is null";

/// Rendered when the target has no node of its own in the reduced tree.
pub const TARGET_NOT_PRESENT: &str = "target not present in reduced tree";

/// Bracketed part of an element step, e.g. `text()="Save"` or `2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disambiguator {
    pub predicate: String,
    pub optimized: bool,
    pub skip_parent: bool,
}

impl Disambiguator {
    pub fn position(rank: usize) -> Self {
        Self {
            predicate: rank.to_string(),
            optimized: false,
            skip_parent: false,
        }
    }
}

/// One segment of an HPath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub label: String,

    /// Unique in the whole document: the ascent stops here.
    pub optimized: bool,

    /// The next ancestor is already described by this step.
    pub skip_parent: bool,
}

impl PathStep {
    pub fn text_node() -> Self {
        Self {
            label: "text()".to_string(),
            optimized: false,
            skip_parent: false,
        }
    }

    /// A step that ends the ascent without being emitted.
    pub fn empty() -> Self {
        Self {
            label: String::new(),
            optimized: false,
            skip_parent: false,
        }
    }

    pub fn element(tag: &str, disambiguator: Option<Disambiguator>) -> Self {
        match disambiguator {
            Some(d) => {
                let prefix = if d.optimized { "//" } else { "" };
                Self {
                    label: format!("{}{}[{}]", prefix, tag, d.predicate),
                    optimized: d.optimized,
                    skip_parent: d.skip_parent,
                }
            }
            None => Self {
                label: tag.to_string(),
                optimized: false,
                skip_parent: false,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }
}

/// Steps ordered from the outermost ancestor to the target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HPath {
    pub steps: Vec<PathStep>,
}

impl HPath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Starts with a globally unique step rather than at the document root.
    pub fn is_anchored(&self) -> bool {
        self.steps.first().is_some_and(|s| s.optimized)
    }
}

impl fmt::Display for HPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_anchored() {
            f.write_str("/")?;
        }
        let labels: Vec<&str> = self.steps.iter().map(|s| s.label.as_str()).collect();
        f.write_str(&labels.join("/"))
    }
}

/// Result of a locate request. The two diagnostics are expected outcomes,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    Path(HPath),
    TargetIsNull,
    TargetNotPresent,
}

impl LocateOutcome {
    pub fn path(&self) -> Option<&HPath> {
        match self {
            LocateOutcome::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self, LocateOutcome::Path(_))
    }

    /// Short machine-readable status.
    pub fn status(&self) -> &'static str {
        match self {
            LocateOutcome::Path(_) => "located",
            LocateOutcome::TargetIsNull => "null_target",
            LocateOutcome::TargetNotPresent => "not_present",
        }
    }
}

impl fmt::Display for LocateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateOutcome::Path(path) => write!(f, "{}", path),
            LocateOutcome::TargetIsNull => f.write_str(TARGET_IS_NULL),
            LocateOutcome::TargetNotPresent => f.write_str(TARGET_NOT_PRESENT),
        }
    }
}
