use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Time,
    #[default]
    String,
    Number,
    Boolean,
}

/// Read-only dimension descriptor supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub title: String,
    /// Attribute expression the dimension reads, without the `$` sigil.
    pub expression: String,
    #[serde(default)]
    pub kind: DimensionKind,
}

impl Dimension {
    /// Dimension reading the attribute of the same name, titled from it.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DimensionKind) -> Self {
        let name = name.into();
        Self {
            title: make_title(&name),
            expression: name.clone(),
            name,
            kind,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    #[must_use]
    pub fn is_time(&self) -> bool {
        self.kind == DimensionKind::Time
    }
}

/// `page_views` -> `Page Views`.
pub(crate) fn make_title(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
