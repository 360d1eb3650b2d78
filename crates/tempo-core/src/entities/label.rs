use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_COLOR: &str = "#FFFFFF";

/// An issue label, mirrored from the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub label: String,
    /// Hex color, `#RRGGBB`.
    pub color: String,
}

/// Check a `#RRGGBB` color string.
#[must_use]
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Label names joined with `", "`, as shown in listings and changelogs.
#[must_use]
pub fn labels_display(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|l| l.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{Label, is_valid_color, labels_display};

    #[test]
    fn joins_label_names() {
        let labels = vec![
            Label {
                id: "lbl-1".into(),
                label: "backend".into(),
                color: "#FFFFFF".into(),
            },
            Label {
                id: "lbl-2".into(),
                label: "bug".into(),
                color: "#d9534f".into(),
            },
        ];
        assert_eq!(labels_display(&labels), "backend, bug");
        assert_eq!(labels_display(&[]), "");
    }

    #[test]
    fn accepts_hex_colors() {
        assert!(is_valid_color("#FFFFFF"));
        assert!(is_valid_color("#d9534f"));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(!is_valid_color("FFFFFF"));
        assert!(!is_valid_color("#FFF"));
        assert!(!is_valid_color("#GGGGGG"));
        assert!(!is_valid_color("#FFFFFF0"));
    }
}
