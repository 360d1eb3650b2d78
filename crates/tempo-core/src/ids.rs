//! ID prefix constants.
//!
//! Every record ID is `{prefix}-{8 hex chars}`, generated by the database
//! (see `TempoDb::generate_id`).

pub const PREFIX_CUSTOMER: &str = "cus";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_SPRINT: &str = "spr";
pub const PREFIX_MILESTONE: &str = "mst";
pub const PREFIX_LABEL: &str = "lbl";
pub const PREFIX_TAG: &str = "tag";
pub const PREFIX_ISSUE: &str = "iss";
pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_TIMESHEET: &str = "tms";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_CUSTOMER,
    PREFIX_PROJECT,
    PREFIX_SPRINT,
    PREFIX_MILESTONE,
    PREFIX_LABEL,
    PREFIX_TAG,
    PREFIX_ISSUE,
    PREFIX_TASK,
    PREFIX_TIMESHEET,
    PREFIX_AUDIT,
];

/// Return the prefix of an ID (`"iss-a3f8b2c1"` → `Some("iss")`).
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    let (prefix, rest) = id.split_once('-')?;
    if rest.is_empty() || !ALL_PREFIXES.contains(&prefix) {
        return None;
    }
    Some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for prefix in ALL_PREFIXES {
            assert!(seen.insert(*prefix), "duplicate prefix {prefix}");
            assert_eq!(prefix.len(), 3);
        }
    }

    #[test]
    fn prefix_of_known_id() {
        assert_eq!(prefix_of("tsk-0011aabb"), Some("tsk"));
        assert_eq!(prefix_of("tms-deadbeef"), Some("tms"));
    }

    #[test]
    fn prefix_of_rejects_unknown() {
        assert_eq!(prefix_of("xyz-0011aabb"), None);
        assert_eq!(prefix_of("tsk-"), None);
        assert_eq!(prefix_of("plain"), None);
    }
}
