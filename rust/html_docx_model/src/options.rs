/// Default prefix of the editor's formatting classes (`ql-align-center`).
pub const DEFAULT_CLASS_PREFIX: &str = "ql-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Prefix stripped from class names before they are matched against the
    /// known markers. Unprefixed markers are accepted too.
    pub class_prefix: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Class name with the editor prefix removed, lowercased.
    pub(crate) fn class_marker(&self, class: &str) -> String {
        let lower = class.to_ascii_lowercase();
        let prefix = self.class_prefix.to_ascii_lowercase();
        match lower.strip_prefix(prefix.as_str()) {
            Some(rest) if !prefix.is_empty() => rest.to_string(),
            _ => lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_case_insensitively() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.class_marker("QL-Bold"), "bold");
        assert_eq!(opts.class_marker("bold"), "bold");
    }

    #[test]
    fn custom_prefix() {
        let opts = ConvertOptions::default().with_class_prefix("rte-");
        assert_eq!(opts.class_marker("rte-size-huge"), "size-huge");
        assert_eq!(opts.class_marker("ql-size-huge"), "ql-size-huge");
    }
}
