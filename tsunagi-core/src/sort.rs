/// Appointment fields accepted in `_sort`
pub const APPOINTMENT_SORT_FIELDS: &[&str] = &["start", "end", "status", "name", "date"];

/// One `_sort` entry, e.g. `-start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub name: String,
    pub descending: bool,
}

impl SortField {
    /// Parse a single entry; empty entries yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest.trim(), true),
            None => (raw, false),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            descending,
        })
    }

    /// Render back into FHIR `_sort` syntax
    pub fn to_param(&self) -> String {
        if self.descending {
            format!("-{}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Parse a comma separated `_sort` value, keeping order and dropping
    /// entries whose field is not in `allowed`
    pub fn parse_list(raw: Option<&str>, allowed: &[&str]) -> Vec<Self> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        raw.split(',')
            .filter_map(Self::parse)
            .filter(|field| {
                let ok = allowed.contains(&field.name.as_str());
                if !ok {
                    tracing::debug!(field = %field.name, "Dropping unsupported _sort field");
                }
                ok
            })
            .collect()
    }
}
