use axum::http::{header, HeaderMap};
use std::collections::HashMap;

/// Agency/franchise pair the backend token is minted for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tenant {
    pub agency_id: Option<String>,
    pub franchise_id: Option<String>,
}

impl Tenant {
    /// Resolve from query parameters (`agency_id`, then `agencyId`), falling
    /// back to the snake_case form field when the query value is absent or
    /// empty.
    pub fn resolve(query: &HashMap<String, String>, form: &HashMap<String, String>) -> Self {
        Self {
            agency_id: lookup(query, form, "agency_id", "agencyId"),
            franchise_id: lookup(query, form, "franchise_id", "franchiseId"),
        }
    }
}

fn lookup(
    query: &HashMap<String, String>,
    form: &HashMap<String, String>,
    snake: &str,
    camel: &str,
) -> Option<String> {
    query
        .get(snake)
        .or_else(|| query.get(camel))
        .filter(|v| !v.is_empty())
        .or_else(|| form.get(snake).filter(|v| !v.is_empty()))
        .cloned()
}

/// Decode an `application/x-www-form-urlencoded` body; other content types
/// yield an empty map
pub fn parse_form(headers: &HeaderMap, body: &[u8]) -> HashMap<String, String> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        return HashMap::new();
    }

    let Ok(text) = std::str::from_utf8(body) else {
        return HashMap::new();
    };

    let mut form = HashMap::new();
    for pair in text.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let key = key.replace('+', " ");
        let value = value.replace('+', " ");
        if let (Ok(key), Ok(value)) = (urlencoding::decode(&key), urlencoding::decode(&value)) {
            form.entry(key.into_owned()).or_insert(value.into_owned());
        }
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_snake_case_preferred() {
        let query = map(&[("agency_id", "1"), ("agencyId", "2"), ("franchiseId", "3")]);
        let tenant = Tenant::resolve(&query, &HashMap::new());
        assert_eq!(tenant.agency_id.as_deref(), Some("1"));
        assert_eq!(tenant.franchise_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_form_fallback() {
        let query = map(&[("agency_id", "")]);
        let form = map(&[("agency_id", "7"), ("franchise_id", "8")]);
        let tenant = Tenant::resolve(&query, &form);
        assert_eq!(tenant.agency_id.as_deref(), Some("7"));
        assert_eq!(tenant.franchise_id.as_deref(), Some("8"));
    }

    #[test]
    fn test_missing_everywhere() {
        let tenant = Tenant::resolve(&HashMap::new(), &HashMap::new());
        assert_eq!(tenant, Tenant::default());
    }

    #[test]
    fn test_parse_form() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        let form = parse_form(&headers, b"agency_id=12&franchise_id=a%20b&note=x+y");
        assert_eq!(form["agency_id"], "12");
        assert_eq!(form["franchise_id"], "a b");
        assert_eq!(form["note"], "x y");

        assert!(parse_form(&HeaderMap::new(), b"agency_id=12").is_empty());
    }
}
