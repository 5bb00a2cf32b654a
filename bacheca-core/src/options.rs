use std::collections::HashMap;

pub const DEFAULT_PER_PAGE: u32 = 30;
pub const MAX_PER_PAGE: u32 = 100;

/// Parametri di paginazione passati a `Storage::list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub per_page: u32,
    /// Pagina 1-indexed, sempre >= 1.
    pub page: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

impl ListOptions {
    pub fn new(per_page: u32, page: u32) -> Self {
        Self {
            per_page: clamp_per_page(per_page),
            page: page.max(1),
        }
    }

    /// Costruisce le opzioni dalla query string. Non fallisce mai: valori
    /// assenti o non validi ricadono sui default.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let per_page = match param(query, "per_page") {
            Some(v) => v.parse::<u32>().unwrap_or(DEFAULT_PER_PAGE),
            None => DEFAULT_PER_PAGE,
        };
        let page = param(query, "page")
            .map(|v| v.parse::<u32>().unwrap_or(0))
            .unwrap_or(0);
        Self::new(per_page, page)
    }

    /// Numero di record da saltare.
    pub fn offset(&self) -> u64 {
        u64::from(self.per_page) * u64::from(self.page.saturating_sub(1))
    }
}

fn param<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn clamp_per_page(per_page: u32) -> u32 {
    match per_page {
        0 => DEFAULT_PER_PAGE,
        n => n.min(MAX_PER_PAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(ListOptions::from_query(&query(&[])), ListOptions::new(30, 1));
    }

    #[test]
    fn explicit_values_are_used() {
        let opts = ListOptions::from_query(&query(&[("per_page", "10"), ("page", "2")]));
        assert_eq!(opts.per_page, 10);
        assert_eq!(opts.page, 2);
        assert_eq!(opts.offset(), 10);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let opts = ListOptions::from_query(&query(&[("per_page", "ten"), ("page", "-3")]));
        assert_eq!(opts, ListOptions::new(DEFAULT_PER_PAGE, 1));

        let opts = ListOptions::from_query(&query(&[("per_page", "99999999999"), ("page", "1.5")]));
        assert_eq!(opts, ListOptions::new(DEFAULT_PER_PAGE, 1));
    }

    #[test]
    fn page_zero_and_empty_become_one() {
        assert_eq!(ListOptions::from_query(&query(&[("page", "0")])).page, 1);
        assert_eq!(ListOptions::from_query(&query(&[("page", "")])).page, 1);
    }

    #[test]
    fn per_page_is_bounded() {
        assert_eq!(ListOptions::from_query(&query(&[("per_page", "0")])).per_page, DEFAULT_PER_PAGE);
        assert_eq!(ListOptions::from_query(&query(&[("per_page", "5000")])).per_page, MAX_PER_PAGE);
        assert_eq!(ListOptions::from_query(&query(&[("per_page", "")])).per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn offset_does_not_overflow() {
        let opts = ListOptions::new(MAX_PER_PAGE, u32::MAX);
        assert_eq!(opts.offset(), u64::from(MAX_PER_PAGE) * u64::from(u32::MAX - 1));
    }
}
