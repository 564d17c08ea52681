use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::config;
use crate::types::SortDirection;

/// URL parameter names used by list pages
pub mod param {
    pub const PAGE_INDEX: &str = "pageIndex";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const SORT_KEY: &str = "sortKey";
    pub const ORDER: &str = "order";
    pub const QUERY: &str = "query";
    pub const STATUS: &str = "status";
    pub const ROLE: &str = "role";
}

const FILTER_KEYS: [&str; 2] = [param::STATUS, param::ROLE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub key: String,
    pub direction: SortDirection,
}

/// What the user asked to see: the list page's URL parameters, parsed.
///
/// `page_index` is 1-based. Empty strings never survive parsing or
/// [`ListQuery::append`]; an empty value means "parameter removed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_index: u32,
    pub page_size: u32,
    pub sort: Option<Sort>,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: config::config().list.default_page_size,
            sort: None,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse URL parameters. Unknown keys are ignored; unparsable page
    /// numbers fall back to the defaults.
    pub fn from_url_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        let mut sort_key: Option<String> = None;
        let mut order: Option<String> = None;

        for (key, value) in params {
            query.set_param(key.as_ref(), value.as_ref(), &mut sort_key, &mut order);
        }

        query.sort = sort_key.map(|key| Sort {
            key,
            direction: order
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
        });
        query
    }

    /// Parse a `a=b&c=d` query string (a leading `?` is allowed)
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        Self::from_url_params(form_urlencoded::parse(qs.as_bytes()))
    }

    fn set_param(&mut self, key: &str, value: &str, sort_key: &mut Option<String>, order: &mut Option<String>) {
        let value = value.trim();
        let non_empty = || (!value.is_empty()).then(|| value.to_string());

        match key {
            param::PAGE_INDEX => {
                self.page_index = value.parse().ok().filter(|p| *p > 0).unwrap_or(1);
            }
            param::PAGE_SIZE => {
                self.page_size = value
                    .parse()
                    .ok()
                    .filter(|s| *s > 0)
                    .unwrap_or(config::config().list.default_page_size);
            }
            param::SORT_KEY => *sort_key = non_empty(),
            param::ORDER => *order = non_empty(),
            param::QUERY => self.search = non_empty(),
            k if FILTER_KEYS.contains(&k) => match non_empty() {
                Some(v) => {
                    self.filters.insert(k.to_string(), v);
                }
                None => {
                    self.filters.remove(k);
                }
            },
            _ => {}
        }
    }

    /// Merge parameter updates over this query, the way a list page
    /// rewrites its URL: later values win, empty values remove the key.
    pub fn append<K, V>(&self, updates: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params: Vec<(String, String)> = self.to_url_params();
        for (key, value) in updates {
            let (key, value) = (key.as_ref(), value.as_ref());
            params.retain(|(k, _)| k != key);
            if !value.is_empty() {
                params.push((key.to_string(), value.to_string()));
            }
        }
        Self::from_url_params(params)
    }

    pub fn with_page(&self, page_index: u32) -> Self {
        self.append([(param::PAGE_INDEX, page_index.to_string())])
    }

    /// A new page size always starts again from the first page
    pub fn with_page_size(&self, page_size: u32) -> Self {
        self.append([
            (param::PAGE_SIZE, page_size.to_string()),
            (param::PAGE_INDEX, "1".to_string()),
        ])
    }

    pub fn with_sort(&self, key: &str, direction: SortDirection) -> Self {
        self.append([
            (param::SORT_KEY, key.to_string()),
            (param::ORDER, direction.as_str().to_string()),
        ])
    }

    pub fn with_search(&self, term: &str) -> Self {
        self.append([(param::QUERY, term)])
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// The URL side: `pageIndex`, `pageSize`, `sortKey`, `order`, `query`, filters
    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut out = vec![
            (param::PAGE_INDEX.to_string(), self.page_index.to_string()),
            (param::PAGE_SIZE.to_string(), self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            out.push((param::SORT_KEY.to_string(), sort.key.clone()));
            out.push((param::ORDER.to_string(), sort.direction.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            out.push((param::QUERY.to_string(), search.clone()));
        }
        for (k, v) in &self.filters {
            out.push((k.clone(), v.clone()));
        }
        out
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_url_params())
            .finish()
    }

    /// The backend side: `page`, `limit`, `search`, filters, `sortBy`/`order`
    pub fn to_api_params(&self) -> Vec<(String, String)> {
        let mut out = vec![
            ("page".to_string(), self.page_index.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            out.push(("search".to_string(), search.clone()));
        }
        for (k, v) in &self.filters {
            out.push((k.clone(), v.clone()));
        }
        if let Some(sort) = &self.sort {
            out.push(("sortBy".to_string(), sort.key.clone()));
            out.push(("order".to_string(), sort.direction.as_str().to_string()));
        }
        out
    }
}
