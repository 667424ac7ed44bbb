//! `filter[attribute][OPERATOR]=value` query parameters.
//!
//! A request such as
//! `?filter[username][EQ]=alice&filter[username][EQ]=bob&filter[email][ST]=a`
//! parses into
//! `{"username": {"EQ": {"alice", "bob"}}, "email": {"ST": {"a"}}}`.
//!
//! Keys that do not look like `filter[x][y]` are ignored. Values are trimmed
//! and blank values are dropped; a key left without any value produces no
//! entry at all. An operator outside [`FilterOperator::ALL`] is an error.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Comparison applied to an attribute when filtering a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equal.
    #[serde(rename = "EQ")]
    Eq,
    /// Starts with.
    #[serde(rename = "ST")]
    St,
}

impl FilterOperator {
    /// Every operator the parser accepts.
    pub const ALL: [FilterOperator; 2] = [FilterOperator::Eq, FilterOperator::St];

    /// Wire name, as it appears in `filter[attr][NAME]`.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Eq => "EQ",
            FilterOperator::St => "ST",
        }
    }

    /// Whether `candidate` (a field of the filtered resource) satisfies this
    /// operator against one filter `value`.
    pub fn matches(self, candidate: &str, value: &str) -> bool {
        match self {
            FilterOperator::Eq => candidate == value,
            FilterOperator::St => candidate.starts_with(value),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator name that is not part of [`FilterOperator::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for FilterOperator {
    type Err = UnknownOperator;

    /// Names are matched exactly; `eq` is not `EQ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Filter parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown filter operator '{operator}' in query parameter '{key}'")]
    InvalidOperator { key: String, operator: String },
}

/// Values requested for one attribute, grouped by operator.
pub type OperatorValues = BTreeMap<FilterOperator, BTreeSet<String>>;

/// Parsed `filter[...]` query parameters: attribute → operator → values.
///
/// Every attribute has at least one operator, every operator at least one
/// value, and every value is trimmed and non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterParameters {
    filters: BTreeMap<String, OperatorValues>,
}

impl FilterParameters {
    /// Parse a key → values map, e.g. a servlet-style parameter map.
    pub fn from_multimap<S: BuildHasher>(
        params: &HashMap<String, Vec<String>, S>,
    ) -> Result<Self, Error> {
        parse_filter_parameters(
            params
                .iter()
                .flat_map(|(key, values)| values.iter().map(move |value| (key, value))),
        )
    }

    pub fn filters(&self) -> &BTreeMap<String, OperatorValues> {
        &self.filters
    }

    pub fn into_inner(self) -> BTreeMap<String, OperatorValues> {
        self.filters
    }

    pub fn get(&self, attribute: &str) -> Option<&OperatorValues> {
        self.filters.get(attribute)
    }

    pub fn values(&self, attribute: &str, operator: FilterOperator) -> Option<&BTreeSet<String>> {
        self.filters.get(attribute)?.get(&operator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperatorValues)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of filtered attributes.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn insert(&mut self, attribute: &str, operator: FilterOperator, value: &str) {
        self.filters
            .entry(attribute.to_string())
            .or_default()
            .entry(operator)
            .or_default()
            .insert(value.to_string());
    }
}

static FILTER_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^filter\[[^\]]+\]\[[^\]]+\]$").expect("Invalid filter key regex"));

/// The two bracketed fragments of a `filter[attribute][operator]` key.
#[derive(Debug, PartialEq, Eq)]
struct FilterKey<'a> {
    attribute: &'a str,
    operator: &'a str,
}

/// Attribute sits between the first `[` and the first `]`, operator between
/// the last `[` and the last `]`.
fn split_filter_key(key: &str) -> Option<FilterKey<'_>> {
    if !FILTER_KEY.is_match(key) {
        return None;
    }
    let attribute = &key[key.find('[')? + 1..key.find(']')?];
    let operator = &key[key.rfind('[')? + 1..key.rfind(']')?];
    Some(FilterKey {
        attribute,
        operator,
    })
}

/// Parse repeated `(key, value)` query pairs into [`FilterParameters`].
///
/// Pairs are taken as the HTTP layer decoded them; repeated keys are expected
/// to appear once per value. The operator of a key is only resolved once the
/// key carries a non-blank value, so `filter[a][XX]=` is dropped while
/// `filter[a][XX]=1` fails with [`Error::InvalidOperator`].
pub fn parse_filter_parameters<I, K, V>(params: I) -> Result<FilterParameters, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed = FilterParameters::default();

    for (key, value) in params {
        let key = key.as_ref();
        let Some(fragments) = split_filter_key(key) else {
            continue;
        };

        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }

        let operator: FilterOperator =
            fragments
                .operator
                .parse()
                .map_err(|UnknownOperator(operator)| Error::InvalidOperator {
                    key: key.to_string(),
                    operator,
                })?;

        tracing::trace!(
            attribute = fragments.attribute,
            operator = %operator,
            value,
            "filter value accepted"
        );
        parsed.insert(fragments.attribute, operator, value);
    }

    Ok(parsed)
}
