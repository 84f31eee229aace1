//! Label selector parsing and matching.
//!
//! The API server evaluates selectors itself; this is used by
//! `MockCluster` so in-memory queries filter the same way.
//! Supports `k=v`, `k==v`, `k!=v`, `k`, `!k`, `k in (a,b)` and
//! `k notin (a,b)`, joined by commas.

use std::collections::BTreeMap;

use crate::error::{ClusterError, ClusterResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Requirement {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    DoesNotExist(String),
    In(String, Vec<String>),
    NotIn(String, Vec<String>),
}

impl Requirement {
    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Self::Equals(k, v) => labels.get(k) == Some(v),
            Self::NotEquals(k, v) => labels.get(k) != Some(v),
            Self::Exists(k) => labels.contains_key(k),
            Self::DoesNotExist(k) => !labels.contains_key(k),
            Self::In(k, values) => labels.get(k).is_some_and(|v| values.contains(v)),
            Self::NotIn(k, values) => labels.get(k).is_none_or(|v| !values.contains(v)),
        }
    }
}

/// A parsed label selector. The empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    pub fn parse(input: &str) -> ClusterResult<Self> {
        let requirements = split_top_level(input)
            .into_iter()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(parse_requirement)
            .collect::<ClusterResult<Vec<_>>>()?;
        Ok(Self { requirements })
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

/// Split on commas that are not inside a `(...)` value set.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                terms.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(&input[start..]);
    terms
}

fn parse_requirement(term: &str) -> ClusterResult<Requirement> {
    let invalid = || ClusterError::Other(format!("invalid label selector term: '{term}'"));

    if let Some(key) = term.strip_prefix('!') {
        return Ok(Requirement::DoesNotExist(non_empty(key.trim()).ok_or_else(invalid)?));
    }
    if let Some((key, value)) = term.split_once("!=") {
        let key = non_empty(key.trim()).ok_or_else(invalid)?;
        return Ok(Requirement::NotEquals(key, value.trim().to_string()));
    }
    if let Some((key, value)) = term.split_once("==").or_else(|| term.split_once('=')) {
        let key = non_empty(key.trim()).ok_or_else(invalid)?;
        return Ok(Requirement::Equals(key, value.trim().to_string()));
    }
    if let Some((key, values)) = term.split_once(" notin ") {
        let key = non_empty(key.trim()).ok_or_else(invalid)?;
        return Ok(Requirement::NotIn(key, parse_value_set(values).ok_or_else(invalid)?));
    }
    if let Some((key, values)) = term.split_once(" in ") {
        let key = non_empty(key.trim()).ok_or_else(invalid)?;
        return Ok(Requirement::In(key, parse_value_set(values).ok_or_else(invalid)?));
    }
    if term.contains(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(Requirement::Exists(term.to_string()))
}

fn parse_value_set(values: &str) -> Option<Vec<String>> {
    let inner = values.trim().strip_prefix('(')?.strip_suffix(')')?;
    Some(
        inner
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect(),
    )
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
