//! Query string reading and rewriting for trigger URLs.

use std::collections::HashMap;

/// URL split into the part before `?`, the query, and the `#` fragment.
struct UrlParts<'u> {
    base: &'u str,
    query: &'u str,
    fragment: Option<&'u str>,
}

fn split_url(url: &str) -> UrlParts<'_> {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = rest.split_once('?').unwrap_or((rest, ""));
    UrlParts {
        base,
        query,
        fragment,
    }
}

fn join_url(base: &str, pairs: &[String], fragment: Option<&str>) -> String {
    let mut url = base.to_owned();
    if !pairs.is_empty() {
        url.push('?');
        url.push_str(&pairs.join("&"));
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}

fn pair_key(pair: &str) -> String {
    decode(pair.split_once('=').map_or(pair, |(key, _)| key))
}

/// Parse query string into HashMap with URL decoding.
///
/// Repeated keys are joined with commas.
pub fn parse_query_string(query_str: &str) -> HashMap<String, String> {
    let mut result: HashMap<String, String> = HashMap::new();

    for pair in query_str.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (key, value) = (decode(key), decode(value));

        result
            .entry(key)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    result
}

/// Query parameters of a full URL.
pub fn query_params(url: &str) -> HashMap<String, String> {
    parse_query_string(split_url(url).query)
}

/// Remove every occurrence of the named parameters, keeping the rest untouched.
pub fn remove_query_args(url: &str, names: &[&str]) -> String {
    let parts = split_url(url);
    let kept: Vec<String> = parts
        .query
        .split('&')
        .filter(|pair| !pair.is_empty() && !names.contains(&pair_key(pair).as_str()))
        .map(str::to_owned)
        .collect();
    join_url(parts.base, &kept, parts.fragment)
}

/// Set parameters, replacing existing values and appending new ones in order.
pub fn add_query_args(url: &str, args: &[(&str, &str)]) -> String {
    let names: Vec<&str> = args.iter().map(|(name, _)| *name).collect();
    let stripped = remove_query_args(url, &names);
    let parts = split_url(&stripped);

    let mut pairs: Vec<String> = parts
        .query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(str::to_owned)
        .collect();
    pairs.extend(args.iter().map(|(name, value)| {
        format!(
            "{}={}",
            urlencoding::encode(name),
            urlencoding::encode(value)
        )
    }));

    join_url(parts.base, &pairs, parts.fragment)
}
