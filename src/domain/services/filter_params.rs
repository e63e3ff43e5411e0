//! Conversions between the feature list [`FilterState`] and its two wire
//! forms: the shareable page URL and the feature list endpoint query.
//!
//! Everything here is pure and total. Malformed URL input falls back to the
//! defaults; an environment key that cannot be resolved yields `None` instead
//! of a request.

use crate::domain::entities::filter_state::{
    FilterState, SortOption, SortOrder, TagId, TagStrategy, DEFAULT_SORT_FIELD,
};
use crate::domain::entities::EnvironmentDirectory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use url::form_urlencoded;

pub const PAGE_SIZE: u32 = 50;

const IS_ARCHIVED: &str = "is_archived";
const IS_ENABLED: &str = "is_enabled";
const PAGE: &str = "page";
const SEARCH: &str = "search";
const TAGS: &str = "tags";
const TAG_STRATEGY: &str = "tag_strategy";
const OWNERS: &str = "owners";
const GROUP_OWNERS: &str = "group_owners";
const VALUE_SEARCH: &str = "value_search";
const SORT_BY: &str = "sortBy";
const SORT_ORDER: &str = "sortOrder";

/// Flat string parameters of the page URL, kept in key order so rendering is
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams(BTreeMap<String, String>);

impl UrlParams {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parses a query string, with or without the leading `?`. A repeated key
    /// keeps its last value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Query of the project feature list endpoint. Field names are the server's
/// wire names; `None` fields are left off the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureListQuery {
    #[serde(rename = "environmentId")]
    pub environment_id: String,
    #[serde(rename = "projectId")]
    pub project_id: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_owners: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub tag_strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_search: Option<String>,
    pub sort_field: String,
    pub sort_direction: String,
}

/// Maps an environment API key to its numeric id. Must not have side effects;
/// it is called once per query build.
pub trait EnvironmentResolver {
    fn resolve_environment_id(&self, api_key: &str) -> Option<u64>;
}

impl<F> EnvironmentResolver for F
where
    F: Fn(&str) -> Option<u64>,
{
    fn resolve_environment_id(&self, api_key: &str) -> Option<u64> {
        self(api_key)
    }
}

impl EnvironmentResolver for EnvironmentDirectory {
    fn resolve_environment_id(&self, api_key: &str) -> Option<u64> {
        self.id_for_key(api_key)
    }
}

fn join_ids<T: Display>(ids: &[T]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn parse_ids(value: Option<&str>) -> Vec<u64> {
    value
        .map(|v| v.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default()
}

/// An entirely empty value is the untagged filter. Otherwise empty or
/// non-numeric segments are dropped.
fn parse_tags(value: Option<&str>) -> Vec<TagId> {
    match value {
        None => Vec::new(),
        Some(v) if v.trim().is_empty() => vec![TagId::Untagged],
        Some(v) => v.split(',').filter_map(TagId::parse).collect(),
    }
}

fn parse_page(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Renders the filters as page URL parameters. Keys at their default value are
/// left out, so applying the result replaces any stale parameters; the
/// archived flag and the sort are always written.
pub fn build_url_params(filters: &FilterState, page: u32) -> UrlParams {
    let mut params = UrlParams::new();

    params.insert(IS_ARCHIVED, filters.show_archived.to_string());
    params.insert(SORT_BY, filters.sort.sort_by.clone());
    params.insert(SORT_ORDER, filters.sort.sort_order.as_str());

    if page != 1 {
        params.insert(PAGE, page.to_string());
    }
    if let Some(search) = filters.search_text() {
        params.insert(SEARCH, search);
    }
    if let Some(tags) = join_ids(&filters.tags) {
        params.insert(TAGS, tags);
    }
    if let Some(owners) = join_ids(&filters.owners) {
        params.insert(OWNERS, owners);
    }
    if let Some(group_owners) = join_ids(&filters.group_owners) {
        params.insert(GROUP_OWNERS, group_owners);
    }
    if !filters.value_search.is_empty() {
        params.insert(VALUE_SEARCH, filters.value_search.clone());
    }
    if filters.tag_strategy != TagStrategy::default() {
        params.insert(TAG_STRATEGY, filters.tag_strategy.as_str());
    }
    if let Some(enabled) = filters.is_enabled {
        params.insert(IS_ENABLED, enabled.to_string());
    }

    params
}

/// Rebuilds filters from page URL parameters, defaulting every missing or
/// unreadable field.
pub fn get_filters_from_params(params: &UrlParams) -> FilterState {
    let sort_by = params
        .get(SORT_BY)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SORT_FIELD);
    let sort_order = params.get(SORT_ORDER).map(SortOrder::parse).unwrap_or_default();

    FilterState {
        search: params
            .get(SEARCH)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        tags: parse_tags(params.get(TAGS)),
        tag_strategy: params
            .get(TAG_STRATEGY)
            .map(TagStrategy::parse)
            .unwrap_or_default(),
        show_archived: params.get(IS_ARCHIVED) == Some("true"),
        is_enabled: parse_flag(params.get(IS_ENABLED)),
        value_search: params.get(VALUE_SEARCH).unwrap_or_default().to_string(),
        owners: parse_ids(params.get(OWNERS)),
        group_owners: parse_ids(params.get(GROUP_OWNERS)),
        sort: SortOption::from_field(sort_by, sort_order),
        page: parse_page(params.get(PAGE)),
    }
}

/// Builds the feature list query, or `None` when the environment key cannot
/// be resolved yet. Callers must skip the request on `None`.
pub fn build_api_filter_params<R>(
    filters: &FilterState,
    page: u32,
    environment_api_key: &str,
    project_id: u64,
    resolver: &R,
) -> Option<FeatureListQuery>
where
    R: EnvironmentResolver + ?Sized,
{
    let environment_id = resolver.resolve_environment_id(environment_api_key)?;

    Some(FeatureListQuery {
        environment_id: environment_id.to_string(),
        project_id,
        page,
        page_size: PAGE_SIZE,
        search: filters.search_text().map(str::to_string),
        is_archived: filters.show_archived,
        is_enabled: filters.is_enabled,
        owners: join_ids(&filters.owners),
        group_owners: join_ids(&filters.group_owners),
        tags: join_ids(&filters.tags),
        tag_strategy: filters.tag_strategy.as_str().to_string(),
        value_search: Some(filters.value_search.clone()).filter(|s| !s.is_empty()),
        sort_field: filters.sort.sort_by.clone(),
        sort_direction: filters.sort.sort_order.api_direction().to_string(),
    })
}

/// Whether any filter narrows the list. Sort order, tag strategy and the page
/// are view settings and never count.
pub fn has_active_filters(filters: &FilterState) -> bool {
    !filters.tags.is_empty()
        || !filters.owners.is_empty()
        || !filters.group_owners.is_empty()
        || filters.show_archived
        || filters.search_text().is_some()
        || !filters.value_search.is_empty()
        || filters.is_enabled.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Environment;

    fn resolve_known(key: &str) -> Option<u64> {
        if key == "known-key" { Some(123) } else { None }
    }

    fn filtered() -> FilterState {
        FilterState {
            search: Some("checkout".to_string()),
            tags: vec![TagId::Id(3), TagId::Id(5)],
            owners: vec![11, 12],
            group_owners: vec![4],
            show_archived: true,
            sort: SortOption::from_field("created_date", SortOrder::Desc),
            ..FilterState::default()
        }
    }

    #[test]
    fn default_filters_only_write_archived_flag_and_sort() {
        let params = build_url_params(&FilterState::default(), 1);

        assert_eq!(params.get("is_archived"), Some("false"));
        assert_eq!(params.get("sortBy"), Some("name"));
        assert_eq!(params.get("sortOrder"), Some("asc"));
        assert_eq!(
            params.to_query_string(),
            "is_archived=false&sortBy=name&sortOrder=asc"
        );
        let omitted = [
            "page",
            "search",
            "tags",
            "owners",
            "group_owners",
            "value_search",
            "tag_strategy",
        ];
        for key in omitted {
            assert_eq!(params.get(key), None, "unexpected key {key}");
        }
    }

    #[test]
    fn archived_flag_is_always_a_literal() {
        let filters = FilterState {
            show_archived: true,
            ..FilterState::default()
        };
        assert_eq!(build_url_params(&filters, 1).get("is_archived"), Some("true"));
    }

    #[test]
    fn url_params_carry_non_default_fields() {
        let mut filters = filtered();
        filters.tag_strategy = TagStrategy::Union;
        filters.value_search = "blue".to_string();
        filters.is_enabled = Some(false);

        let params = build_url_params(&filters, 4);
        assert_eq!(params.get("page"), Some("4"));
        assert_eq!(params.get("search"), Some("checkout"));
        assert_eq!(params.get("tags"), Some("3,5"));
        assert_eq!(params.get("owners"), Some("11,12"));
        assert_eq!(params.get("group_owners"), Some("4"));
        assert_eq!(params.get("value_search"), Some("blue"));
        assert_eq!(params.get("tag_strategy"), Some("UNION"));
        assert_eq!(params.get("is_enabled"), Some("false"));
        assert_eq!(params.get("sortBy"), Some("created_date"));
        assert_eq!(params.get("sortOrder"), Some("desc"));
    }

    #[test]
    fn empty_search_is_left_out() {
        let filters = FilterState {
            search: Some(String::new()),
            ..FilterState::default()
        };
        assert_eq!(build_url_params(&filters, 1).get("search"), None);
    }

    #[test]
    fn url_round_trip_restores_filters() {
        let filters = filtered();
        let restored = get_filters_from_params(&build_url_params(&filters, 2));

        assert_eq!(restored.tags, filters.tags);
        assert_eq!(restored.owners, filters.owners);
        assert_eq!(restored.group_owners, filters.group_owners);
        assert_eq!(restored.search, filters.search);
        assert_eq!(restored.sort, filters.sort);
        assert_eq!(restored.show_archived, filters.show_archived);
        assert_eq!(restored.page, 2);
    }

    #[test]
    fn round_trip_survives_the_query_string() {
        let mut filters = filtered();
        filters.search = Some("a&b = c".to_string());
        filters.is_enabled = Some(true);

        let query = build_url_params(&filters, 1).to_query_string();
        let restored = get_filters_from_params(&UrlParams::parse(&query));

        assert_eq!(restored.search.as_deref(), Some("a&b = c"));
        assert_eq!(restored.is_enabled, Some(true));
        assert_eq!(restored.tags, filters.tags);
    }

    #[test]
    fn untagged_round_trips_as_an_empty_value() {
        let filters = FilterState {
            tags: vec![TagId::Untagged],
            ..FilterState::default()
        };

        let params = build_url_params(&filters, 1);
        assert_eq!(params.get("tags"), Some(""));
        assert_eq!(get_filters_from_params(&params).tags, vec![TagId::Untagged]);
    }

    #[test]
    fn stray_commas_do_not_turn_into_untagged() {
        let tags = |query: &str| get_filters_from_params(&UrlParams::parse(query)).tags;

        assert_eq!(tags("tags=1,2,"), vec![TagId::Id(1), TagId::Id(2)]);
        assert_eq!(tags("tags=1,,2"), vec![TagId::Id(1), TagId::Id(2)]);
        assert_eq!(tags("tags=,3"), vec![TagId::Id(3)]);
        assert_eq!(tags("tags=,"), Vec::<TagId>::new());
        assert_eq!(tags("tags=x"), Vec::<TagId>::new());
        assert_eq!(tags("tags="), vec![TagId::Untagged]);
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let filters = get_filters_from_params(&UrlParams::new());
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn parses_comma_separated_ids_in_order() {
        let params: UrlParams = [("tags", "1,2,3"), ("owners", "8,x,9")].into_iter().collect();
        let filters = get_filters_from_params(&params);

        assert_eq!(filters.tags, vec![TagId::Id(1), TagId::Id(2), TagId::Id(3)]);
        assert_eq!(filters.owners, vec![8, 9]);
        assert!(filters.group_owners.is_empty());
    }

    #[test]
    fn parses_page_with_fallback() {
        let page = |value: &str| {
            get_filters_from_params(&[("page", value)].into_iter().collect()).page
        };

        assert_eq!(get_filters_from_params(&UrlParams::new()).page, 1);
        assert_eq!(page("3"), 3);
        assert_eq!(page("zero"), 1);
        assert_eq!(page("0"), 1);
    }

    #[test]
    fn archived_only_parses_literal_true() {
        let parse = |value: &str| {
            get_filters_from_params(&[("is_archived", value)].into_iter().collect()).show_archived
        };
        assert!(parse("true"));
        assert!(!parse("false"));
        assert!(!parse("1"));
    }

    #[test]
    fn unknown_sort_field_gets_a_title_cased_label() {
        let params: UrlParams = [("sortBy", "num_segment_overrides"), ("sortOrder", "desc")]
            .into_iter()
            .collect();
        let sort = get_filters_from_params(&params).sort;

        assert_eq!(sort.sort_by, "num_segment_overrides");
        assert_eq!(sort.label, "Num Segment Overrides");
        assert_eq!(sort.sort_order, SortOrder::Desc);
    }

    #[test]
    fn parse_accepts_leading_question_mark() {
        let params = UrlParams::parse("?search=flag%20one&is_archived=true");
        assert_eq!(params.get("search"), Some("flag one"));
        assert_eq!(params.get("is_archived"), Some("true"));
    }

    #[test]
    fn unresolved_environment_suppresses_the_query() {
        let query = build_api_filter_params(
            &filtered(),
            1,
            "unknown-key",
            1,
            &|_: &str| -> Option<u64> { None },
        );
        assert_eq!(query, None);
    }

    #[test]
    fn api_query_uses_resolved_environment() {
        let query = build_api_filter_params(&filtered(), 3, "known-key", 42, &resolve_known)
            .expect("environment should resolve");

        assert_eq!(query.environment_id, "123");
        assert_eq!(query.project_id, 42);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, PAGE_SIZE);
        assert_eq!(query.search.as_deref(), Some("checkout"));
        assert!(query.is_archived);
        assert_eq!(query.tags.as_deref(), Some("3,5"));
        assert_eq!(query.owners.as_deref(), Some("11,12"));
        assert_eq!(query.group_owners.as_deref(), Some("4"));
        assert_eq!(query.tag_strategy, "INTERSECTION");
        assert_eq!(query.value_search, None);
        assert_eq!(query.sort_field, "created_date");
        assert_eq!(query.sort_direction, "DESC");
    }

    #[test]
    fn api_query_leaves_empty_lists_off_the_wire() {
        let query =
            build_api_filter_params(&FilterState::default(), 1, "known-key", 42, &resolve_known)
                .expect("environment should resolve");
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(json["environmentId"], "123");
        assert_eq!(json["projectId"], 42);
        assert_eq!(json["is_archived"], false);
        assert_eq!(json["sort_direction"], "ASC");
        for key in ["tags", "owners", "group_owners", "search", "is_enabled", "value_search"] {
            assert!(json.get(key).is_none(), "unexpected key {key}");
        }
    }

    #[test]
    fn directory_resolves_environment_ids() {
        let directory = EnvironmentDirectory::new(vec![Environment::new(
            77,
            "env-key".to_string(),
            "Staging".to_string(),
        )]);
        let query =
            build_api_filter_params(&FilterState::default(), 1, "env-key", 5, &directory).unwrap();
        assert_eq!(query.environment_id, "77");
    }

    #[test]
    fn defaults_have_no_active_filters() {
        assert!(!has_active_filters(&FilterState::default()));
    }

    #[test]
    fn each_filter_field_activates() {
        let defaults = FilterState::default;
        let cases = [
            FilterState {
                tags: vec![TagId::Id(1)],
                ..defaults()
            },
            FilterState {
                show_archived: true,
                ..defaults()
            },
            FilterState {
                search: Some("x".to_string()),
                ..defaults()
            },
            FilterState {
                is_enabled: Some(true),
                ..defaults()
            },
            FilterState {
                owners: vec![1],
                ..defaults()
            },
            FilterState {
                group_owners: vec![2],
                ..defaults()
            },
            FilterState {
                value_search: "v".to_string(),
                ..defaults()
            },
        ];
        for filters in cases {
            assert!(has_active_filters(&filters), "{filters:?}");
        }
    }

    #[test]
    fn view_settings_are_not_filters() {
        let filters = FilterState {
            sort: SortOption::from_field("created_date", SortOrder::Desc),
            tag_strategy: TagStrategy::Union,
            page: 7,
            search: Some(String::new()),
            ..FilterState::default()
        };
        assert!(!has_active_filters(&filters));
    }
}
