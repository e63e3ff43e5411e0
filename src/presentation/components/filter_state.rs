use crate::domain::entities::{FilterState, SortOption, TagId, TagStrategy};
use crate::domain::services::{
    build_api_filter_params, build_url_params, get_filters_from_params, has_active_filters,
    EnvironmentResolver, FeatureListQuery, UrlParams,
};

/// A partial change coming from one filter control. Unset fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    search: Option<Option<String>>,
    tags: Option<Vec<TagId>>,
    tag_strategy: Option<TagStrategy>,
    show_archived: Option<bool>,
    is_enabled: Option<Option<bool>>,
    value_search: Option<String>,
    owners: Option<Vec<u64>>,
    group_owners: Option<Vec<u64>>,
    sort: Option<SortOption>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_tag_strategy(mut self, tag_strategy: TagStrategy) -> Self {
        self.tag_strategy = Some(tag_strategy);
        self
    }

    pub fn with_show_archived(mut self, show_archived: bool) -> Self {
        self.show_archived = Some(show_archived);
        self
    }

    pub fn with_is_enabled(mut self, is_enabled: Option<bool>) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    pub fn with_value_search(mut self, value_search: String) -> Self {
        self.value_search = Some(value_search);
        self
    }

    pub fn with_owners(mut self, owners: Vec<u64>) -> Self {
        self.owners = Some(owners);
        self
    }

    pub fn with_group_owners(mut self, group_owners: Vec<u64>) -> Self {
        self.group_owners = Some(group_owners);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Owns the filter state of the feature list page for as long as the page is
/// shown, and keeps it convertible to the page URL and the list query.
pub struct FeatureFilterController {
    filters: FilterState,
}

impl FeatureFilterController {
    pub fn new() -> Self {
        Self {
            filters: FilterState::default(),
        }
    }

    /// Restores the state encoded in the page URL query.
    pub fn from_query(query: &str) -> Self {
        Self {
            filters: get_filters_from_params(&UrlParams::parse(query)),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.filters.page
    }

    /// Applies a partial update. Any change moves the list back to page 1.
    /// Returns whether the filters changed.
    pub fn set(&mut self, update: FilterUpdate) -> bool {
        let mut next = self.filters.clone();

        if let Some(search) = update.search {
            next.search = search;
        }
        if let Some(tags) = update.tags {
            next.select_tags(tags);
        }
        if let Some(tag_strategy) = update.tag_strategy {
            next.tag_strategy = tag_strategy;
        }
        if let Some(show_archived) = update.show_archived {
            next.show_archived = show_archived;
        }
        if let Some(is_enabled) = update.is_enabled {
            next.is_enabled = is_enabled;
        }
        if let Some(value_search) = update.value_search {
            next.value_search = value_search;
        }
        if let Some(owners) = update.owners {
            next.owners = owners;
        }
        if let Some(group_owners) = update.group_owners {
            next.group_owners = group_owners;
        }
        if let Some(sort) = update.sort {
            next.sort = sort;
        }

        if next == self.filters {
            return false;
        }

        next.page = 1;
        self.filters = next;
        true
    }

    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
    }

    pub fn clear(&mut self) {
        self.filters = FilterState::default();
    }

    pub fn has_active_filters(&self) -> bool {
        has_active_filters(&self.filters)
    }

    pub fn url_params(&self) -> UrlParams {
        build_url_params(&self.filters, self.filters.page)
    }

    /// Query string to write back into the address bar.
    pub fn url_query(&self) -> String {
        self.url_params().to_query_string()
    }

    pub fn api_query<R>(
        &self,
        environment_api_key: &str,
        project_id: u64,
        resolver: &R,
    ) -> Option<FeatureListQuery>
    where
        R: EnvironmentResolver + ?Sized,
    {
        build_api_filter_params(
            &self.filters,
            self.filters.page,
            environment_api_key,
            project_id,
            resolver,
        )
    }
}

impl Default for FeatureFilterController {
    fn default() -> Self {
        Self::new()
    }
}
