use std::fmt;

/// A selected tag. `Untagged` matches features carrying no tag at all and is
/// rendered as the empty string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    Id(u64),
    Untagged,
}

impl TagId {
    /// Parses one numeric segment of a tag list. `Untagged` is only ever the
    /// whole value, so an empty segment is not a tag.
    pub fn parse(segment: &str) -> Option<Self> {
        segment.trim().parse().ok().map(TagId::Id)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagId::Id(id) => write!(f, "{}", id),
            TagId::Untagged => Ok(()),
        }
    }
}

/// Collapses a selection containing `Untagged` down to `[Untagged]`.
pub fn normalize_tags(tags: Vec<TagId>) -> Vec<TagId> {
    if tags.contains(&TagId::Untagged) {
        vec![TagId::Untagged]
    } else {
        tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagStrategy {
    #[default]
    Intersection,
    Union,
}

impl TagStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStrategy::Intersection => "INTERSECTION",
            TagStrategy::Union => "UNION",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("UNION") {
            TagStrategy::Union
        } else {
            TagStrategy::Intersection
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Only the literal `desc` selects descending order.
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn api_direction(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub const DEFAULT_SORT_FIELD: &str = "name";

const KNOWN_SORT_LABELS: &[(&str, &str)] = &[("name", "Name"), ("created_date", "Created Date")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub label: String,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl SortOption {
    pub fn from_field(sort_by: &str, sort_order: SortOrder) -> Self {
        let label = KNOWN_SORT_LABELS
            .iter()
            .find(|(field, _)| *field == sort_by)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| title_case(sort_by));

        Self {
            label,
            sort_by: sort_by.to_string(),
            sort_order,
        }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self::from_field(DEFAULT_SORT_FIELD, SortOrder::Asc)
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// In-memory filter state of the feature list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: Option<String>,
    pub tags: Vec<TagId>,
    pub tag_strategy: TagStrategy,
    pub show_archived: bool,
    pub is_enabled: Option<bool>,
    pub value_search: String,
    pub owners: Vec<u64>,
    pub group_owners: Vec<u64>,
    pub sort: SortOption,
    pub page: u32,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            search: None,
            tags: Vec::new(),
            tag_strategy: TagStrategy::default(),
            show_archived: false,
            is_enabled: None,
            value_search: String::new(),
            owners: Vec::new(),
            group_owners: Vec::new(),
            sort: SortOption::default(),
            page: 1,
        }
    }

    pub fn select_tags(&mut self, tags: Vec<TagId>) {
        self.tags = normalize_tags(tags);
    }

    /// The search text, treating an empty string the same as no search.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
