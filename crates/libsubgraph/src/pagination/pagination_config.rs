use crate::compiler::QueryDocument;
use crate::compiler::Selection;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 900;

/// How successive pages of one list field are requested.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PaginationStrategy {
    /// Numeric offset pagination (`first: 900, skip: 1800`).
    Offset {
        page_size_arg: String,
        offset_arg: String,
    },

    /// Cursor pagination: every round after the first passes the
    /// `cursor_field` value of the last item received as `cursor_arg`.
    Cursor {
        page_size_arg: String,
        cursor_arg: String,
        cursor_field: String,
    },
}
impl PaginationStrategy {
    /// The argument the strategy advances between rounds.
    pub fn position_arg(&self) -> &str {
        match self {
            Self::Offset { offset_arg, .. } => offset_arg.as_str(),
            Self::Cursor { cursor_arg, .. } => cursor_arg.as_str(),
        }
    }

    pub fn page_size_arg(&self) -> &str {
        match self {
            Self::Offset { page_size_arg, .. } | Self::Cursor { page_size_arg, .. } =>
                page_size_arg.as_str(),
        }
    }
}
impl std::default::Default for PaginationStrategy {
    fn default() -> Self {
        Self::Offset {
            page_size_arg: "first".to_string(),
            offset_arg: "skip".to_string(),
        }
    }
}

/// Which list fields are paginated, and how.
///
/// Loaded from JSON like:
///
/// ```json
/// {
///   "max_page_size": 1000,
///   "fields": {
///     "tokens": {
///       "kind": "cursor",
///       "page_size_arg": "first",
///       "cursor_arg": "after",
///       "cursor_field": "id"
///     }
///   }
/// }
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_strategy: PaginationStrategy,

    /// Overrides keyed by top-level field name.
    pub fields: IndexMap<String, PaginationStrategy>,

    /// The largest page the service returns. Receiving a full page means
    /// more items may follow.
    pub max_page_size: u32,
}
impl PaginationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The strategy the top-level `selection` of `document` is fetched page
    /// by page with, or `None` if it is fetched in a single request.
    ///
    /// A selection is paginated when its field returns a list, declares both
    /// arguments of its strategy and isn't bound a page size of 0. Cursor
    /// strategies also need the cursor field on the list's item type.
    pub fn paginates(
        &self,
        selection: &Selection<'_>,
        document: &QueryDocument<'_>,
    ) -> Option<&PaginationStrategy> {
        let field = selection.field();
        let strategy = self.strategy_for(field.name());
        if !field.returns_list()
            || field.argument(strategy.page_size_arg()).is_none()
            || field.argument(strategy.position_arg()).is_none() {
            return None;
        }
        if let Some(Value::Int(limit)) = document.bound_value(selection, strategy.page_size_arg()) {
            if *limit <= 0 {
                return None;
            }
        }
        if let PaginationStrategy::Cursor { cursor_field, .. } = strategy {
            let has_cursor_field = document.selected_type(selection)
                .is_some_and(|item_type| item_type.field(cursor_field).is_some());
            if !has_cursor_field {
                log::warn!(
                    "`{}` has no `{cursor_field}` field to paginate by; fetching it once.",
                    selection.response_key(),
                );
                return None;
            }
        }
        Some(strategy)
    }

    pub fn strategy_for(&self, field_name: &str) -> &PaginationStrategy {
        self.fields.get(field_name).unwrap_or(&self.default_strategy)
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub fn with_strategy(mut self, field_name: &str, strategy: PaginationStrategy) -> Self {
        self.fields.insert(field_name.to_string(), strategy);
        self
    }
}
impl std::default::Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_strategy: PaginationStrategy::default(),
            fields: IndexMap::new(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}
