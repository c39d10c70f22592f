use crate::pagination::PaginationStrategy;
use serde_json::Value as JsonValue;

/// Progress through the pages of one paginated top-level selection.
#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    pub(crate) cursor: Option<JsonValue>,
    pub(crate) cursor_key: Option<String>,
    pub(crate) exhausted: bool,
    pub(crate) fetched: u64,
    pub(crate) items: Vec<JsonValue>,
    pub(crate) limit: Option<u64>,
    pub(crate) max_page_size: u32,
    pub(crate) offset: u64,
    pub(crate) response_key: String,
    pub(crate) selection_index: usize,
    pub(crate) strategy: PaginationStrategy,
}
impl PageState {
    pub(crate) fn new(
        selection_index: usize,
        response_key: String,
        strategy: PaginationStrategy,
        max_page_size: u32,
    ) -> Self {
        Self {
            cursor: None,
            cursor_key: None,
            exhausted: false,
            fetched: 0,
            items: vec![],
            limit: None,
            max_page_size: max_page_size.max(1),
            offset: 0,
            response_key,
            selection_index,
            strategy,
        }
    }

    /// The cursor the next round will pass, if any.
    pub fn cursor(&self) -> Option<&JsonValue> {
        self.cursor.as_ref()
    }

    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Items requested by a caller-bound page-size argument, if any. The
    /// field is exhausted once this many have been fetched.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// The page size the next round will request.
    pub fn next_page_size(&self) -> u32 {
        match self.limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(self.fetched);
                u32::try_from(remaining)
                    .unwrap_or(u32::MAX)
                    .min(self.max_page_size)
            },
            None => self.max_page_size,
        }
    }

    /// The offset the next round will pass (offset strategy only).
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn response_key(&self) -> &str {
        self.response_key.as_str()
    }

    /// Fold one round's result for this field into the state.
    pub(crate) fn record_page(&mut self, page: Option<&JsonValue>, requested: u32) {
        let Some(JsonValue::Array(items)) = page else {
            log::debug!(
                "`{}` returned no list; treating it as exhausted.",
                self.response_key,
            );
            self.exhausted = true;
            return;
        };

        let received = items.len() as u64;
        self.fetched += received;
        self.offset += received;
        if let Some(cursor_key) = &self.cursor_key {
            self.cursor = items.last()
                .and_then(|item| item.get(cursor_key))
                .filter(|cursor| !cursor.is_null())
                .cloned();
            if self.cursor.is_none() && !items.is_empty() {
                log::warn!(
                    "The last item of `{}` has no `{cursor_key}` value to resume \
                    from; stopping pagination of this field.",
                    self.response_key,
                );
                self.exhausted = true;
            }
        }
        self.items.extend(items.iter().cloned());

        if received < u64::from(requested)
            || self.limit.is_some_and(|limit| self.fetched >= limit) {
            self.exhausted = true;
        }
        log::trace!(
            "`{}` received {received} items ({} total, exhausted: {}).",
            self.response_key,
            self.fetched,
            self.exhausted,
        );
    }
}
