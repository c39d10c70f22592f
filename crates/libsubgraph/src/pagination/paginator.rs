use crate::compiler::QueryDocument;
use crate::pagination::CancellationToken;
use crate::pagination::PageState;
use crate::pagination::PaginatedResponse;
use crate::pagination::PaginationConfig;
use crate::pagination::PaginationError;
use crate::pagination::PaginationStrategy;
use crate::pagination::Transport;
use crate::value::Value;
use rayon::prelude::*;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;

type Result<T> = std::result::Result<T, PaginationError>;

/// Executes [`QueryDocument`]s, following list fields across as many rounds
/// as the service needs to return all of their items.
///
/// A top-level selection is paginated when
/// [`PaginationConfig::paginates`] says it is. Every
/// round requests the next page of each unexhausted paginated field in a
/// single transport call; exhausted fields are left out of later rounds, as
/// are non-paginated selections after the first round. A field is exhausted
/// once a round returns fewer items than were requested (or no list at all),
/// or once a caller-bound page-size argument's total has been fetched.
///
/// A caller-bound page-size argument is treated as the total number of items
/// wanted; a caller-bound offset or cursor is where pagination starts.
#[derive(Clone, Debug, Default)]
pub struct Paginator {
    config: PaginationConfig,
}
impl Paginator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Run independent documents in parallel. Each keeps its own page state;
    /// results are returned in input order.
    pub fn execute_documents<T: Transport + Sync>(
        &self,
        documents: &[QueryDocument<'_>],
        transport: &T,
    ) -> Vec<Result<PaginatedResponse>> {
        documents.par_iter()
            .map(|document| self.execute_paginated(document, transport))
            .collect()
    }

    pub fn execute_paginated(
        &self,
        document: &QueryDocument<'_>,
        transport: &dyn Transport,
    ) -> Result<PaginatedResponse> {
        self.execute_paginated_with_cancel(document, transport, &CancellationToken::new())
    }

    /// Like [`execute_paginated()`](Self::execute_paginated), but checks
    /// `cancel` before every round. Cancelling is not an error: the response
    /// holds everything merged so far and reports
    /// [`cancelled()`](PaginatedResponse::cancelled).
    pub fn execute_paginated_with_cancel(
        &self,
        document: &QueryDocument<'_>,
        transport: &dyn Transport,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResponse> {
        let mut base = document.clone();
        let mut states = self.plan(&mut base);
        let response_keys = base.selections()
            .iter()
            .map(|selection| selection.response_key().to_string())
            .collect::<Vec<_>>();
        let mut unpaginated = JsonMap::new();
        let mut rounds = 0;

        loop {
            if cancel.is_cancelled() {
                log::debug!("Pagination cancelled after {rounds} rounds.");
                return Ok(merge(&response_keys, unpaginated, &states, rounds, true, false));
            }

            let active = states.iter()
                .filter(|state| !state.exhausted)
                .map(|state| state.selection_index)
                .collect::<Vec<_>>();
            if rounds > 0 && active.is_empty() {
                break;
            }
            rounds += 1;

            let mut round_doc = base.clone();
            let mut requested = vec![0; states.len()];
            for (state, requested) in states.iter().zip(requested.iter_mut()) {
                if state.exhausted {
                    continue;
                }
                *requested = state.next_page_size();
                round_doc.bind_top_level_argument(
                    state.selection_index,
                    state.strategy.page_size_arg(),
                    Value::Int(i64::from(*requested)),
                );
                match &state.strategy {
                    PaginationStrategy::Offset { offset_arg, .. } => round_doc.bind_top_level_argument(
                        state.selection_index,
                        offset_arg,
                        Value::Int(i64::try_from(state.offset).unwrap_or(i64::MAX)),
                    ),
                    PaginationStrategy::Cursor { cursor_arg, .. } => if let Some(cursor) = &state.cursor {
                        round_doc.bind_top_level_argument(
                            state.selection_index,
                            cursor_arg,
                            Value::from_json(cursor),
                        );
                    },
                }
            }
            let is_first_round = rounds == 1;
            round_doc.retain_top_level(|idx| {
                if states.iter().any(|state| state.selection_index == idx) {
                    active.contains(&idx)
                } else {
                    is_first_round
                }
            });

            log::debug!(
                "Pagination round {rounds}: {} paginated fields still active.",
                active.len(),
            );
            let variables = round_doc.variables_json();
            log::trace!("Round {rounds} variables: {variables:?}");
            let response = match transport.execute(&round_doc.to_graphql_string(), &variables) {
                Ok(response) => response,
                Err(source) => {
                    log::debug!("Transport failed on pagination round {rounds}: {source}");
                    let partial = merge(&response_keys, unpaginated, &states, rounds, false, true);
                    return Err(PaginationError::Transport {
                        partial: Box::new(partial),
                        round: rounds,
                        source,
                    });
                },
            };

            if is_first_round {
                for (idx, key) in response_keys.iter().enumerate() {
                    if !states.iter().any(|state| state.selection_index == idx) {
                        unpaginated.insert(
                            key.to_owned(),
                            response.get(key).cloned().unwrap_or(JsonValue::Null),
                        );
                    }
                }
            }
            for (state, requested) in states.iter_mut().zip(requested) {
                if !state.exhausted {
                    let page = response.get(state.response_key.as_str());
                    state.record_page(page, requested);
                }
            }
        }

        log::debug!("Pagination finished after {rounds} rounds.");
        Ok(merge(&response_keys, unpaginated, &states, rounds, false, false))
    }

    /// Find the paginatable top-level selections of `document`, adding a
    /// cursor field to the selection where the strategy needs one.
    fn plan(&self, document: &mut QueryDocument<'_>) -> Vec<PageState> {
        let mut states = vec![];
        for idx in 0..document.selections().len() {
            let selection = &document.selections()[idx];
            let Some(strategy) = self.config.paginates(selection, document) else {
                continue;
            };
            let strategy = strategy.clone();
            let limit = match document.bound_value(selection, strategy.page_size_arg()) {
                Some(Value::Int(limit)) => Some(u64::try_from(*limit).unwrap_or(0)),
                _ => None,
            };
            let start = document.bound_value(selection, strategy.position_arg()).cloned();

            let mut state = PageState::new(
                idx,
                selection.response_key().to_string(),
                strategy,
                self.config.max_page_size,
            );
            state.limit = limit;
            match (&state.strategy, start) {
                (PaginationStrategy::Offset { .. }, Some(Value::Int(offset))) =>
                    state.offset = u64::try_from(offset).unwrap_or(0),
                (PaginationStrategy::Cursor { .. }, Some(cursor)) if !cursor.is_null() =>
                    state.cursor = Some(cursor.to_json()),
                _ => (),
            }

            if let PaginationStrategy::Cursor { cursor_field, .. } = &state.strategy {
                let cursor_field = cursor_field.to_owned();
                match document.ensure_top_level_child(idx, &cursor_field) {
                    Some(cursor_key) => state.cursor_key = Some(cursor_key),
                    None => continue,
                }
            }

            log::debug!(
                "Paginating `{}` by {:?} (max page size {}).",
                state.response_key,
                state.strategy,
                state.max_page_size,
            );
            states.push(state);
        }
        states
    }
}

/// Assemble the `data` object in top-level selection order.
///
/// Unexhausted fields contribute the pages received so far, unless the fetch
/// `failed`, in which case they are left out.
fn merge(
    response_keys: &[String],
    mut unpaginated: JsonMap<String, JsonValue>,
    states: &[PageState],
    rounds: usize,
    cancelled: bool,
    failed: bool,
) -> PaginatedResponse {
    let mut data = JsonMap::new();
    for (idx, key) in response_keys.iter().enumerate() {
        match states.iter().find(|state| state.selection_index == idx) {
            Some(state) if state.exhausted || !failed =>
                data.insert(key.to_owned(), JsonValue::Array(state.items.clone())),
            Some(_) => None,
            None => unpaginated.remove(key).and_then(|value| data.insert(key.to_owned(), value)),
        };
    }
    PaginatedResponse {
        cancelled,
        data: JsonValue::Object(data),
        rounds,
    }
}
