use crate::compiler::CompileError;
use crate::compiler::QueryCompiler;
use crate::compiler::QueryDocument;
use crate::field_path::FieldPath;
use crate::field_path::ObjectSelector;
use crate::normalize;
use crate::normalize::ResultRecord;
use crate::pagination::PaginationConfig;
use crate::pagination::PaginationError;
use crate::pagination::Paginator;
use crate::pagination::Transport;
use crate::resolver::ResolveError;
use crate::resolver::SyntheticFieldResolver;
use crate::schema::LookupError;
use crate::schema::Schema;
use crate::synthetic::Expr;
use crate::synthetic::SyntheticFieldError;
use crate::synthetic::SyntheticFieldRef;
use crate::synthetic::SyntheticFieldRegistry;
use serde_json::Value as JsonValue;
use thiserror::Error;

type Result<T> = std::result::Result<T, SubgraphError>;

/// One service's [`Schema`] together with the synthetic fields declared on
/// it and the pagination settings used to fetch from it.
///
/// ```ignore
/// let schema = Schema::load_str(&introspection_json)?;
/// let mut subgraph = Subgraph::new(&schema);
/// let pair = subgraph.object("Pair")?;
/// subgraph.register_synthetic("Pair", "reserveSum", add(
///     pair.path("reserve0")?,
///     pair.path("reserve1")?,
/// ))?;
///
/// let pairs = subgraph.query_root().field("pairs")?.args([("first", 10)])?;
/// let rows = subgraph.fetch_rows(&[
///     pairs.clone().field("id")?,
///     pairs.synthetic(subgraph.registry(), "reserveSum")?,
/// ], &transport)?;
/// ```
#[derive(Debug)]
pub struct Subgraph<'schema> {
    paginator: Paginator,
    registry: SyntheticFieldRegistry<'schema>,
    schema: &'schema Schema,
}
impl<'schema> Subgraph<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            paginator: Paginator::default(),
            registry: SyntheticFieldRegistry::new(schema),
            schema,
        }
    }

    /// Compile `paths` into one document per root type.
    pub fn compile(&self, paths: &[FieldPath<'schema>]) -> Result<Vec<QueryDocument<'schema>>> {
        Ok(QueryCompiler::new(self.schema, &self.registry).compile(paths)?)
    }

    /// Compile `paths`, fetch every resulting document (in parallel, each
    /// paginated to exhaustion) and compute the requested synthetic fields.
    /// Returns the merged `data` object of each document, holding only the
    /// fields `paths` name: dependencies of synthetic fields and cursor
    /// fields added for pagination are dropped.
    ///
    /// A failing document doesn't discard the others. With more than one
    /// document, failures are reported as [`SubgraphError::PartialFetch`]
    /// carrying the data of every document that succeeded.
    pub fn fetch_data<T: Transport + Sync>(
        &self,
        paths: &[FieldPath<'schema>],
        transport: &T,
    ) -> Result<Vec<JsonValue>> {
        let documents = self.compile(paths)?;
        let resolver = SyntheticFieldResolver::new(&self.registry);
        let responses = self.paginator.execute_documents(&documents, transport);

        let mut data = Vec::with_capacity(documents.len());
        let mut failures = vec![];
        for (document, response) in documents.iter().zip(responses) {
            let resolved = response.map_err(SubgraphError::from).and_then(|response| {
                let mut document_data = response.into_data();
                resolver.resolve_document(&mut document_data, document)?;
                Ok(document_data)
            });
            match resolved {
                Ok(mut document_data) => {
                    let keys = requested_keys(document);
                    let keys = keys.iter().map(Vec::as_slice).collect::<Vec<_>>();
                    project(&mut document_data, &keys);
                    data.push(Some(document_data));
                },
                Err(err) => {
                    log::warn!(
                        "Fetching the {} document on `{}` failed: {err}",
                        document.operation(),
                        document.root_type().name(),
                    );
                    data.push(None);
                    failures.push(err);
                },
            }
        }

        if failures.is_empty() {
            return Ok(data.into_iter().flatten().collect());
        }
        if documents.len() == 1 {
            return Err(failures.remove(0));
        }
        Err(SubgraphError::PartialFetch { data, failures })
    }

    /// Like [`fetch_data()`](Self::fetch_data), but normalized into flat
    /// rows (see [`normalize::rows()`]) keyed by the dotted response path of
    /// each requested field.
    pub fn fetch_rows<T: Transport + Sync>(
        &self,
        paths: &[FieldPath<'schema>],
        transport: &T,
    ) -> Result<Vec<ResultRecord>> {
        Ok(self.fetch_data(paths, transport)?
            .iter()
            .flat_map(normalize::rows)
            .collect())
    }

    pub fn object(&self, type_name: &str) -> std::result::Result<ObjectSelector<'schema>, LookupError> {
        self.schema.object(type_name)
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn query_root(&self) -> ObjectSelector<'schema> {
        self.schema.query_root()
    }

    /// Declare a synthetic field. See [`SyntheticFieldRegistry::register()`].
    pub fn register_synthetic(
        &mut self,
        owner_type_name: &str,
        field_name: &str,
        expr: Expr<'schema>,
    ) -> std::result::Result<SyntheticFieldRef<'schema>, SyntheticFieldError> {
        self.registry.register(owner_type_name, field_name, expr)
    }

    pub fn registry(&self) -> &SyntheticFieldRegistry<'schema> {
        &self.registry
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    pub fn with_pagination_config(mut self, config: PaginationConfig) -> Self {
        self.paginator = Paginator::new(config);
        self
    }
}

#[derive(Debug, Error)]
pub enum SubgraphError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Some of several documents failed. `data` has one entry per document,
    /// in compile order, `None` where that document failed.
    #[error(
        "{} of {} documents failed; first failure: {}",
        .failures.len(),
        .data.len(),
        first_failure(.failures),
    )]
    PartialFetch {
        data: Vec<Option<JsonValue>>,
        failures: Vec<SubgraphError>,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

fn first_failure(failures: &[SubgraphError]) -> String {
    failures.first().map(ToString::to_string).unwrap_or_default()
}

/// The response key path of every field `document` was compiled from,
/// synthetic leaves included.
fn requested_keys(document: &QueryDocument<'_>) -> Vec<Vec<String>> {
    document.requested_paths()
        .iter()
        .map(|path| {
            let mut keys = document.response_keys(path);
            if let Some(leaf) = path.leaf().filter(|step| step.as_synthetic_ref().is_some()) {
                keys.push(leaf.name().to_string());
            }
            keys
        })
        .collect()
}

/// Drop every member of `value` that isn't on, or under, one of `keys`.
fn project(value: &mut JsonValue, keys: &[&[String]]) {
    if keys.iter().any(|key| key.is_empty()) {
        return;
    }
    match value {
        JsonValue::Object(map) => map.retain(|name, child| {
            let tails = keys.iter()
                .filter_map(|key| match key.split_first() {
                    Some((head, tail)) if head == name => Some(tail),
                    _ => None,
                })
                .collect::<Vec<_>>();
            if tails.is_empty() {
                return false;
            }
            project(child, &tails);
            true
        }),
        JsonValue::Array(items) => {
            for item in items {
                project(item, keys);
            }
        },
        _ => (),
    }
}
