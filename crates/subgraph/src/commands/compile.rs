use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libsubgraph::Subgraph;
use libsubgraph::Value;
use libsubgraph::field_path::FieldPath;
use libsubgraph::pagination::PaginationStrategy;
use libsubgraph::schema::Schema;
use serde_json::Value as JsonValue;
use std::fmt::Write;

#[derive(Debug, clap::Args)]
pub(crate) struct CompileCmd {
    #[arg(
        help="Bind an argument on one step of a path, as \
             `STEP_PATH.ARG=JSON` (e.g. `pairs.first=10` or \
             `pairs.where={\"token0\":\"0xabc\"}`). Values that aren't \
             valid JSON are bound as strings.",
        long="arg",
        short='a',
    )]
    args: Vec<String>,

    #[arg(
        help="Dotted field paths to select, e.g. `pairs.token0.symbol`.",
        name="FIELD_PATHS",
        required=true,
    )]
    paths: Vec<String>,

    #[arg(
        default_value="Query",
        help="The root type the field paths start at (`Query` or the \
             schema's subscription type).",
        long,
    )]
    root: String,
}
impl CompileCmd {
    fn compile(&self, cli: &Cli) -> anyhow::Result<String> {
        let schema = cli.load_schema()?;
        let subgraph = Subgraph::new(&schema).with_pagination_config(cli.pagination_config()?);
        let bindings = self.parse_bindings()?;

        let paths = self.paths.iter()
            .map(|dotted| build_path(&schema, &self.root, dotted, &bindings))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let documents = subgraph.compile(&paths)?;
        log::debug!("Compiled {} paths into {} documents.", paths.len(), documents.len());

        let config = subgraph.paginator().config();
        let mut out = String::new();
        for document in &documents {
            write!(out, "{}", document.to_graphql_string())?;
            let variables = JsonValue::Object(document.variables_json());
            writeln!(out, "# variables: {variables}")?;

            for selection in document.selections() {
                let Some(strategy) = config.paginates(selection, document) else {
                    continue;
                };
                let how = match strategy {
                    PaginationStrategy::Offset { page_size_arg, offset_arg } =>
                        format!("offset ({page_size_arg}/{offset_arg})"),
                    PaginationStrategy::Cursor { page_size_arg, cursor_arg, cursor_field } =>
                        format!("cursor ({page_size_arg}/{cursor_arg} from `{cursor_field}`)"),
                };
                writeln!(
                    out,
                    "# `{}` is paginated by {how} in pages of up to {}",
                    selection.response_key(),
                    config.max_page_size,
                )?;
            }
        }
        Ok(out.trim_end().to_string())
    }

    /// `(step path, argument name, value)` for each `--arg`.
    fn parse_bindings(&self) -> anyhow::Result<Vec<(String, String, Value)>> {
        self.args.iter()
            .map(|binding| {
                let (target, raw) = binding.split_once('=')
                    .with_context(|| format!("`{binding}` is not of the form `STEP_PATH.ARG=VALUE`"))?;
                let (step_path, arg_name) = target.rsplit_once('.')
                    .with_context(|| format!("`{target}` does not name a step and an argument"))?;
                let value = match serde_json::from_str::<JsonValue>(raw) {
                    Ok(json) => Value::from_json(&json),
                    Err(_) => Value::from(raw),
                };
                Ok((step_path.to_string(), arg_name.to_string(), value))
            })
            .collect()
    }
}

fn build_path<'schema>(
    schema: &'schema Schema,
    root: &str,
    dotted: &str,
    bindings: &[(String, String, Value)],
) -> anyhow::Result<FieldPath<'schema>> {
    let mut names = dotted.split('.');
    let first = names.next().context("empty field path")?;
    let mut path = schema.object(root)?.field(first)?;
    let mut step_path = first.to_string();
    loop {
        let step_args = bindings.iter()
            .filter(|(target, _, _)| *target == step_path)
            .map(|(_, name, value)| (name.as_str(), value.clone()))
            .collect::<Vec<_>>();
        if !step_args.is_empty() {
            path = path.args(step_args)?;
        }

        let Some(name) = names.next() else {
            break;
        };
        path = path.field(name)?;
        step_path = format!("{step_path}.{name}");
    }
    Ok(path)
}

#[inherent::inherent]
impl RunnableCommand for CompileCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        self.compile(&cli).into()
    }
}
