use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libsubgraph::schema::Schema;
use libsubgraph::types::TypeKind;
use std::fmt::Write;

#[derive(Debug, clap::Args)]
pub(crate) struct InspectCmd {
    #[arg(
        help="Name of the type to describe. Lists every type when omitted.",
        name="TYPE_NAME",
    )]
    type_name: Option<String>,
}
impl InspectCmd {
    fn describe(&self, schema: &Schema) -> anyhow::Result<String> {
        let Some(type_name) = &self.type_name else {
            return Ok(schema.all_types()
                .values()
                .map(|schema_type| format!("{} ({})", schema_type.name(), schema_type.kind().name()))
                .collect::<Vec<_>>()
                .join("\n"));
        };

        let schema_type = schema.resolve_type(type_name)?;
        let mut out = format!("{} ({})", schema_type.name(), schema_type.kind().name());
        let interfaces = schema_type.interface_names();
        if !interfaces.is_empty() {
            write!(out, " implements {}", interfaces.join(" & "))?;
        }
        if let Some(description) = schema_type.description() {
            write!(out, "\n  \"{description}\"")?;
        }

        match schema_type.kind() {
            TypeKind::Interface | TypeKind::Object => {
                for field in schema_type.fields().values() {
                    let args = field.arguments()
                        .values()
                        .map(|arg| format!("{}: {}", arg.name(), arg.type_annotation()))
                        .collect::<Vec<_>>();
                    let args = if args.is_empty() {
                        String::new()
                    } else {
                        format!("({})", args.join(", "))
                    };
                    let deprecated = if field.is_deprecated() { " @deprecated" } else { "" };
                    write!(out, "\n  {}{args}: {}{deprecated}", field.name(), field.type_annotation())?;
                }
                if schema_type.kind() == TypeKind::Interface {
                    write!(out, "\n  possible types: {}", schema_type.possible_type_names().join(", "))?;
                }
            },
            TypeKind::InputObject => {
                for input_field in schema_type.input_fields().values() {
                    write!(out, "\n  {}: {}", input_field.name(), input_field.type_annotation())?;
                }
            },
            TypeKind::Enum => {
                for value in schema_type.enum_values() {
                    write!(out, "\n  {value}")?;
                }
            },
            TypeKind::Union => {
                write!(out, "\n  = {}", schema_type.possible_type_names().join(" | "))?;
            },
            TypeKind::Scalar => {
                let scalar_kind = schema_type.scalar_kind()
                    .context("scalar type without a scalar kind")?;
                write!(out, "\n  values are read as {scalar_kind}")?;
            },
        }
        Ok(out)
    }
}

#[inherent::inherent]
impl RunnableCommand for InspectCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let result = cli.load_schema().and_then(|schema| self.describe(&schema));
        result.into()
    }
}
