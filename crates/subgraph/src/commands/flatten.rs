use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libsubgraph::normalize;
use libsubgraph::normalize::ResultRecord;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct FlattenCmd {
    #[arg(
        help="Path to a JSON response. Either the full response (with a \
             `data` member) or just its data.",
        name="RESPONSE_PATH",
    )]
    response_path: PathBuf,

    #[arg(
        help="Emit one record per logical row, expanding lists of objects, \
             instead of a single indexed record.",
        long,
    )]
    rows: bool,
}
impl FlattenCmd {
    fn flatten(&self) -> anyhow::Result<String> {
        let text = std::fs::read_to_string(&self.response_path)
            .with_context(|| format!("Failed to read {:#?}", self.response_path))?;
        let mut response: JsonValue = serde_json::from_str(&text)
            .with_context(|| format!("{:#?} is not valid JSON", self.response_path))?;

        if let Some(errors) = response.get("errors").and_then(JsonValue::as_array) {
            log::warn!("The response carries {} GraphQL errors.", errors.len());
        }
        let data = match response.get_mut("data") {
            Some(data) => data.take(),
            None => response,
        };

        let records = if self.rows {
            normalize::rows(&data)
        } else {
            vec![normalize::flatten(&data)]
        };
        log::debug!("Flattened the response into {} records.", records.len());

        let lines = records.into_iter()
            .map(|record| serde_json::to_string(&to_json_object(record)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}

fn to_json_object(record: ResultRecord) -> JsonValue {
    JsonValue::Object(record.into_iter().collect())
}

#[inherent::inherent]
impl RunnableCommand for FlattenCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        self.flatten().into()
    }
}
