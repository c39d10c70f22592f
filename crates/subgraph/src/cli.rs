use anyhow::Context;
use clap::CommandFactory;
use crate::commands;
use libsubgraph::pagination::PaginationConfig;
use libsubgraph::schema::Schema;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "subgraph", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        global=true,
        help="Largest page a paginated list field is fetched in. Overrides \
             the value from --pagination-config.",
        long,
    )]
    pub page_size: Option<u32>,

    #[arg(
        global=true,
        help="Path to a JSON file describing which list fields are \
             paginated and how.",
        long,
    )]
    pub pagination_config: Option<PathBuf>,

    #[arg(
        global=true,
        help="Path to a JSON introspection result for the subgraph.",
        long,
        short='s',
    )]
    pub schema: Option<PathBuf>,

    #[arg(
        global=true,
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }

    pub(crate) fn load_schema(&self) -> anyhow::Result<Schema> {
        let path = self.schema.as_ref().context(
            "This command needs an introspection result; pass one with --schema",
        )?;
        log::debug!("Loading schema from {path:#?}.");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {path:#?}"))?;
        Schema::load_str(&text).with_context(|| format!("Failed to build a schema from {path:#?}"))
    }

    pub(crate) fn pagination_config(&self) -> anyhow::Result<PaginationConfig> {
        let mut config = match &self.pagination_config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {path:#?}"))?;
                PaginationConfig::from_json_str(&text)
                    .with_context(|| format!("Invalid pagination config in {path:#?}"))?
            },
            None => PaginationConfig::default(),
        };
        if let Some(page_size) = self.page_size {
            anyhow::ensure!(page_size > 0, "--page-size must be at least 1");
            config = config.with_max_page_size(page_size);
        }
        Ok(config)
    }
}
