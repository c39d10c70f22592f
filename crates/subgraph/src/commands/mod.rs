mod compile;
mod flatten;
mod inspect;

use crate::Cli;
use crate::CommandResult;
use compile::CompileCmd;
use flatten::FlattenCmd;
use inspect::InspectCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "subgraph")]
pub(crate) enum CommandEnum {
    /// Compile dotted field paths into GraphQL documents.
    Compile(Box<CompileCmd>),

    /// Flatten a JSON response into records.
    Flatten(Box<FlattenCmd>),

    /// List the fields (or values) of a schema type.
    Inspect(Box<InspectCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Compile(cmd) => cmd.run(cli).await,
            Self::Flatten(cmd) => cmd.run(cli).await,
            Self::Inspect(cmd) => cmd.run(cli).await,
        }
    }
}
