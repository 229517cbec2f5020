use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "board-game olympics scoring and turn-order engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Generate a new turn order for the present players
    Order {
        /// Comma-separated ids of the players who are present
        #[arg(short, long, value_delimiter = ',', required = true)]
        players: Vec<String>,
        /// Order file (defaults to $ORDER_STORE_PATH or player_order.json)
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Print the last generated turn order
    Show {
        /// Order file (defaults to $ORDER_STORE_PATH or player_order.json)
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Resolve one game's scores into points and medals
    Resolve {
        /// automatic or override
        #[arg(short, long, default_value = "automatic")]
        mode: String,
        /// Score rows as player=score or player=score:medal
        #[arg(required = true)]
        rows: Vec<String>,
    },
}
