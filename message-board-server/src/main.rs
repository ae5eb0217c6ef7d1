use crate::commandline::Commandline;
use crate::error::MessageBoardError;
use clap::Parser;

mod commandline;
mod configuration;
mod context;
mod database;
mod error;
mod message;
mod server;
mod types;
#[cfg(test)]
mod utils;

#[tokio::main]
async fn main() -> Result<(), MessageBoardError> {
	Commandline::parse().run().await
}
