use anyhow::Result;
use clap::Args;

use crate::config::AppConfig;

#[derive(Args, Clone)]
pub struct VersionArgs {}

pub struct VersionCommand {
    _args: VersionArgs,
}

impl VersionCommand {
    pub fn new(args: VersionArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        println!("stockdesk {}", env!("CARGO_PKG_VERSION"));
        println!("backend: {}", config.api_url);
        Ok(())
    }
}
