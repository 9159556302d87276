use anyhow::{Context as _, Result};
use clap::Args;
use tokio::runtime::Handle;

use super::Context;
use crate::ui::{App, Dashboard, Route};

#[derive(Args)]
pub struct DashboardCommand {
    /// Route to open on, e.g. /leaderboard (defaults to ui.default_route)
    #[arg(long)]
    route: Option<String>,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let wanted = self
            .route
            .unwrap_or_else(|| ctx.config.ui.default_route.clone());
        let route = Route::from_path(&wanted).with_context(|| {
            let known: Vec<&str> = Route::ALL.iter().map(|r| r.path()).collect();
            format!("Unknown route {}. Expected one of: {}", wanted, known.join(", "))
        })?;

        let client = ctx.client()?;
        let dates = ctx.dates.clone();
        let runtime = Handle::current();

        // The event loop blocks on terminal input; loads run on the runtime.
        tokio::task::spawn_blocking(move || -> Result<()> {
            let app = App::new(client, runtime, route, dates);
            let mut dashboard = Dashboard::new(app)?;
            dashboard.run()
        })
        .await
        .context("Dashboard task panicked")?
    }
}
