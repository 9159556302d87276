use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{output, Context};
use crate::views::table::loading_message;
use crate::views::{build_table, ResourceView, Tabular, ViewState};

/// Spinner shown on stderr while a collection loads
pub(super) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Fetch one collection and print it. The error state fails the command.
pub async fn show<T>(ctx: &Context) -> Result<()>
where
    T: Tabular + DeserializeOwned + Send + 'static,
{
    let client = ctx.client()?;
    let view: ResourceView<T> = ResourceView::new(T::RESOURCE);

    let pb = spinner(loading_message(T::RESOURCE));
    view.load(&client).await;
    pb.finish_and_clear();

    view.with_state(|state| match state {
        ViewState::Loaded(records) => {
            output::print_table(&build_table(records, &ctx.dates));
            Ok(())
        }
        ViewState::Failed(message) => Err(anyhow::anyhow!("{}", message)),
        ViewState::Loading => Err(anyhow::anyhow!("{} did not finish loading", T::RESOURCE)),
    })
}
