use anyhow::Result;
use clap::Args;

use super::AppContext;
use crate::ui::Dashboard;

#[derive(Args)]
pub struct DashboardCommand {
    /// Chart window in days (defaults to analytics.default_window_days)
    #[arg(short, long)]
    days: Option<i64>,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let days = self
            .days
            .unwrap_or(ctx.config.analytics.default_window_days);

        let mut dashboard = Dashboard::new(ctx, days).await?;
        let result = dashboard.run(ctx).await;
        dashboard.cleanup()?;
        result
    }
}
