use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use super::AppContext;

#[derive(Args)]
pub struct RemindersCommand {
    /// Dismiss a reminder for the rest of today
    #[arg(long, value_name = "ID")]
    dismiss: Option<String>,
}

impl RemindersCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let now = Utc::now();

        if let Some(id) = &self.dismiss {
            ctx.analytics
                .dismiss_reminder(&ctx.owner_id, id, now)
                .await?;
            println!("{} Dismissed {} for today", "✓".green(), id);
            println!();
        }

        let reminders = ctx.analytics.active_reminders(&ctx.owner_id, now).await?;
        if reminders.is_empty() {
            println!("No reminders right now.");
            return Ok(());
        }

        for reminder in reminders {
            println!("{} {}", "●".yellow(), reminder.title.bold());
            println!("  {}", reminder.message);
            println!("  {}", format!("dismiss: fittrack reminders --dismiss {}", reminder.id).dimmed());
        }

        Ok(())
    }
}
