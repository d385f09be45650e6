//! This is an example of how corkboard can be used.
//! It prints the data behind the statistics view: the 30-day daily activity and the
//! completed/pending split.

use chrono::Duration;

use corkboard::aggregate::{self, ROLLING_WINDOW_DAYS};

mod shared;
use shared::initial_refresh;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut provider = initial_refresh().await;

    // The rolling window usually reaches back into the previous month, refresh it as well
    let today = chrono::Local::now().date_naive();
    let start = aggregate::format_day(today - Duration::days(ROLLING_WINDOW_DAYS as i64 - 1));
    let end = aggregate::format_day(today);
    provider.refresh(&start, &end).await;

    println!("---- Daily activity, last {} days ----", ROLLING_WINDOW_DAYS);
    let stats = provider.daily_stats(today).await;
    for stat in &stats {
        let done = "#".repeat(stat.completed as usize);
        let open = "-".repeat((stat.total - stat.completed) as usize);
        println!("  {}  {:>2} tasks  {}{}", stat.date, stat.total, done, open);
    }

    println!("---- Completion status ----");
    let summary = provider.completion_summary(&start, &end).await;
    println!("  completed: {}", summary.completed);
    println!("  pending:   {}", summary.pending);
}
