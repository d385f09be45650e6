//! This is an example of how corkboard can be used.
//! It refreshes the current month from the backend, then prints today's board and the
//! whole month grouped by day.

use corkboard::aggregate;

mod shared;
use shared::initial_refresh;

#[tokio::main]
async fn main() {
    env_logger::init();

    let provider = initial_refresh().await;

    let today = chrono::Local::now().date_naive();
    let today_str = aggregate::format_day(today);

    println!("---- Today ({}) ----", today_str);
    let todays_tasks = provider.tasks_for_date(&today_str).await;
    corkboard::utils::print_task_list(&todays_tasks);

    let (start, end) = aggregate::month_bounds(today);
    let month_tasks = provider.tasks_between(&start, &end).await;
    let by_date = aggregate::group_by_date(&month_tasks);

    println!("---- This month ----");
    let mut days: Vec<&str> = by_date.keys().copied().collect();
    days.sort();
    for day in days {
        println!("  {}:", day);
        for task in &by_date[day] {
            corkboard::utils::print_task(task);
        }
    }
}
