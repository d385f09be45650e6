//! This is an example of how corkboard can be used.
//! This binary simply toggles the completion flag of all of today's tasks.

use std::error::Error;

use corkboard::aggregate;
use corkboard::utils::pause;
use corkboard::RestProvider;

mod shared;
use shared::initial_refresh;

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example shows how to toggle tasks through a Provider, so that the change hits the backend and the local cache alike.");
    println!("You can set the RUST_LOG environment variable to display more info about the requests.");
    println!("");
    pause();

    let mut provider = initial_refresh().await;

    toggle_todays_tasks(&mut provider).await.unwrap();
}

async fn toggle_todays_tasks(provider: &mut RestProvider) -> Result<(), Box<dyn Error>> {
    let today = aggregate::format_day(chrono::Local::now().date_naive());
    let tasks = provider.tasks_for_date(&today).await;

    let mut n_toggled = 0;
    for task in tasks {
        provider.set_completion(task.id(), task.completed() == false).await?;
        n_toggled += 1;
    }

    println!("{} tasks toggled.", n_toggled);
    provider.local().save_to_file();

    Ok(())
}
