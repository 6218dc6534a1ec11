use anyhow::Result;
use chrono::Local;
use tracing_subscriber::EnvFilter;

use minisiakad::config::StoreConfig;
use minisiakad::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = StoreConfig {
        data_path: std::env::args_os().nth(1).map(Into::into),
    };
    let ctx = AppContext::init(&config).await?;

    let dash = ctx.dashboard(Local::now().date_naive()).await;
    println!(
        "Tugas: {} total, {} belum, {} dikerjakan, {} selesai, {} telat",
        dash.tasks.total,
        dash.tasks.todo,
        dash.tasks.in_progress,
        dash.tasks.done,
        dash.tasks.overdue
    );
    for task in &dash.upcoming {
        println!(
            "  - {} [{}] ({})",
            task.title,
            task.status.display_name(),
            task.format_deadline()
        );
    }
    println!("Pesan: {} percakapan", dash.conversations);
    if let Some(conv) = &dash.latest_conversation {
        println!(
            "  terakhir: {} - {}",
            conv.title,
            conv.last_message.as_deref().unwrap_or("")
        );
    }

    ctx.shutdown();
    Ok(())
}
