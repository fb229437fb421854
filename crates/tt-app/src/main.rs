//! Command line entry point

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tt_core::{DragSnapController, DropOutcome, GridGeometry, ScheduleBoardStore, Translation};
use tt_data::{CatalogConfig, CatalogLoader, JsonFileSource, NoScroll, ScheduleFilterEngine, SearchSession};

mod cli;
mod render;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CatalogConfig::load(path)
            .await
            .with_context(|| format!("Failed to read catalog config {:?}", path))?,
        None => CatalogConfig::with_root(&args.catalog),
    };

    let source = Arc::new(JsonFileSource::new(&config.root));
    let loader = CatalogLoader::new(source, config);
    let catalog = loader
        .load_all()
        .await
        .context("Failed to load the course catalog")?;

    let store = ScheduleBoardStore::with_default_table();
    let target = store
        .table_ids()
        .into_iter()
        .next()
        .context("Board store started without a table")?;

    let mut session = SearchSession::new(target.clone(), catalog, Arc::new(ScheduleFilterEngine::new()));
    session.set_options(args.search_options(), &mut NoScroll);
    for _ in 1..args.pages {
        session.on_sentinel_visible();
    }

    info!(
        "{} of {} matching lectures shown",
        session.visible().len(),
        session.results().len()
    );
    print!("{}", render::results_table(session.visible()));

    let picked: Vec<_> = session.visible().iter().take(args.add).cloned().collect();
    for lecture in &picked {
        if session.add_to_board(&store, lecture) == 0 {
            warn!("Lecture {} has no schedule to place", lecture.id);
        }
    }

    if args.duplicate {
        store.duplicate_table(&target);
    }

    if let (Some(id), Some(dx)) = (args.drag.clone(), args.dx) {
        let controller = DragSnapController::new(GridGeometry::default());
        if controller.start(id.clone(), &store) {
            match controller.commit(Translation::new(dx, args.dy), &store) {
                DropOutcome::Moved { delta, .. } => {
                    info!("Moved {} by {} day(s), {} period(s)", id, delta.days, delta.periods)
                }
                outcome => info!("Drop of {} left the board unchanged: {:?}", id, outcome),
            }
        }
    }

    let boards = store.boards();
    let active = store.active_drag_table();
    for (id, board) in boards.iter() {
        println!();
        print!("{}", render::board(id, board, active.as_ref()));
    }

    Ok(())
}
