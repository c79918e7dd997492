//! Slice command - cut one image into tiles and upload them.

use imageslicer::export::ExportReport;
use imageslicer::service::{SliceRequest, SliceResponse};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::common::{resolve_config, Overrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the slice command.
pub struct SliceArgs {
    pub image_url: String,
    pub grid_size: Option<u32>,
    pub border_inset: Option<u32>,
    pub overrides: Overrides,
    pub json: bool,
    pub debug: bool,
    pub verbose: bool,
}

/// Run the slice command.
pub fn run(args: SliceArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.debug, args.verbose)?;
    runner.log_startup("slice");

    let config = resolve_config(runner.config(), args.overrides)?;
    let service = runner.create_service(&config)?;

    let mut request = SliceRequest::new(args.image_url);
    request.grid_size = args.grid_size;
    request.border_inset = args.border_inset;

    let start = std::time::Instant::now();

    let report = runner.block_on(async {
        let cancellation = CancellationToken::new();
        let ctrl_c = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling remaining uploads");
                ctrl_c.cancel();
            }
        });

        service.slice_with_report(request, &cancellation).await
    })?;

    info!(
        tiles = report.tiles.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Slice complete"
    );

    if args.json {
        print_json(&report)
    } else {
        print_report(&report, start.elapsed().as_secs_f64());
        Ok(())
    }
}

fn print_json(report: &ExportReport) -> Result<(), CliError> {
    let response = SliceResponse::success(report.urls());
    let json =
        serde_json::to_string_pretty(&response).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_report(report: &ExportReport, elapsed_secs: f64) {
    println!(
        "Sliced {}x{} pixels into {} tiles in {:.2}s",
        report.usable_width,
        report.usable_height,
        report.tiles.len(),
        elapsed_secs
    );
    println!();
    for tile in &report.tiles {
        println!("  [{},{}] {}", tile.row, tile.col, tile.url);
    }
}
