use scholar_harvester_lib::{config, input_loader, logger};
use scholar_harvester_lib::{PdfDownloader, RunContext, RunDriver, ScholarSearch};

use std::error::Error;
use log::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting Scholar Harvester...");

    // 1. Fixed run context
    let ctx = RunContext::new(config::OUTPUT_FOLDER);
    info!("Run {} -> {:?}", ctx.run_stamp, ctx.output_root);

    // 2. Keywords (a missing file ends the run)
    let keywords = input_loader::load_keywords(config::KEYWORDS_FILE)?;
    if !keywords.iter().any(|k| k.enabled) {
        warn!("No active keywords in {}; only an empty spreadsheet will be written.", config::KEYWORDS_FILE);
    }

    // 3. Engines
    let search_engine = ScholarSearch::new()?;
    let downloader = PdfDownloader::new(ctx.download_timeout)?;

    // 4. Harvest and export
    let summary = RunDriver::new(&ctx, &search_engine, &downloader).run(&keywords)?;

    info!(
        "Done. Results and files are in {:?}; spreadsheet: {}",
        ctx.output_root,
        summary.spreadsheet.display()
    );
    Ok(())
}
