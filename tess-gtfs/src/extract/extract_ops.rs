use crate::extract::archive_source;
use crate::extract::extract_config::ExtractConfig;
use crate::extract::extract_error::ExtractError;
use crate::extract::feed_archive::FeedArchive;
use crate::extract::geometry_source::GeometrySource;
use crate::extract::output_ops;
use crate::extract::region_geometry::RegionGeometry;
use crate::extract::region_ops;
use crate::extract::route_catalog::RouteCatalog;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;

/// runs the configured extraction end to end: ensure the feed archive, build
/// the shared route catalog once, load each referenced boundary geometry
/// once, then build and write every region.
///
/// regions run in parallel and fail independently: a structural error in one
/// region aborts that region only and is reported per label.
pub fn run_extraction(config: &ExtractConfig) -> Result<(), ExtractError> {
    std::fs::create_dir_all(&config.output_directory)?;
    let feed_path = config.feed_cache_path();
    archive_source::ensure_feed(&config.feed_url, &feed_path)?;

    let mut archive = FeedArchive::open(&feed_path)?;
    let catalog = RouteCatalog::build(&mut archive, config.agency_allow.as_deref())?;

    let geometry_source = GeometrySource::new(
        &config.geometry_url_template,
        &config.geometry_field,
        &config.output_directory,
    );
    let geometries = load_geometries(config, &geometry_source);

    let outcomes: Vec<(String, Result<(), ExtractError>)> = config
        .regions
        .par_iter()
        .map(|region| {
            let result = build_and_write(config, &catalog, &geometries, region);
            (region.label.clone(), result)
        })
        .collect();

    let mut failed = 0;
    for (label, outcome) in &outcomes {
        match outcome {
            Ok(()) => {}
            Err(e) => {
                failed += 1;
                log::error!("region {label} failed: {e}");
            }
        }
    }
    log::info!(
        "all regions done: {} succeeded, {} failed",
        outcomes.len() - failed,
        failed
    );
    Ok(())
}

/// loads each geometry code referenced by any region exactly once. failed
/// codes are logged here and surface later as a per-region error.
fn load_geometries(
    config: &ExtractConfig,
    source: &GeometrySource,
) -> HashMap<String, RegionGeometry> {
    let codes = config
        .regions
        .iter()
        .flat_map(|region| region.codes.iter())
        .unique();
    let mut geometries = HashMap::new();
    for code in codes {
        match source.load(code) {
            Ok(geometry) => {
                geometries.insert(code.clone(), geometry);
            }
            Err(e) => log::error!("failed loading geometry for code '{code}': {e}"),
        }
    }
    geometries
}

fn build_and_write(
    config: &ExtractConfig,
    catalog: &RouteCatalog,
    geometries: &HashMap<String, RegionGeometry>,
    region: &crate::extract::extract_config::RegionConfig,
) -> Result<(), ExtractError> {
    let region_geometries = region
        .codes
        .iter()
        .map(|code| {
            geometries
                .get(code)
                .ok_or_else(|| ExtractError::UnknownRegionError(code.clone()))
        })
        .collect::<Result<Vec<&RegionGeometry>, _>>()?;

    // each region streams the archive independently
    let mut archive = FeedArchive::open(&config.feed_cache_path())?;
    let graph = region_ops::build_region(&mut archive, catalog, &region.label, &region_geometries)?;
    output_ops::write_region(&config.output_directory, &graph)
}
