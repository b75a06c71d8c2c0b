//! `markers` subcommand: viewport visibility listing.

use clap::Args;

use waymark_core::{Config, GeoPoint, Viewport};
use waymark_store::CandidateStore;
use waymark_sync::resolve::format_coord;
use waymark_sync::{run_marker_loop, visible_markers};

#[derive(Debug, Args)]
pub struct MarkersArgs {
    /// Viewport center latitude
    #[arg(long)]
    pub lat: f64,

    /// Viewport center longitude
    #[arg(long)]
    pub lng: f64,

    /// Zoom level
    #[arg(long)]
    pub zoom: f64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Keep polling at the rendering cadence instead of listing once
    #[arg(long)]
    pub watch: bool,
}

pub async fn run_markers(config: &Config, args: MarkersArgs) -> anyhow::Result<()> {
    let store = CandidateStore::new(&config.cache_path);
    let viewport = Viewport {
        center: GeoPoint {
            lat: args.lat,
            lng: args.lng,
        },
        zoom: args.zoom,
        width: args.width,
        height: args.height,
    };

    if args.watch {
        let render_store = store.clone();
        let watch_loop = run_marker_loop(
            || Some(viewport),
            move || render_store.load(),
            |vp, markers| print_markers(vp, &markers),
        );
        tokio::select! {
            () = watch_loop => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        print_markers(&viewport, &visible_markers(&store.load(), &viewport));
    }
    Ok(())
}

fn print_markers(viewport: &Viewport, markers: &[waymark_sync::Marker]) {
    for m in markers {
        println!(
            "{} ({}, {}) -> ({:.1}, {:.1})",
            m.title,
            format_coord(m.lat),
            format_coord(m.lng),
            m.screen.x,
            m.screen.y
        );
    }
    println!(
        "{} potential POIs in bounds ({}x{} @ z{}).",
        markers.len(),
        viewport.width,
        viewport.height,
        viewport.zoom
    );
}
