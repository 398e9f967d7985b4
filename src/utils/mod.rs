//! Utility functions for the fusion pipeline.

pub mod image;

pub use image::{crop_region, downscale_to_fit, dynamic_to_rgb, load_image, mask_cutout};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the subscriber with an environment filter and a formatting layer.
/// Typically called once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
