//! Console logging for the browser.
//!
//! Installs a `tracing-wasm` layer behind an env filter plus the panic hook.
//! Safe to call more than once; a no-op off `wasm32-unknown-unknown`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize panic hook and tracing (DEBUG in debug builds, INFO otherwise).
pub fn init() {
    INIT.call_once(|| {
        #[cfg(all(target_family = "wasm", target_os = "unknown"))]
        {
            use tracing::Level;
            use tracing::subscriber::set_global_default;
            use tracing_subscriber::Registry;
            use tracing_subscriber::filter::EnvFilter;
            use tracing_subscriber::layer::SubscriberExt;

            console_error_panic_hook::set_once();

            let console_level = if cfg!(debug_assertions) {
                Level::DEBUG
            } else {
                Level::INFO
            };

            let wasm_layer = tracing_wasm::WASMLayer::new(
                tracing_wasm::WASMLayerConfigBuilder::new()
                    .set_max_level(console_level)
                    .build(),
            );

            let filter = EnvFilter::new(console_level.as_str().to_lowercase());
            let reg = Registry::default().with(filter).with(wasm_layer);

            // Another subscriber may already be installed by the host app.
            let _ = set_global_default(reg);
        }

        tracing::debug!("excerpt telemetry initialized");
    });
}
