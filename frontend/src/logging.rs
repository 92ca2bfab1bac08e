use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

/// Route `tracing` output to the browser console.
pub fn set_up(max_level: Level) {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(max_level)
        .set_report_logs_in_timings(false)
        .build();

    tracing_wasm::set_as_global_default_with_config(config);
}
