/// Install the `tracing` subscriber and make sure `log` records reach it.
///
/// The component crates log through the `log` facade. Installing the bridge
/// a second time fails harmlessly, so the result is ignored.
pub fn init_tracing_with_log(json: bool) {
    imgprims_core::init_tracing(json);
    let _ = tracing_log::LogTracer::init();
}
