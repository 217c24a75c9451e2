/// Installs a logger for the test harness. Safe to call from every test.
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}
