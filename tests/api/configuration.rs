use petstore_e2e::configuration::get_configuration;

#[test]
fn configuration_files_are_loaded() {
    let configuration = get_configuration().expect("Failed to read configuration.");

    assert!(!configuration.petstore.base_url.is_empty());
    assert!(configuration.petstore.timeout_milliseconds > 0);
    assert!(configuration.scenarios.read_after_create().max_attempts >= 1);
}
