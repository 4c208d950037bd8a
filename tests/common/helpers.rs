use petstore_e2e::observer::TracingObserver;
use petstore_e2e::pet_client::PetClient;
use petstore_e2e::scenarios::ReadAfterCreate;
use petstore_e2e::telemetry::{get_subscriber, init_subscriber};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer};

use super::mock_petstore::MockPetstore;

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`,
    // hence the two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub fn init_tracing() {
    LazyLock::force(&TRACING);
}

pub struct TestPetstore {
    pub server: MockServer,
    pub petstore: MockPetstore,
    pub client: PetClient,
}

impl TestPetstore {
    /// Methods and paths of the requests received so far, in order.
    pub async fn received_calls(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url.path()))
            .collect()
    }
}

pub fn client_for(base_url: String) -> PetClient {
    PetClient::new(base_url, Duration::from_secs(2), Arc::new(TracingObserver))
        .expect("Failed to build pet client.")
}

/// Starts a mock server answering the way the public demo pet store does.
pub async fn spawn_petstore(petstore: MockPetstore) -> TestPetstore {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(path_regex("^/pet"))
        .respond_with(petstore.clone())
        .mount(&server)
        .await;
    let client = client_for(server.uri());

    TestPetstore {
        server,
        petstore,
        client,
    }
}

/// No initial delay, short polling: keeps the offline suite fast.
pub fn fast_read_after_create(max_attempts: u32) -> ReadAfterCreate {
    ReadAfterCreate {
        delay: Duration::ZERO,
        max_attempts,
        poll_interval: Duration::from_millis(10),
    }
}
