use httpmock::MockServer;

/// Start a fresh `httpmock::MockServer` for HTTP-level tests.
pub fn start_mock_server() -> MockServer {
    MockServer::start()
}
