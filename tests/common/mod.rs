// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use curryfinder::config::{OutputFormat, ProbeConfig};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock server answering every GET with `body`.
pub async fn server_with_body(body: &str) -> MockServer {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

pub fn test_config(target: &str) -> ProbeConfig {
    let mut config = ProbeConfig::new();
    config.set_target(target);
    config.set_user_agent("curryfinder-tests/1.0");
    config.set_timeout(Duration::from_secs(5));
    config.set_workers(4);
    config.set_output_format(OutputFormat::Text);
    config
}

/// A loopback port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

pub fn sample_origin_page() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <title>Origin Shop</title>
    <meta name="generator" content="WordPress 6.4">
</head>
<body>
    <h1>Welcome to the shop</h1>
    <p>Served directly by the origin.</p>
</body>
</html>"#
        .to_string()
}

pub fn sample_default_vhost_page() -> String {
    r#"<!DOCTYPE html>
<html>
<head><title>Welcome to nginx!</title></head>
<body>
<h1>Welcome to nginx!</h1>
<p>If you see this page, the nginx web server is successfully installed.</p>
</body>
</html>"#
        .to_string()
}
