//! Reload and shutdown behaviour of a running bridge.

use std::time::Duration;

use content_bridge::delivery::{Data, DataType, DATA_EVENT};

mod common;

async fn pull(url: &str) -> Data {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn test_reload_replaces_component() {
    let bridge = common::start_bridge(common::config_with_plugin(
        r#"
        selfId = "bot1"
        injectType = "text"
        showText = "before"
        "#,
    ))
    .await;

    assert_eq!(pull(&bridge.url("/data/client")).await.content, "before");

    bridge
        .updates
        .send(common::config_with_plugin(
            r#"
            selfId = "bot1"
            passiveMode = true
            injectType = "iframe"
            showUrl = "https://x.test"
            "#,
        ))
        .unwrap();

    let mut pulled = pull(&bridge.url("/data/client")).await;
    for _ in 0..50 {
        if pulled.is_null() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        pulled = pull(&bridge.url("/data/client")).await;
    }
    assert_eq!(pulled, Data::suppressed("bot1"));

    let reply = common::push_once(&bridge.ws_url(), DATA_EVENT).await;
    assert_eq!(reply.data.unwrap().data_type, DataType::Iframe);

    bridge.shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let bridge = common::start_bridge(common::config_with_plugin(
        r#"
        selfId = "b"
        passiveMode = true
        injectType = "null"
        "#,
    ))
    .await;

    // An open push session must not hold the server up.
    let (_stream, _) = tokio_tungstenite::connect_async(bridge.ws_url()).await.unwrap();

    bridge.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), bridge.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    assert!(client.get(format!("http://{}/status", bridge.addr)).send().await.is_err());
}
