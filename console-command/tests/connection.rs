mod common;

use common::{refused_endpoint, FakeEngine, TestConsole};
use console_api::{error::ConsoleError, input::InputMode, message::OutboundMessage};
use console_command::state::connection::{ConnectionState, DisconnectReason};
use lifeline::{assert_completes, assert_times_out};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn connect_and_disconnect() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    assert_eq!(ConnectionState::default(), console.client.state());

    assert_completes!(console.client.connect(engine.endpoint.clone()), 2000)?;
    let mut stream = engine.accept().await?;
    assert_eq!(
        ConnectionState::Connected(engine.endpoint.clone()),
        console.client.state()
    );

    console.client.disconnect().await?;
    assert_eq!(
        ConnectionState::Disconnected(DisconnectReason::Requested),
        console.client.state()
    );

    let mut buf = [0u8; 16];
    let read = assert_completes!(stream.read(&mut buf), 2000)?;
    assert_eq!(0, read);

    // a second disconnect has no effect
    console.client.disconnect().await?;
    assert_eq!(
        ConnectionState::Disconnected(DisconnectReason::Requested),
        console.client.state()
    );

    Ok(())
}

#[tokio::test]
async fn connect_refused() -> anyhow::Result<()> {
    let endpoint = refused_endpoint().await?;
    let mut console = TestConsole::spawn()?;

    let result = assert_completes!(console.client.connect(endpoint.clone()), 2000);

    match result {
        Err(ConsoleError::ConnectFailed { endpoint: failed, .. }) => assert_eq!(endpoint, failed),
        other => panic!("expected ConnectFailed, found {:?}", other),
    }

    assert!(matches!(
        console.client.state(),
        ConnectionState::Disconnected(DisconnectReason::ConnectFailed(_))
    ));

    Ok(())
}

#[tokio::test]
async fn send_when_disconnected() -> anyhow::Result<()> {
    let mut console = TestConsole::spawn()?;

    let result = console
        .client
        .send(&OutboundMessage::script("print(1)"))
        .await;

    assert!(matches!(result, Err(ConsoleError::NotConnected)));
    assert_eq!(ConnectionState::default(), console.client.state());
    Ok(())
}

#[tokio::test]
async fn script_payload() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    console.client.submit("print(1+1)", InputMode::Script).await?;

    let expected = br#"{"type":"script","script":"print(1+1)"}"#;
    let mut buf = vec![0u8; expected.len()];
    assert_completes!(stream.read_exact(buf.as_mut_slice()), 2000)?;
    assert_eq!(expected.to_vec(), buf);

    Ok(())
}

#[tokio::test]
async fn command_payload() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    console
        .client
        .submit("spawn unit player", InputMode::Command)
        .await?;

    let expected =
        br#"{"type":"command","command":"spawn","resource_type":"unit","resource_name":"player"}"#;
    let mut buf = vec![0u8; expected.len()];
    assert_completes!(stream.read_exact(buf.as_mut_slice()), 2000)?;
    assert_eq!(expected.to_vec(), buf);

    Ok(())
}

#[tokio::test]
async fn malformed_command_is_not_sent() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    let result = console.client.submit("spawn unit", InputMode::Command).await;
    assert!(matches!(
        result,
        Err(ConsoleError::MalformedCommandInput { tokens: 2 })
    ));
    assert!(console.client.state().is_connected());

    let mut buf = [0u8; 1];
    assert_times_out!(stream.read(&mut buf));

    Ok(())
}

#[tokio::test]
async fn output_in_order() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let console = TestConsole::spawn()?;
    let mut client = console.client.clone();

    client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    stream.write_all(b"AB").await?;
    assert_completes!(console.await_output(2), 2000);

    stream.write_all(b"CD").await?;
    let output = assert_completes!(console.await_output(4), 2000);

    assert_eq!("ABCD", output);
    Ok(())
}

#[tokio::test]
async fn large_output_is_not_lost() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let console = TestConsole::spawn()?;
    let mut client = console.client.clone();

    client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    let text: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    stream.write_all(text.as_bytes()).await?;

    let output = assert_completes!(console.await_output(text.len()), 2000);
    assert_eq!(text, output);
    Ok(())
}

#[tokio::test]
async fn remote_close() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut stream = engine.accept().await?;

    stream.write_all(b"bye").await?;
    drop(stream);

    let state = assert_completes!(
        console.client.wait_for(ConnectionState::is_disconnected),
        2000
    );
    assert_eq!(
        Some(ConnectionState::Disconnected(DisconnectReason::RemoteClosed)),
        state
    );
    assert_eq!("bye", assert_completes!(console.await_output(3), 2000));

    let result = console.client.send_bytes(b"{}".to_vec()).await;
    assert!(matches!(result, Err(ConsoleError::NotConnected)));
    Ok(())
}

#[tokio::test]
async fn reconnect_closes_previous() -> anyhow::Result<()> {
    let engine = FakeEngine::bind().await?;
    let mut console = TestConsole::spawn()?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut first = engine.accept().await?;

    console.client.connect(engine.endpoint.clone()).await?;
    let mut second = engine.accept().await?;

    let mut buf = [0u8; 8];
    let read = assert_completes!(first.read(&mut buf), 2000)?;
    assert_eq!(0, read);

    console.client.submit("x", InputMode::Script).await?;
    let expected = br#"{"type":"script","script":"x"}"#;
    let mut buf = vec![0u8; expected.len()];
    assert_completes!(second.read_exact(buf.as_mut_slice()), 2000)?;
    assert_eq!(expected.to_vec(), buf);

    Ok(())
}
