//! Listener end-to-end tests over loopback UDP
//! Run with: cargo test --test listener_test

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use remote_power::application::errors::{ActionError, ListenerError};
use remote_power::application::messaging::{DispatchOutcome, Dispatcher};
use remote_power::domain::entities::PowerAction;
use remote_power::domain::traits::PowerControl;
use remote_power::infrastructure::adapters::{send_command, UdpListener};
use remote_power::infrastructure::config::ListenerConfig;
use tokio::net::UdpSocket;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Records every action handler call instead of touching the host
#[derive(Default)]
struct RecordingPower {
    calls: Mutex<Vec<PowerAction>>,
}

impl RecordingPower {
    fn calls(&self) -> Vec<PowerAction> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: PowerAction) -> Result<(), ActionError> {
        self.calls.lock().unwrap().push(action);
        Ok(())
    }
}

#[async_trait]
impl PowerControl for RecordingPower {
    async fn shutdown(&self) -> Result<(), ActionError> {
        self.record(PowerAction::Shutdown)
    }

    async fn reboot(&self) -> Result<(), ActionError> {
        self.record(PowerAction::Reboot)
    }

    async fn sleep(&self) -> Result<(), ActionError> {
        self.record(PowerAction::Sleep)
    }

    async fn hibernate(&self) -> Result<(), ActionError> {
        self.record(PowerAction::Hibernate)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn loopback_config(buffer_size: usize) -> ListenerConfig {
    ListenerConfig {
        bind_address: "127.0.0.1".parse().unwrap(),
        port: 0,
        buffer_size,
    }
}

async fn start_listener(buffer_size: usize) -> (UdpListener, SocketAddr, Arc<RecordingPower>) {
    ensure_init();
    let power = Arc::new(RecordingPower::default());
    let listener = UdpListener::bind(&loopback_config(buffer_size), Dispatcher::new(power.clone()))
        .await
        .expect("Should bind loopback listener");
    let addr = listener.local_addr().unwrap();
    (listener, addr, power)
}

async fn send_raw(target: SocketAddr, payload: &[u8]) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(payload, target).await.unwrap();
}

#[tokio::test]
async fn test_shutdown_invokes_only_shutdown_handler() {
    let (mut listener, addr, power) = start_listener(1024).await;

    send_raw(addr, b"shutdown").await;
    let outcome = listener.recv_once().await.unwrap();

    assert!(matches!(outcome, Some(DispatchOutcome::Executed(PowerAction::Shutdown))));
    assert_eq!(power.calls(), vec![PowerAction::Shutdown]);
}

#[tokio::test]
async fn test_unknown_command_invokes_nothing() {
    let (mut listener, addr, power) = start_listener(1024).await;

    send_raw(addr, b"nap").await;
    let outcome = listener.recv_once().await.unwrap().expect("Should decode");

    assert!(outcome.is_unknown());
    assert!(matches!(&outcome, DispatchOutcome::Unknown(token) if token == "nap"));
    assert!(power.calls().is_empty());
}

#[tokio::test]
async fn test_payloads_are_normalized() {
    let (mut listener, addr, power) = start_listener(1024).await;

    let payloads: [&[u8]; 5] = [b"  ShutDown \n", b"REBOOT", b"Sleep", b"HiBeRnAtE", b"poweroff"];
    for payload in payloads {
        send_raw(addr, payload).await;
        listener.recv_once().await.unwrap();
    }

    assert_eq!(
        power.calls(),
        vec![
            PowerAction::Shutdown,
            PowerAction::Reboot,
            PowerAction::Sleep,
            PowerAction::Hibernate,
        ]
    );
}

#[tokio::test]
async fn test_undecodable_payload_is_skipped() {
    let (mut listener, addr, power) = start_listener(1024).await;

    send_raw(addr, &[0xff, 0xfe, 0xfd]).await;
    send_raw(addr, b"reboot").await;

    assert!(listener.recv_once().await.unwrap().is_none());
    assert!(matches!(
        listener.recv_once().await.unwrap(),
        Some(DispatchOutcome::Executed(PowerAction::Reboot))
    ));
    assert_eq!(power.calls(), vec![PowerAction::Reboot]);
}

#[tokio::test]
async fn test_run_keeps_receiving_after_each_dispatch() {
    let (mut listener, addr, power) = start_listener(1024).await;
    let task = tokio::spawn(async move { listener.run().await });

    for command in ["sleep", "nap", "hibernate", "reboot"] {
        send_command(addr, command).await.unwrap();
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while power.calls().len() < 3 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    task.abort();

    assert_eq!(
        power.calls(),
        vec![PowerAction::Sleep, PowerAction::Hibernate, PowerAction::Reboot]
    );
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let (_listener, addr, _power) = start_listener(1024).await;

    let config = ListenerConfig {
        port: addr.port(),
        ..loopback_config(1024)
    };
    let result = UdpListener::bind(&config, Dispatcher::new(Arc::new(RecordingPower::default()))).await;

    match result {
        Err(ListenerError::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("second bind on {} should fail", addr),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_oversize_payload_is_truncated_to_buffer() {
    let (mut listener, addr, power) = start_listener(8).await;

    send_raw(addr, b"shutdown-and-more").await;
    let outcome = listener.recv_once().await.unwrap();

    assert!(matches!(outcome, Some(DispatchOutcome::Executed(PowerAction::Shutdown))));
    assert_eq!(power.calls(), vec![PowerAction::Shutdown]);
}
