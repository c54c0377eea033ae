//! Raw Mode End-to-End Tests
#![cfg(unix)]

use binlaunch_integration_tests::{install_stub, ECHO_ARGS_AS_JSON};
use binlaunch_sdk::{terminate_gracefully, ProcessExit, Shim, SpawnOptions, StdioMode};
use std::time::Duration;
use tokio::io::AsyncReadExt;

async fn read_to_string(stream: &mut (dyn tokio::io::AsyncRead + Send + Unpin)) -> String {
    let mut buf = String::new();
    stream.read_to_string(&mut buf).await.unwrap();
    buf
}

#[tokio::test]
async fn test_exec_streams_stdout_and_reports_exit_code() {
    let stub = install_stub("echo hello\nexit 4");
    let shim = Shim::resolve(&stub.settings()).unwrap();

    let mut handle = shim.exec(["--version"], SpawnOptions::default()).unwrap();

    assert!(handle.id().is_some());
    assert_eq!(read_to_string(handle.stdout.as_mut()).await, "hello\n");
    assert_eq!(handle.wait().await.unwrap(), ProcessExit::Code(4));
}

#[tokio::test]
async fn test_exec_passes_arguments_verbatim() {
    let stub = install_stub(ECHO_ARGS_AS_JSON);
    let shim = Shim::resolve(&stub.settings()).unwrap();

    let mut handle = shim
        .exec(["use", "18", "--verbose"], SpawnOptions::default().null_stdin())
        .unwrap();

    let out = read_to_string(handle.stdout.as_mut()).await;
    assert_eq!(out.trim(), r#"["use","18","--verbose"]"#);
    assert!(handle.wait().await.unwrap().success());
}

#[tokio::test]
async fn test_stderr_is_piped_only_on_request() {
    let stub = install_stub("echo oops >&2");
    let shim = Shim::resolve(&stub.settings()).unwrap();

    let inherited = shim
        .exec(Vec::<String>::new(), SpawnOptions::default())
        .unwrap();
    assert!(inherited.stderr.is_none());

    let mut piped = shim
        .exec(Vec::<String>::new(), SpawnOptions::default().piped_stderr())
        .unwrap();
    let mut stderr = piped.stderr.take().unwrap();
    assert_eq!(read_to_string(stderr.as_mut()).await, "oops\n");
    assert!(piped.wait().await.unwrap().success());
}

#[tokio::test]
async fn test_exec_with_env_and_working_dir() {
    let stub = install_stub("echo \"$VNE_MODE:$(pwd)\"");
    let shim = Shim::resolve(&stub.settings()).unwrap();
    let cwd = stub.package_dir.canonicalize().unwrap();

    let options = SpawnOptions::default()
        .env("VNE_MODE", "ci")
        .current_dir(&cwd);
    let mut handle = shim.exec(Vec::<String>::new(), options).unwrap();

    let out = read_to_string(handle.stdout.as_mut()).await;
    assert_eq!(out.trim(), format!("ci:{}", cwd.display()));
    handle.wait().await.unwrap();
}

#[tokio::test]
async fn test_env_allowlist_hides_other_variables() {
    let stub = install_stub("echo \"[${HOME:-}]\"");
    let shim = Shim::resolve(&stub.settings()).unwrap();

    let options = SpawnOptions {
        env_allowlist: Some(vec!["PATH".to_string()]),
        ..SpawnOptions::default()
    };
    let mut handle = shim.exec(Vec::<String>::new(), options).unwrap();

    assert_eq!(read_to_string(handle.stdout.as_mut()).await.trim(), "[]");
    handle.wait().await.unwrap();
}

#[tokio::test]
async fn test_terminate_gracefully_stops_long_running_tool() {
    let stub = install_stub("exec sleep 30");
    let shim = Shim::resolve(&stub.settings()).unwrap();

    let mut handle = shim
        .exec(Vec::<String>::new(), SpawnOptions {
            stdin: StdioMode::Null,
            ..SpawnOptions::default()
        })
        .unwrap();

    let exit = tokio::time::timeout(
        Duration::from_secs(10),
        terminate_gracefully(&mut handle, Duration::from_secs(2)),
    )
    .await
    .expect("termination should finish")
    .unwrap();

    assert_eq!(exit, ProcessExit::Signal(15));
    assert!(!exit.success());
}
