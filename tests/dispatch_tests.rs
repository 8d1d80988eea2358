//! Dispatcher behaviour against a recording process runner.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use zk::adapter::inbound::cli::registry;
use zk::application::dispatch::{Completion, Dispatcher, Operation};
use zk::error::{ConfigError, Error};
use zk::infrastructure::config::settings::{KeysConfig, Settings};
use zk::port::Invocation;
use zk::testkit::output::SharedBuffer;
use zk::testkit::runner::RecordingRunner;

const MNEMONIC: &str = "test test test test test test test test test test test junk";

struct Harness {
    root: TempDir,
    runner: RecordingRunner,
    out: SharedBuffer,
    dispatcher: Dispatcher<RecordingRunner>,
}

fn harness_with(runner: RecordingRunner, mnemonic: Option<&str>) -> Harness {
    let root = tempfile::tempdir().expect("create temp root");
    let mut settings = Settings::from_parts(root.path(), mnemonic.map(str::to_string));
    settings.keys.download_pause_ms = 0;

    let out = SharedBuffer::new();
    let dispatcher = Dispatcher::new(settings, runner.clone()).with_stdout(out.clone());
    Harness {
        root,
        runner,
        out,
        dispatcher,
    }
}

fn harness() -> Harness {
    harness_with(RecordingRunner::new(), Some(MNEMONIC))
}

fn setup_dir(root: &Path) -> std::path::PathBuf {
    root.join("keys").join("setup")
}

/// Simulates the downloader by creating the requested key file.
fn create_downloaded_key(invocation: &Invocation) {
    let url = invocation.arguments().last().expect("download url");
    let power = url
        .rsplit("%5E")
        .next()
        .and_then(|tail| tail.strip_suffix(".key"))
        .and_then(|p| p.parse::<u32>().ok())
        .expect("power in url");
    let dir = invocation.working_dir().expect("download dir");
    fs::write(dir.join(KeysConfig::file_name(power)), b"key").expect("write key");
}

// Tests for plonk-setup

#[tokio::test]
async fn plonk_setup_downloads_every_missing_key() {
    let h = harness();

    let completion = h.dispatcher.execute(Operation::PlonkSetup).await.unwrap();
    assert_eq!(completion, Completion::Done);

    let calls = h.runner.calls();
    assert_eq!(calls.len(), 7);
    for (call, power) in calls.iter().zip(20..=26) {
        assert_eq!(call.program(), "axel");
        assert_eq!(
            call.arguments(),
            [
                "-c".to_string(),
                format!("https://universal-setup.ams3.digitaloceanspaces.com/setup_2%5E{power}.key"),
            ]
        );
        assert_eq!(call.working_dir(), Some(setup_dir(h.root.path()).as_path()));
    }
    assert!(setup_dir(h.root.path()).is_dir());
}

#[tokio::test]
async fn plonk_setup_skips_present_keys() {
    let h = harness();
    let dir = setup_dir(h.root.path());
    fs::create_dir_all(&dir).unwrap();
    for power in [20, 22, 26] {
        fs::write(dir.join(KeysConfig::file_name(power)), b"key").unwrap();
    }

    h.dispatcher.execute(Operation::PlonkSetup).await.unwrap();

    let downloaded: Vec<String> = h
        .runner
        .calls()
        .iter()
        .map(|call| call.arguments()[1].clone())
        .collect();
    assert_eq!(downloaded.len(), 4);
    for power in [21, 23, 24, 25] {
        assert!(
            downloaded.iter().any(|url| url.ends_with(&format!("%5E{power}.key"))),
            "expected download of power {power}"
        );
    }
}

#[tokio::test]
async fn plonk_setup_is_idempotent() {
    let h = harness_with(
        RecordingRunner::new().on_run(create_downloaded_key),
        Some(MNEMONIC),
    );

    h.dispatcher.execute(Operation::PlonkSetup).await.unwrap();
    assert_eq!(h.runner.call_count(), 7);

    h.dispatcher.execute(Operation::PlonkSetup).await.unwrap();
    assert_eq!(h.runner.call_count(), 7, "second run must not download");
}

#[tokio::test]
async fn plonk_setup_aborts_on_download_failure() {
    let cwd_before = std::env::current_dir().unwrap();
    let h = harness_with(RecordingRunner::new().failing("axel", 2), Some(MNEMONIC));

    let err = h.dispatcher.execute(Operation::PlonkSetup).await.unwrap_err();

    assert!(matches!(err, Error::ExternalProcess { code: Some(2), .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(h.runner.call_count(), 1);
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[tokio::test]
async fn plonk_setup_fails_when_key_dir_cannot_be_created() {
    let h = harness();
    fs::write(h.root.path().join("keys"), b"not a directory").unwrap();

    let err = h.dispatcher.execute(Operation::PlonkSetup).await.unwrap_err();

    assert!(matches!(err, Error::FileSystem { .. }));
    assert_eq!(h.runner.call_count(), 0);
}

#[tokio::test]
async fn plonk_setup_honours_configured_range() {
    let root = tempfile::tempdir().unwrap();
    let mut settings = Settings::from_parts(root.path(), None);
    settings.keys.download_pause_ms = 0;
    settings.keys.min_power = 25;
    settings.keys.downloader = "wget".into();
    let runner = RecordingRunner::new();
    let dispatcher = Dispatcher::new(settings, runner.clone());

    dispatcher.plonk_setup().await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.program() == "wget"));
}

// Tests for revert-reason and explorer

#[tokio::test]
async fn revert_reason_passes_both_positionals() {
    let h = harness();

    h.dispatcher
        .execute(Operation::RevertReason {
            tx_hash: "0xdead".into(),
            web3_url: Some("http://localhost:8545".into()),
        })
        .await
        .unwrap();

    let call = &h.runner.calls()[0];
    assert_eq!(call.program(), "npx");
    assert_eq!(
        call.arguments(),
        ["ts-node", "revert-reason.ts", "0xdead", "http://localhost:8545"]
    );
    assert_eq!(call.working_dir(), Some(h.root.path().join("contracts").as_path()));
}

#[tokio::test]
async fn revert_reason_defaults_url_to_empty() {
    let h = harness();

    h.dispatcher
        .execute(Operation::RevertReason {
            tx_hash: "0xdead".into(),
            web3_url: None,
        })
        .await
        .unwrap();

    assert_eq!(
        h.runner.argument_lists(),
        [vec!["ts-node", "revert-reason.ts", "0xdead", ""]]
    );
}

#[tokio::test]
async fn explorer_serves_from_project_root() {
    let h = harness();

    h.dispatcher.execute(Operation::Explorer).await.unwrap();

    let call = &h.runner.calls()[0];
    assert_eq!(call.program(), "yarn");
    assert_eq!(call.arguments(), ["--cwd", "infrastructure/explorer", "serve"]);
    assert_eq!(call.working_dir(), Some(h.root.path()));
}

#[tokio::test]
async fn explorer_propagates_failure() {
    let h = harness_with(RecordingRunner::new().failing("yarn", 130), None);
    let err = h.dispatcher.execute(Operation::Explorer).await.unwrap_err();
    assert_eq!(err.exit_code(), 130);
}

// Tests for exit-proof

const PROVER_PREFIX: [&str; 5] = ["run", "--example", "generate_exit_proof", "--release", "--"];

fn prover_args(extra: &[&str]) -> Vec<String> {
    PROVER_PREFIX
        .iter()
        .chain(extra)
        .map(|s| s.to_string())
        .collect()
}

#[tokio::test]
async fn exit_proof_with_both_ids_generates_proof() {
    let h = harness();

    h.dispatcher
        .execute(Operation::ExitProof {
            account: Some("12".into()),
            token: Some("0".into()),
            help: false,
        })
        .await
        .unwrap();

    let call = &h.runner.calls()[0];
    assert_eq!(call.program(), "cargo");
    assert_eq!(
        call.arguments(),
        prover_args(&["--account_id", "12", "--token", "0"])
    );
}

#[tokio::test]
async fn exit_proof_without_ids_shows_prover_help() {
    for (account, token) in [
        (None, None),
        (Some("12".to_string()), None),
        (None, Some("0".to_string())),
    ] {
        let h = harness();
        h.dispatcher
            .execute(Operation::ExitProof {
                account,
                token,
                help: false,
            })
            .await
            .expect("missing ids degrade to help, not an error");
        assert_eq!(h.runner.argument_lists(), [prover_args(&["--help"])]);
    }
}

#[tokio::test]
async fn exit_proof_help_flag_skips_proof() {
    let h = harness();

    h.dispatcher
        .execute(Operation::ExitProof {
            account: Some("12".into()),
            token: Some("0".into()),
            help: true,
        })
        .await
        .unwrap();

    assert_eq!(h.runner.argument_lists(), [prover_args(&["--help"])]);
}

// Tests for cat-logs

#[tokio::test]
async fn cat_logs_without_files_never_fails() {
    let h = harness();

    let completion = h
        .dispatcher
        .execute(Operation::CatLogs { exit_code: None })
        .await
        .unwrap();

    assert_eq!(completion, Completion::Done);
    assert!(h.out.contents().is_empty());
    assert_eq!(h.runner.call_count(), 0);
}

#[tokio::test]
async fn cat_logs_with_code_requests_exit() {
    let h = harness();

    let completion = h
        .dispatcher
        .execute(Operation::CatLogs { exit_code: Some(3) })
        .await
        .unwrap();

    assert_eq!(completion, Completion::Exit(3));
}

#[test]
fn cat_logs_prints_both_logs() {
    let h = harness();
    fs::write(h.root.path().join("server.log"), "server line").unwrap();
    fs::write(h.root.path().join("dummy_prover.log"), "prover line").unwrap();

    h.dispatcher.cat_logs(None);

    assert_eq!(
        h.out.contents(),
        "\nSERVER LOGS:\n server line\n\nPROVER LOGS:\n prover line\n"
    );
}

#[test]
fn cat_logs_prints_what_is_readable() {
    let h = harness();
    fs::write(h.root.path().join("dummy_prover.log"), "prover only").unwrap();

    let completion = h.dispatcher.cat_logs(Some(0));

    assert_eq!(completion, Completion::Exit(0));
    assert_eq!(h.out.contents(), "\nPROVER LOGS:\n prover only\n");
}

// Tests for test-accounts

#[tokio::test]
async fn test_accounts_prints_ten_wallets() {
    let h = harness();

    h.dispatcher.execute(Operation::TestAccounts).await.unwrap();

    let accounts: Vec<serde_json::Value> = serde_json::from_str(&h.out.contents()).unwrap();
    assert_eq!(accounts.len(), 10);
    assert_eq!(
        accounts[0]["address"],
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
    );
    assert_eq!(
        accounts[0]["privateKey"],
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    );
    assert!(h.out.contents().starts_with("[\n    {\n        \"address\""));
    assert_eq!(h.runner.call_count(), 0);
}

#[tokio::test]
async fn test_accounts_output_is_byte_identical_across_runs() {
    let h = harness();

    h.dispatcher.execute(Operation::TestAccounts).await.unwrap();
    let first = h.out.bytes();
    h.out.clear();
    h.dispatcher.execute(Operation::TestAccounts).await.unwrap();

    assert_eq!(first, h.out.bytes());
}

#[tokio::test]
async fn test_accounts_requires_mnemonic() {
    let h = harness_with(RecordingRunner::new(), None);

    let err = h.dispatcher.execute(Operation::TestAccounts).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingEnv {
            var: "TEST_MNEMONIC"
        })
    ));
    assert!(h.out.contents().is_empty());
}

// Tests for loadtest

#[tokio::test]
async fn loadtest_forwards_unknown_options() {
    let h = harness();

    h.dispatcher
        .execute(Operation::Loadtest {
            options: vec!["--foo".into(), "bar".into()],
        })
        .await
        .unwrap();

    let call = &h.runner.calls()[0];
    assert_eq!(call.program(), "cargo");
    assert_eq!(
        call.arguments(),
        ["run", "--release", "--bin", "loadtest", "--", "--foo", "bar"]
    );
    assert_eq!(h.out.contents(), "[\"--foo\", \"bar\"]\n");
}

// Tests for nested groups

#[tokio::test]
async fn delegates_receive_arguments_verbatim() {
    let h = harness();

    h.dispatcher
        .execute(Operation::DataRestore {
            args: vec!["run".into(), "--genesis".into()],
        })
        .await
        .unwrap();
    h.dispatcher
        .execute(Operation::VerifyKeys {
            args: vec!["unpack".into()],
        })
        .await
        .unwrap();

    assert_eq!(
        h.runner.argument_lists(),
        [
            vec!["run", "--release", "--bin", "zksync_data_restore", "--", "run", "--genesis"],
            vec!["run", "--release", "--bin", "key_generator", "--", "unpack"],
        ]
    );
}

// Tests for name-based dispatch

#[tokio::test]
async fn unknown_operation_spawns_nothing() {
    let h = harness();

    let err = registry::dispatch(&h.dispatcher, "nonexistent-op", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownCommand { ref name, .. } if name == "nonexistent-op"));
    assert_eq!(h.runner.call_count(), 0);
}

#[tokio::test]
async fn dispatch_by_name_runs_operation() {
    let h = harness();

    let completion = registry::dispatch(
        &h.dispatcher,
        "exit-proof",
        &["--account".to_string(), "5".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(completion, Completion::Done);
    assert_eq!(h.runner.argument_lists(), [prover_args(&["--help"])]);
}

#[tokio::test]
async fn dispatch_by_name_forwards_cat_logs_code() {
    let h = harness();

    let completion = registry::dispatch(&h.dispatcher, "cat-logs", &["3".to_string()])
        .await
        .unwrap();

    assert_eq!(completion, Completion::Exit(3));
}
