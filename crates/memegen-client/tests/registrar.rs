//! Registration passes against a mocked meme service.

mod common;

use common::{client_for, info_body, RecordingHost};
use memegen_client::{load_commands, register_all, HostError, LoadError};
use memegen_core::{Config, LoadPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_ok(server: &MockServer, key: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/memes/{key}/info")))
        .respond_with(ResponseTemplate::new(200).set_body_json(info_body(key, 1, 1, &["hi"])))
        .mount(server)
        .await;
}

fn config(memes: &[(&str, &str)]) -> Config {
    memes
        .iter()
        .fold(Config::default().with_name("m6c"), |config, (key, name)| {
            config.with_meme(*key, *name)
        })
}

#[tokio::test]
async fn registers_every_meme_in_order() {
    let server = MockServer::start().await;
    mount_ok(&server, "drake_like").await;
    mount_ok(&server, "petpet").await;

    let mut host = RecordingHost::default();
    let registration = register_all(
        &client_for(&server),
        &config(&[("drake_like", "drake"), ("petpet", "petpet")]),
        &mut host,
    )
    .await;

    assert!(!registration.aborted);
    assert!(registration.failures.is_empty());
    let names: Vec<_> = host.commands.iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["memegen-drake-like", "memegen-petpet"]);
    assert_eq!(host.commands[0].spec().alias.as_deref(), Some("drake"));
    assert_eq!(host.commands[1].spec().alias, None);
    assert_eq!(host.commands[0].spec().example, "@m6c /drake \"hi\"");
}

#[tokio::test]
async fn failure_aborts_all_later_memes() {
    let server = MockServer::start().await;
    mount_ok(&server, "first").await;
    Mock::given(method("GET"))
        .and(path("/memes/second/info"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/memes/third/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(info_body("third", 1, 1, &[])))
        .expect(0)
        .mount(&server)
        .await;

    let mut host = RecordingHost::default();
    let registration = register_all(
        &client_for(&server),
        &config(&[("first", "first"), ("second", "second"), ("third", "third")]),
        &mut host,
    )
    .await;

    assert!(registration.aborted);
    assert_eq!(registration.command_names(), vec!["memegen-first"]);
    assert_eq!(host.commands.len(), 1);
    assert_eq!(registration.failures.len(), 1);
    assert_eq!(registration.failures[0].key, "second");
    assert!(matches!(
        &registration.failures[0].error,
        LoadError::Fetch(err) if err.status() == Some(503)
    ));
}

#[tokio::test]
async fn malformed_schema_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/memes/weird/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    mount_ok(&server, "fine").await;

    let registration = load_commands(
        &client_for(&server),
        &config(&[("weird", "weird"), ("fine", "fine")]),
    )
    .await;

    assert!(registration.aborted);
    assert!(registration.commands.is_empty());
    assert!(matches!(
        registration.failures[0].error,
        LoadError::Fetch(memegen_client::ClientError::Parse(_))
    ));
}

#[tokio::test]
async fn skip_policy_continues_past_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/memes/gone/info"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_ok(&server, "kept").await;

    let mut host = RecordingHost::default();
    let registration = register_all(
        &client_for(&server),
        &config(&[("gone", "gone"), ("kept", "kept")]).with_policy(LoadPolicy::SkipFailed),
        &mut host,
    )
    .await;

    assert!(!registration.aborted);
    assert_eq!(registration.command_names(), vec!["memegen-kept"]);
    assert_eq!(host.commands.len(), 1);
}

#[tokio::test]
async fn refused_registration_counts_as_failure() {
    let server = MockServer::start().await;
    mount_ok(&server, "petpet").await;
    mount_ok(&server, "drake").await;
    let memes = [("petpet", "pat"), ("petpet", "pat"), ("drake", "d")];

    let mut host = RecordingHost::default();
    let registration = register_all(&client_for(&server), &config(&memes), &mut host).await;

    assert!(registration.aborted);
    assert_eq!(registration.command_names(), vec!["memegen-petpet"]);
    assert_eq!(host.commands.len(), 1);
    assert_eq!(registration.failures[0].key, "petpet");
    assert!(matches!(
        &registration.failures[0].error,
        LoadError::Register(HostError::Duplicate(name)) if name == "memegen-petpet"
    ));

    let mut host = RecordingHost::default();
    let registration = register_all(
        &client_for(&server),
        &config(&memes).with_policy(LoadPolicy::SkipFailed),
        &mut host,
    )
    .await;

    assert!(!registration.aborted);
    assert_eq!(registration.command_names(), vec!["memegen-petpet", "memegen-drake"]);
    assert_eq!(registration.failures.len(), 1);
}

#[tokio::test]
async fn empty_meme_list_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut host = RecordingHost::default();
    let registration = register_all(&client_for(&server), &config(&[]), &mut host).await;

    assert!(registration.commands.is_empty());
    assert!(host.commands.is_empty());
}

#[tokio::test]
async fn unchanged_schema_derives_identical_specs() {
    let server = MockServer::start().await;
    mount_ok(&server, "petpet").await;
    let client = client_for(&server);
    let config = config(&[("petpet", "pat")]);

    let first = load_commands(&client, &config).await;
    let second = load_commands(&client, &config).await;

    assert_eq!(first.commands[0].spec(), second.commands[0].spec());
}
