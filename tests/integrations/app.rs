//! End-to-end tests of the wired application with a capturing sink.

use notifier::app::App;
use notifier::config::{Config, FollowUpConfig};
use notifier::outputs::MemorySink;
use notifier::test_utils::FailingSink;
use notifier::{ChannelKind, NotifyError, User};
use std::sync::Arc;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{config_with_channels, EMAIL_GOLDEN, UPDATE_MESSAGE};

#[test]
fn test_default_run_matches_golden_output() {
    let sink = Arc::new(MemorySink::new());
    let mut app = App::builder(Config::default())
        .sink_override(sink.clone())
        .build()
        .unwrap();

    let summary = app.run().unwrap();

    assert_eq!(sink.lines(), EMAIL_GOLDEN);
    assert_eq!(summary.broadcasts.len(), 1);
    assert_eq!(summary.broadcasts[0].channel_line, EMAIL_GOLDEN[0]);
    assert_eq!(summary.failed_deliveries(), 0);
}

#[test]
fn test_sms_and_push_only_change_the_channel_line() {
    for (tag, expected) in [
        ("sms", "📱 Enviando SMS: Nueva actualización disponible"),
        ("push", "🔔 Enviando notificación push: Nueva actualización disponible"),
    ] {
        let sink = Arc::new(MemorySink::new());
        let mut app = App::builder(config_with_channels(&[tag]))
            .sink_override(sink.clone())
            .build()
            .unwrap();
        app.run().unwrap();

        let lines = sink.lines();
        assert_eq!(lines[0], expected);
        assert_eq!(lines[1..], EMAIL_GOLDEN[1..]);
    }
}

#[test]
fn test_multiple_channels_broadcast_once_per_channel() {
    let config = Config {
        channels: vec!["email".into(), "sms".into(), "push".into()],
        subscribers: vec![User::new("Ana"), User::new("Carlos"), User::new("Bea")],
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let mut app = App::builder(config)
        .sink_override(sink.clone())
        .build()
        .unwrap();

    let summary = app.run().unwrap();

    let kinds: Vec<ChannelKind> = summary.broadcasts.iter().map(|b| b.channel.kind()).collect();
    assert_eq!(kinds, ChannelKind::ALL);
    assert_eq!(sink.lines().len(), 3 * 4);
    assert_eq!(
        sink.lines()[4],
        format!("📱 Enviando SMS: {}", UPDATE_MESSAGE)
    );
}

#[test]
fn test_unknown_channel_fails_before_any_output() {
    let sink = Arc::new(MemorySink::new());
    let result = App::builder(config_with_channels(&["email", "whatsapp"]))
        .sink_override(sink.clone())
        .build();

    let err = match result {
        Ok(_) => panic!("build should fail for an unknown channel"),
        Err(err) => err,
    };
    assert_eq!(
        err.downcast_ref::<NotifyError>(),
        Some(&NotifyError::UnknownChannelKind("whatsapp".to_string()))
    );
    assert!(sink.lines().is_empty());
}

#[test]
fn test_no_subscribers_still_sends_channel_line() {
    let config = Config {
        subscribers: vec![],
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let mut app = App::builder(config)
        .sink_override(sink.clone())
        .build()
        .unwrap();

    app.run().unwrap();

    assert_eq!(sink.lines(), vec![EMAIL_GOLDEN[0]]);
    assert!(app.subject().is_empty());
}

#[test]
fn test_channel_sink_failure_aborts_run() {
    let mut app = App::builder(Config::default())
        .sink_override(Arc::new(FailingSink))
        .build()
        .unwrap();

    let err = app.run().unwrap_err();
    assert!(err.to_string().contains("sink is closed"));
}

#[test]
fn test_follow_up_skips_unsubscribed_users() {
    let config = Config {
        subscribers: vec![User::new("Ana"), User::new("Carlos"), User::new("Bea")],
        follow_up: Some(FollowUpConfig {
            unsubscribe: vec!["Carlos".to_string(), "Nadie".to_string()],
            channel: "email".to_string(),
            message: "Actualización crítica: mantenimiento programado".to_string(),
        }),
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let mut app = App::builder(config)
        .sink_override(sink.clone())
        .build()
        .unwrap();

    let summary = app.run().unwrap();

    assert_eq!(summary.unsubscribed, vec!["Carlos"]);
    assert_eq!(summary.broadcasts.len(), 2);
    assert_eq!(
        sink.lines()[4..],
        [
            "📧 Enviando correo electrónico: Actualización crítica: mantenimiento programado",
            "[Notificación para Ana]: Actualización crítica: mantenimiento programado",
            "[Notificación para Bea]: Actualización crítica: mantenimiento programado",
        ]
    );
    assert_eq!(app.subject().subscriber_names(), vec!["Ana", "Bea"]);
}

#[test]
fn test_follow_up_with_unknown_channel_fails_at_build() {
    let config = Config {
        follow_up: Some(FollowUpConfig {
            unsubscribe: vec![],
            channel: "fax".to_string(),
            message: "hola".to_string(),
        }),
        ..Default::default()
    };

    let err = match App::builder(config).sink_override(Arc::new(MemorySink::new())).build() {
        Ok(_) => panic!("build should fail for an unknown follow-up channel"),
        Err(err) => err,
    };
    assert_eq!(
        err.downcast_ref::<NotifyError>(),
        Some(&NotifyError::UnknownChannelKind("fax".to_string()))
    );
}
