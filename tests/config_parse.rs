use ts_notify::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../ts-notify.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.mail.smtp_port, 587);
    assert!(!cfg.mail.recipients.is_empty());
    assert!(cfg.queue.list_timeout_seconds > 0);
    assert!(cfg.logging.write_to_file);
}

#[test]
fn empty_config_uses_defaults() {
    let cfg: Config = toml::from_str("").expect("parse TOML");
    assert_eq!(cfg.queue.ts_bin, "auto");
    assert_eq!(cfg.queue.info_timeout_seconds, 5);
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.global.print_summary);
}

#[test]
fn partial_section_overrides_only_named_keys() {
    let cfg: Config = toml::from_str(
        "[queue]\nts_bin = \"/usr/local/bin/ts\"\nlist_timeout_seconds = 2\ninfo_timeout_seconds = 2\n",
    )
    .expect("parse TOML");
    assert_eq!(cfg.queue.ts_bin, "/usr/local/bin/ts");
    assert_eq!(cfg.queue.list_timeout_seconds, 2);
    assert_eq!(cfg.logging.file_path, "ts-notify.log");
}
