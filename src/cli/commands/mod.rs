pub mod deploy;
pub mod list;
pub mod restore;
pub mod sync;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::CommandFactory;
use tracing::error;

use crate::cli::args::{Cli, Command, DeviceArgs};
use crate::config::Settings;
use crate::device::{require_device, DeviceLocator};
use crate::error::{CircmanError, DeviceError, Result};
use crate::mount::MountSource;

pub fn dispatch(command: &Command, settings: &Settings, mounts: &dyn MountSource) -> Result<()> {
    match command {
        Command::List => list::run_list(settings),
        Command::Restore(args) => restore::run_restore(settings, mounts, args),
        Command::Deploy(args) => deploy::run_deploy(settings, mounts, args),
        Command::Sync(args) => sync::run_sync(settings, mounts, args),
    }
}

/// Uses `-d` when given, otherwise asks the mount table.
pub fn resolve_device(
    args: &DeviceArgs,
    settings: &Settings,
    mounts: &dyn MountSource,
) -> Result<PathBuf> {
    let located = match &args.device {
        Some(path) => Some(path.clone()),
        None => DeviceLocator::new(mounts, settings).locate()?,
    };
    require_device(located.as_deref())
}

fn usage_error_kind(err: &CircmanError) -> Option<ErrorKind> {
    match err {
        CircmanError::Device(DeviceError::Missing) => Some(ErrorKind::MissingRequiredArgument),
        CircmanError::InvalidPath { .. } => Some(ErrorKind::ValueValidation),
        CircmanError::Config(_) => Some(ErrorKind::InvalidValue),
        _ => None,
    }
}

pub fn exit_code_for(err: &CircmanError) -> i32 {
    match err {
        CircmanError::Device(DeviceError::Missing)
        | CircmanError::InvalidPath { .. }
        | CircmanError::Config(_) => 2,
        CircmanError::Archive(_)
        | CircmanError::Device(DeviceError::UnsupportedPlatform(_))
        | CircmanError::Message(_)
        | CircmanError::Io(_) => 1,
    }
}

/// Renders usage errors the way clap does, with the usage line of
/// `subcommand` when one is named.
pub fn usage_error(err: &CircmanError, subcommand: Option<&str>) -> Option<clap::Error> {
    let kind = usage_error_kind(err)?;
    let mut cli = Cli::command();
    cli.build();
    if let Some(sub) = subcommand.and_then(|name| cli.find_subcommand_mut(name)) {
        return Some(sub.error(kind, err.to_string()));
    }
    Some(cli.error(kind, err.to_string()))
}

pub fn exit_for_error(err: &CircmanError, subcommand: Option<&str>) -> ! {
    if let Some(usage) = usage_error(err, subcommand) {
        usage.exit();
    }
    if tracing::dispatcher::has_been_set() {
        error!("{}", err);
    } else {
        eprintln!("error: {}", err);
    }
    std::process::exit(exit_code_for(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArchiveError, ConfigError};
    use clap::Parser;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    struct StaticMounts(String);

    impl MountSource for StaticMounts {
        fn mount_output(&self, _program: &str) -> io::Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn no_device() -> StaticMounts {
        StaticMounts("/dev/nvme0n1p2 on / type ext4 (rw)\n".to_string())
    }

    struct Fixture {
        root: TempDir,
        settings: Settings,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().expect("tempdir");
            for dir in ["backups", "CIRCUITPY", "src"] {
                fs::create_dir_all(root.path().join(dir)).expect("mkdir");
            }
            let settings = Settings::new(
                root.path().join("backups"),
                root.path().join("circman.log"),
            );
            Self { root, settings }
        }

        fn device(&self) -> PathBuf {
            self.root.path().join("CIRCUITPY")
        }

        fn with_backups(self) -> Self {
            for name in [
                "archive-20230224_034752.tar.bz2",
                "archive-20230227_101709.tar.bz2",
            ] {
                fs::write(self.settings.backup_dir.join(name), b"").expect("touch");
            }
            self
        }

        fn parse(&self, args: &[&str]) -> Command {
            let mut argv = vec!["circman".to_string()];
            for arg in args {
                argv.push(arg.replace("{device}", &self.device().to_string_lossy()));
            }
            Cli::try_parse_from(argv)
                .expect("parse")
                .command
                .expect("command")
        }
    }

    #[test]
    fn defaults_are_applied() {
        let fx = Fixture::new();
        match fx.parse(&["restore"]) {
            Command::Restore(args) => {
                assert!(args.device.device.is_none());
                assert_eq!(args.archive.get(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        match fx.parse(&["deploy", "-d", "/media/CIRCUITPY"]) {
            Command::Deploy(args) => assert_eq!(args.source, PathBuf::from("src")),
            other => panic!("unexpected {:?}", other),
        }
        match fx.parse(&["sync", "--device", "/media/CIRCUITPY", "-D", "backup"]) {
            Command::Sync(args) => assert_eq!(args.dest, PathBuf::from("backup")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rank_zero_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["circman", "restore", "-a", "0"]).expect_err("rank 0");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn device_commands_fail_without_device() {
        let fx = Fixture::new().with_backups();
        for args in [&["restore"][..], &["deploy"][..], &["sync"][..]] {
            let err = dispatch(&fx.parse(args), &fx.settings, &no_device()).expect_err("no device");
            assert!(matches!(err, CircmanError::Device(DeviceError::Missing)));
            assert_eq!(exit_code_for(&err), 2);
            assert!(err.to_string().contains("'--device'"));
        }
    }

    #[test]
    fn invalid_device_path_is_a_usage_error() {
        let fx = Fixture::new().with_backups();
        let missing = fx.root.path().join("nowhere");
        let command = fx.parse(&["restore", "-d", missing.to_str().unwrap()]);
        let err = dispatch(&command, &fx.settings, &no_device()).expect_err("invalid");
        assert!(matches!(err, CircmanError::InvalidPath { .. }));
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn restore_without_backups_exits_with_one() {
        let fx = Fixture::new();
        let command = fx.parse(&["restore", "-d", "{device}"]);
        let err = dispatch(&command, &fx.settings, &no_device()).expect_err("no backups");
        assert!(matches!(err, CircmanError::Archive(ArchiveError::NoBackups)));
        assert_eq!(err.to_string(), "No backup found to restore.");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn restore_rank_past_catalog_exits_with_one() {
        let fx = Fixture::new().with_backups();
        let command = fx.parse(&["restore", "-d", "{device}", "-a", "3"]);
        let err = dispatch(&command, &fx.settings, &no_device()).expect_err("not found");
        assert_eq!(err.to_string(), "Backup not found.");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn deploy_requires_existing_source() {
        let fx = Fixture::new();
        let missing = fx.root.path().join("firmware");
        let command = fx.parse(&["deploy", "-d", "{device}", "-s", missing.to_str().unwrap()]);
        let err = dispatch(&command, &fx.settings, &no_device()).expect_err("source");
        assert!(err.to_string().contains("'-s' / '--source'"));
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn sync_copies_device_into_dest() {
        let fx = Fixture::new();
        fs::write(fx.device().join("code.py"), "from device").expect("write");
        let dest = fx.root.path().join("src");
        let command = fx.parse(&["sync", "-d", "{device}", "-D", dest.to_str().unwrap()]);
        dispatch(&command, &fx.settings, &no_device()).expect("sync");
        assert_eq!(
            fs::read_to_string(dest.join("code.py")).expect("read"),
            "from device"
        );
    }

    #[test]
    fn autodiscovered_device_is_used() {
        let fx = Fixture::new();
        let device = fx.device();
        fs::write(device.join("code.py"), "autodiscovered").expect("write");
        let mounts = StaticMounts(format!("/dev/sda1 on {} type vfat (rw)\n", device.display()));
        let dest = fx.root.path().join("src");
        let command = fx.parse(&["sync", "-D", dest.to_str().unwrap()]);
        dispatch(&command, &fx.settings, &mounts).expect("sync");
        assert_eq!(
            fs::read_to_string(dest.join("code.py")).expect("read"),
            "autodiscovered"
        );
    }

    #[test]
    fn usage_errors_carry_subcommand_usage() {
        let err = CircmanError::from(DeviceError::Missing);
        let rendered = usage_error(&err, Some("restore")).expect("usage").to_string();
        assert!(rendered.contains("Missing option '-d' / '--device'."));
        assert!(rendered.contains("circman restore"));

        let top = usage_error(&err, None).expect("usage");
        assert_eq!(top.exit_code(), 2);
        assert!(!top.to_string().contains("circman restore"));
    }

    #[test]
    fn config_errors_are_usage_errors() {
        let err = CircmanError::from(ConfigError::Read {
            path: PathBuf::from("/nowhere/circman.yaml"),
            reason: "No such file or directory (os error 2)".to_string(),
        });
        assert_eq!(exit_code_for(&err), 2);
        let usage = usage_error(&err, None).expect("usage");
        assert_eq!(usage.exit_code(), 2);
        assert!(usage.to_string().contains("read config /nowhere/circman.yaml"));
    }

    #[test]
    fn runtime_errors_are_not_usage_errors() {
        let err = CircmanError::from(ArchiveError::NoBackups);
        assert!(usage_error(&err, Some("restore")).is_none());
    }

    #[test]
    fn list_is_device_independent() {
        let fx = Fixture::new().with_backups();
        dispatch(&Command::List, &fx.settings, &no_device()).expect("list");
    }
}
