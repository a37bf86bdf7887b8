use crate::common::SERVER_TIME;
use crate::common::file::{FileSpec, append_line, create_directory, stamp, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use chrono::DateTime;
use rstest::fixture;
use std::path::{Path, PathBuf};
use vc::artifacts::entries::tracked_entry::format_timestamp;

/// Files of the fixture checkout, all at revision 1.1
pub const CHECKED_OUT: &[(&str, &str)] = &[
    ("a.txt", "foo bar\n"),
    ("b.txt", "baz\n"),
    ("sub/c.txt", "nested foo\n"),
];

/// A CVS checkout plus a stand-in server.
///
/// The fake `cvs` logs each invocation to `<server>/calls`, serves
/// `update -p` from `<server>/files`, answers `diff` itself and accepts
/// anything else.
pub struct WorkingCopy {
    pub dir: TempDir,
    pub server: TempDir,
    pub cvs: PathBuf,
}

#[fixture]
pub fn working_copy() -> WorkingCopy {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let server = TempDir::new().expect("Failed to create temp dir");

    create_directory(&dir.path().join("CVS"));
    create_directory(&dir.path().join("sub").join("CVS"));
    append_line(&dir.path().join("CVS").join("Entries"), "D/sub////");

    for (path, content) in CHECKED_OUT {
        let relative = Path::new(path);
        let live = dir.path().join(relative);
        write_file(FileSpec::new(live.clone(), content.to_string()));
        write_file(FileSpec::new(
            server.path().join("files").join(relative),
            content.to_string(),
        ));
        stamp(&live, SERVER_TIME);

        let parent = relative.parent().unwrap_or(Path::new(""));
        let name = relative.file_name().unwrap().to_string_lossy().into_owned();
        append_line(
            &dir.path().join(parent).join("CVS").join("Entries"),
            &entry_line(&name, "1.1"),
        );
    }

    let server_root = server.path().display().to_string();
    let cvs = fake_cvs(server.path(), &server_root);

    WorkingCopy { dir, server, cvs }
}

#[cfg(unix)]
fn fake_cvs(server: &Path, server_root: &str) -> PathBuf {
    crate::common::file::write_script(
        &server.join("fake-cvs"),
        &format!(
            r#"printf '%s\n' "$*" >> "{server_root}/calls"
case "$1" in
  -Q) cat "{server_root}/files/$6" ;;
  diff) echo "server diff of $2"; exit 1 ;;
  *) exit 0 ;;
esac"#
        ),
    )
}

/// An `Entries` record checked out at `SERVER_TIME`
pub fn entry_line(name: &str, revision: &str) -> String {
    let server_time = DateTime::from_timestamp(SERVER_TIME, 0).unwrap();
    format!("/{}/{}/{}//", name, revision, format_timestamp(&server_time))
}

impl WorkingCopy {
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Change a checked-out file and give it a later modification time
    pub fn edit(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        write_file(FileSpec::new(path.clone(), content.to_string()));
        stamp(&path, crate::common::EDIT_TIME);
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Add a record to the `Entries` file of `dir` (relative, "" for the root)
    pub fn record(&self, dir: &str, line: &str) {
        append_line(&self.path(dir).join("CVS").join("Entries"), line);
    }

    /// Make the server unable to provide `relative`
    pub fn lose_on_server(&self, relative: &str) {
        std::fs::remove_file(self.server.path().join("files").join(relative))
            .unwrap_or_else(|e| panic!("Failed to remove {}: {}", relative, e));
    }

    /// Every argument list the fake `cvs` received, in order
    pub fn cvs_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.server.path().join("calls"))
            .map(|calls| calls.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn cached_text(&self, dir: &str, name: &str, revision: &str) -> PathBuf {
        self.path(dir)
            .join("CVS")
            .join("vc-texts")
            .join(format!("{name}@{revision}"))
    }

    pub fn vc(&self, args: &[&str]) -> Command {
        let mut cmd = run_vc_command(self.dir.path(), args);
        cmd.env("VC_CVS", &self.cvs);
        cmd
    }
}

pub fn run_vc_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vc").expect("Failed to find vc binary");
    for var in ["VC_GIT", "VC_CVS", "VC_DIFF", "VC_GREP", "VC_LOG"] {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
