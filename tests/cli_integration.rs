//! End-to-end tests for the `forgelink` binary.
//!
//! Each test runs the binary against a real git repository with the user's
//! config isolated to a temp directory.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A git repository plus an isolated config home.
struct Fixture {
    repo: TempDir,
    home: TempDir,
}

impl Fixture {
    /// Repository with `src/lib.py` committed and an `origin` remote.
    fn new(origin: &str) -> Self {
        let repo = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp dir");

        run_git(repo.path(), &["init"]);
        run_git(repo.path(), &["config", "user.email", "test@example.com"]);
        run_git(repo.path(), &["config", "user.name", "Test User"]);
        run_git(repo.path(), &["config", "commit.gpgsign", "false"]);
        std::fs::create_dir_all(repo.path().join("src")).unwrap();
        std::fs::write(repo.path().join("src/lib.py"), "print('hi')\n").unwrap();
        run_git(repo.path(), &["add", "src/lib.py"]);
        run_git(repo.path(), &["commit", "-m", "Initial commit"]);
        run_git(repo.path(), &["remote", "add", "origin", origin]);

        Self { repo, home }
    }

    fn path(&self) -> &Path {
        self.repo.path()
    }

    /// `forgelink` run from the repository root with config isolated.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("forgelink").unwrap();
        cmd.env_remove("FORGELINK_CONFIG")
            .env("XDG_CONFIG_HOME", self.home.path())
            .env("HOME", self.home.path())
            .current_dir(self.path());
        cmd
    }

    fn head(&self) -> String {
        let output = StdCommand::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    fn write(&self, relative: &str, content: &str) {
        std::fs::write(self.path().join(relative), content).unwrap();
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

mod link {
    use super::*;

    #[test]
    fn prints_permalink() {
        let fx = Fixture::new("git@github.com:octo/proj.git");
        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .success()
            .stdout(predicate::str::diff(format!(
                "https://github.com/octo/proj/blob/{}/src/lib.py\n",
                fx.head()
            )));
    }

    #[test]
    fn line_fragment() {
        let fx = Fixture::new("git@gitlab.com:group/proj.git");
        fx.cmd()
            .args(["src/lib.py", "--line", "3"])
            .assert()
            .success()
            .stdout(predicate::str::ends_with("/src/lib.py#L3\n"));
    }

    #[test]
    fn reversed_range_is_normalized() {
        let fx = Fixture::new("https://bitbucket.org/team/repo.git");
        fx.cmd()
            .args(["src/lib.py", "--range", "20:10"])
            .assert()
            .success()
            .stdout(predicate::str::ends_with("#lines-10:20\n"));
    }

    #[test]
    fn cwd_flag() {
        let fx = Fixture::new("git@github.com:o/r.git");
        let mut cmd = fx.cmd();
        cmd.current_dir(fx.home.path())
            .arg("lib.py")
            .arg("--cwd")
            .arg(fx.path().join("src"))
            .assert()
            .success()
            .stdout(predicate::str::ends_with("/src/lib.py\n"));
    }

    #[test]
    fn quiet_still_prints_link() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .args(["-q", "src/lib.py"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("https://github.com/o/r/blob/"));
    }

    #[test]
    fn debug_logs_to_stderr() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .args(["--debug", "src/lib.py"])
            .assert()
            .success()
            .stderr(predicate::str::contains("[debug] revision:"))
            .stderr(predicate::str::contains("matched github.com (github)"));
    }

    #[test]
    fn explicit_remote() {
        let fx = Fixture::new("git@github.com:me/fork.git");
        run_git(fx.path(), &["remote", "add", "upstream", "git@gitlab.com:them/proj.git"]);

        fx.cmd()
            .args(["src/lib.py", "--remote", "origin"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("https://github.com/me/fork/"));
    }
}

mod failures {
    use super::*;

    #[test]
    fn untracked_file() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.write("notes.txt", "scratch\n");

        fx.cmd()
            .arg("notes.txt")
            .assert()
            .code(1)
            .stdout("")
            .stderr("error: notes.txt is not tracked by git\n");
    }

    #[test]
    fn unknown_forge() {
        let fx = Fixture::new("git@example.com:o/r.git");
        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .code(1)
            .stderr("error: Could not build a remote link\n");
    }

    #[test]
    fn line_zero() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .args(["src/lib.py", "--line", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::starts_with("error: "));
    }

    #[test]
    fn line_and_range_conflict() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .args(["src/lib.py", "--line", "1", "--range", "1:2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }

    #[test]
    fn missing_path() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No file given"));
    }

    #[test]
    fn invalid_repo_config() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.write(".forgelink.toml", "[[forges]]\nhost = \"git.lan\"\nkind = \"fossil\"\n");

        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("fossil"));
    }
}

mod config {
    use super::*;

    #[test]
    fn repo_config_adds_forge() {
        let fx = Fixture::new("git@git.internal:ops/infra.git");
        fx.write(
            ".forgelink.toml",
            "[[forges]]\nhost = \"git.internal\"\nkind = \"gitea\"\nprotocol = \"http\"\n",
        );

        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .success()
            .stdout(predicate::str::diff(format!(
                "http://git.internal/ops/infra/src/commit/{}/src/lib.py\n",
                fx.head()
            )));
    }

    #[test]
    fn repo_config_remote_preference() {
        let fx = Fixture::new("git@github.com:me/fork.git");
        run_git(fx.path(), &["remote", "add", "mirror", "git@gitlab.com:m/proj.git"]);
        fx.write(".forgelink.toml", "remotes = [\"mirror\"]\n");

        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("https://gitlab.com/m/proj/-/blob/"));
    }

    #[test]
    fn overriding_builtin_host_warns() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.write(
            ".forgelink.toml",
            "[[forges]]\nhost = \"github.com\"\nkind = \"gitea\"\n",
        );

        fx.cmd()
            .arg("src/lib.py")
            .assert()
            .success()
            .stdout(predicate::str::contains("/src/commit/"))
            .stderr(predicate::str::contains("warning: forge entry for 'github.com'"));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn forges_table() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.cmd()
            .arg("forges")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("github.com"))
            .stdout(predicate::str::contains("git.savannah.gnu.org"));
    }

    #[test]
    fn forges_json_includes_repo_entries() {
        let fx = Fixture::new("git@github.com:o/r.git");
        fx.write(".forgelink.toml", "[[forges]]\nhost = \"git.lan\"\nkind = \"gitlab\"\n");

        let output = fx.cmd().args(["forges", "--json"]).output().unwrap();
        assert!(output.status.success());

        let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let entries = table.as_array().unwrap();
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[0]["host"], "github.com");
        assert_eq!(entries[13]["host"], "git.lan");
        assert_eq!(entries[13]["kind"], "gitlab");
        assert_eq!(entries[13]["protocol"], "https");
    }

    #[test]
    fn completion_bash() {
        let mut cmd = Command::cargo_bin("forgelink").unwrap();
        cmd.args(["completion", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("forgelink"));
    }
}
