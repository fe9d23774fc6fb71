/*!
A small demo binary wiring `pathglob` and `svn-access` end to end.

This is not part of the public contract of either library; it exists only
to exercise the ambient logging and configuration stack the way a real
caller would, the same way the teacher workspace's `rg` binary exercises
`ignore`/`grep`/`printer`.
*/

use std::process::ExitCode;

use anyhow::{bail, Context};

mod logger;

fn main() -> ExitCode {
    logger::Logger::init().expect("logger is only initialized once");
    log::set_max_level(log::LevelFilter::Debug);

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("svnaccess: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let mut args = std::env::args_os().skip(1);
    let Some(subcommand) = args.next() else {
        bail!("usage: svnaccess <match|check> ...");
    };
    let subcommand =
        subcommand.into_string().map_err(|_| anyhow::anyhow!("invalid UTF-8 in subcommand"))?;

    match subcommand.as_str() {
        "match" => run_match(args),
        "check" => run_check(args),
        other => bail!("unknown subcommand '{other}' (expected 'match' or 'check')"),
    }
}

/// `svnaccess match <pattern> <path> [--dir]`
///
/// Compiles `pattern` and reports whether it matches `path`.
fn run_match(args: impl Iterator<Item = std::ffi::OsString>) -> anyhow::Result<ExitCode> {
    let mut parser = lexopt::Parser::from_args(args);
    let mut pattern = None;
    let mut path = None;
    let mut is_dir = false;
    while let Some(arg) = parser.next().context("invalid CLI arguments")? {
        match arg {
            lexopt::Arg::Long("dir") => is_dir = true,
            lexopt::Arg::Value(value) if pattern.is_none() => {
                pattern = Some(value.into_string().map_err(|_| {
                    anyhow::anyhow!("pattern must be valid UTF-8")
                })?);
            }
            lexopt::Arg::Value(value) if path.is_none() => {
                path = Some(value.into_string().map_err(|_| {
                    anyhow::anyhow!("path must be valid UTF-8")
                })?);
            }
            arg => bail!("unexpected argument: {:?}", arg),
        }
    }
    let pattern = pattern.context("missing <pattern>")?;
    let path = path.context("missing <path>")?;

    log::debug!("compiling pattern {pattern:?}");
    let compiled = pathglob::compile(&pattern)
        .with_context(|| format!("invalid pattern '{pattern}'"))?;
    let matched = compiled.is_match(&path, is_dir);
    println!("{matched}");
    Ok(if matched { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// `svnaccess check <user> <path> [--dir] [--write]`
///
/// Evaluates a fixed, hardcoded toy repository: public, no ACL, so the
/// verdict is entirely determined by the forge's intrinsic permissions
/// for `<user>` (anonymous if `<user>` is the empty string `""`).
fn run_check(args: impl Iterator<Item = std::ffi::OsString>) -> anyhow::Result<ExitCode> {
    use svn_access::{
        AccessAdapter, AdapterConfig, ForgeClient, ForgeOutcome, RepoMeta,
        RepoSnapshot, TeamMembership,
    };

    struct DemoForge;

    impl ForgeClient for DemoForge {
        fn repo_snapshot(
            &self,
            user: &str,
        ) -> Result<ForgeOutcome<RepoSnapshot>, svn_access::Error> {
            log::debug!("demo forge lookup for user {user:?}");
            Ok(ForgeOutcome::Found(RepoSnapshot {
                repo_id: 1,
                is_private: false,
                admin: false,
                push: user == "alice",
                pull: true,
            }))
        }

        fn team_membership(
            &self,
            _owner_login: &str,
        ) -> Result<TeamMembership, svn_access::Error> {
            Ok(TeamMembership::new())
        }
    }

    let mut parser = lexopt::Parser::from_args(args);
    let mut user = None;
    let mut path = None;
    let mut is_dir = false;
    let mut want_write = false;
    while let Some(arg) = parser.next().context("invalid CLI arguments")? {
        match arg {
            lexopt::Arg::Long("dir") => is_dir = true,
            lexopt::Arg::Long("write") => want_write = true,
            lexopt::Arg::Value(value) if user.is_none() => {
                user = Some(value.into_string().map_err(|_| {
                    anyhow::anyhow!("user must be valid UTF-8")
                })?);
            }
            lexopt::Arg::Value(value) if path.is_none() => {
                path = Some(value.into_string().map_err(|_| {
                    anyhow::anyhow!("path must be valid UTF-8")
                })?);
            }
            arg => bail!("unexpected argument: {:?}", arg),
        }
    }
    let user = user.context("missing <user>")?;
    let path = path.context("missing <path>")?;

    let repo = RepoMeta {
        id: 1,
        name: "demo".to_string(),
        owner_login: "acme".to_string(),
        is_private: false,
    };
    let adapter = AccessAdapter::new(DemoForge, AdapterConfig::default(), repo, None);

    let granted = if want_write {
        adapter.can_write(&user, "trunk", &path, is_dir)?
    } else {
        adapter.can_read(&user, "trunk", &path, is_dir)?
    };
    println!("{granted}");
    Ok(if granted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
